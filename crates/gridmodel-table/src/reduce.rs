//! Statistical reducers over a column of values.
//!
//! Most reducers come out of one pass ([`StandardCalcs`]); the rest are
//! computed on demand. Results accumulate in a [`FieldCalcs`] map so a
//! repeated request only computes what is missing.

use gridmodel_core::{CellValue, FieldCalcs, FieldType, ReducedValue, ReducerId};
use std::collections::HashSet;
use std::sync::Arc;

/// Whether a reducer is produced by the single standard pass.
#[must_use]
pub const fn is_standard(reducer: ReducerId) -> bool {
    !matches!(
        reducer,
        ReducerId::CountAll
            | ReducerId::ChangeCount
            | ReducerId::DistinctCount
            | ReducerId::AllValues
            | ReducerId::UniqueValues
            | ReducerId::Variance
            | ReducerId::StdDev
            | ReducerId::Median
    )
}

/// Results of the single standard pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardCalcs {
    pub sum: f64,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub logmin: Option<f64>,
    pub mean: Option<f64>,
    pub first: CellValue,
    pub last: CellValue,
    pub first_not_null: CellValue,
    pub last_not_null: CellValue,
    /// Rows counted, nulls included
    pub count: usize,
    pub non_null_count: usize,
    pub all_is_null: bool,
    pub all_is_zero: bool,
    pub range: Option<f64>,
    pub diff: Option<f64>,
    pub diffperc: Option<f64>,
    /// Increase of a monotonic counter, accounting for resets
    pub delta: f64,
    /// Smallest difference between consecutive values
    pub step: Option<f64>,
}

impl StandardCalcs {
    /// Run the standard pass. Numeric statistics are only gathered for
    /// numeric fields and skip nulls.
    #[must_use]
    pub fn compute(values: &[CellValue], numeric: bool) -> Self {
        let mut calcs = Self {
            sum: 0.0,
            max: None,
            min: None,
            logmin: None,
            mean: None,
            first: values.first().cloned().unwrap_or_default(),
            last: values.last().cloned().unwrap_or_default(),
            first_not_null: CellValue::Empty,
            last_not_null: CellValue::Empty,
            count: values.len(),
            non_null_count: 0,
            all_is_null: true,
            all_is_zero: true,
            range: None,
            diff: None,
            diffperc: None,
            delta: 0.0,
            step: None,
        };
        let mut previous_delta_up = true;
        let mut last_number: Option<f64> = None;

        for (i, value) in values.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            if calcs.first_not_null.is_empty() {
                calcs.first_not_null = value.clone();
            }
            calcs.all_is_null = false;
            if value.as_number() != Some(0.0) {
                calcs.all_is_zero = false;
            }
            calcs.last_not_null = value.clone();

            let Some(current) = value.as_number().filter(|_| numeric) else {
                continue;
            };
            calcs.sum += current;
            calcs.non_null_count += 1;

            if let Some(prev) = last_number {
                let step = current - prev;
                if calcs.step.map_or(true, |s| step < s) {
                    calcs.step = Some(step);
                }
                if prev > current {
                    previous_delta_up = false;
                    if i == values.len() - 1 {
                        calcs.delta += current;
                    }
                } else {
                    calcs.delta += if previous_delta_up { step } else { current };
                    previous_delta_up = true;
                }
            }
            last_number = Some(current);

            if calcs.max.map_or(true, |m| current > m) {
                calcs.max = Some(current);
            }
            if calcs.min.map_or(true, |m| current < m) {
                calcs.min = Some(current);
            }
            if current > 0.0 && calcs.logmin.map_or(true, |m| current < m) {
                calcs.logmin = Some(current);
            }
        }

        if calcs.all_is_null {
            calcs.all_is_zero = false;
        }
        if calcs.non_null_count > 0 {
            calcs.mean = Some(calcs.sum / calcs.non_null_count as f64);
        }
        if let (Some(max), Some(min)) = (calcs.max, calcs.min) {
            calcs.range = Some(max - min);
        }
        if let (Some(first), Some(last)) = (
            calcs.first_not_null.as_number().filter(|_| numeric),
            calcs.last_not_null.as_number().filter(|_| numeric),
        ) {
            let diff = last - first;
            calcs.diff = Some(diff);
            calcs.diffperc = Some(diff / first);
        }

        calcs
    }

    /// The result for one standard reducer.
    #[must_use]
    pub fn get(&self, reducer: ReducerId) -> Option<ReducedValue> {
        let value = match reducer {
            ReducerId::Sum => ReducedValue::Number(self.sum),
            ReducerId::Max => self.max.into(),
            ReducerId::Min => self.min.into(),
            ReducerId::Logmin => self.logmin.into(),
            ReducerId::Mean => self.mean.into(),
            ReducerId::First => picked(&self.first),
            ReducerId::Last => picked(&self.last),
            ReducerId::FirstNotNull => picked(&self.first_not_null),
            ReducerId::LastNotNull => picked(&self.last_not_null),
            ReducerId::Count => ReducedValue::Number(self.count as f64),
            ReducerId::Range => self.range.into(),
            ReducerId::Diff => self.diff.into(),
            ReducerId::DiffPerc => self.diffperc.into(),
            ReducerId::Delta => ReducedValue::Number(self.delta),
            ReducerId::Step => self.step.into(),
            ReducerId::AllIsNull => ReducedValue::Bool(self.all_is_null),
            ReducerId::AllIsZero => ReducedValue::Bool(self.all_is_zero),
            _ => return None,
        };
        Some(value)
    }
}

fn picked(value: &CellValue) -> ReducedValue {
    match value {
        CellValue::Empty => ReducedValue::Null,
        CellValue::Number(n) => ReducedValue::Number(*n),
        other => ReducedValue::Value(other.clone()),
    }
}

/// Hashable identity of a value, NaN and signed zeros folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DistinctKey<'a> {
    Text(&'a str),
    Number(u64),
    Bool(bool),
    Time(i64),
    Frames(usize),
    Empty,
}

impl<'a> DistinctKey<'a> {
    fn of(value: &'a CellValue) -> Self {
        match value {
            CellValue::Text(s) => Self::Text(s),
            CellValue::Number(n) if n.is_nan() => Self::Number(f64::NAN.to_bits()),
            CellValue::Number(n) if *n == 0.0 => Self::Number(0.0_f64.to_bits()),
            CellValue::Number(n) => Self::Number(n.to_bits()),
            CellValue::Bool(b) => Self::Bool(*b),
            CellValue::Time(t) => Self::Time(*t),
            CellValue::Frames(frames) => Self::Frames(frames.first().map_or(0, |f| Arc::as_ptr(f) as usize)),
            CellValue::Empty => Self::Empty,
        }
    }
}

fn unique_values(values: &[CellValue]) -> Vec<CellValue> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        if seen.insert(DistinctKey::of(value)) {
            unique.push(value.clone());
        }
    }
    unique
}

fn change_count(values: &[CellValue]) -> usize {
    values
        .windows(2)
        .filter(|pair| DistinctKey::of(&pair[0]) != DistinctKey::of(&pair[1]))
        .count()
}

fn numbers(values: &[CellValue]) -> impl Iterator<Item = f64> + '_ {
    values.iter().filter_map(CellValue::as_number)
}

fn variance(values: &[CellValue]) -> Option<f64> {
    let mut count = 0.0;
    let mut mean = 0.0;
    let mut square_sum = 0.0;
    for value in numbers(values) {
        count += 1.0;
        let delta = value - mean;
        mean += delta / count;
        square_sum += delta * (value - mean);
    }
    (count > 0.0).then(|| square_sum / count)
}

fn median(values: &[CellValue]) -> Option<f64> {
    let mut sorted: Vec<f64> = numbers(values).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn compute_extra(reducer: ReducerId, values: &[CellValue]) -> ReducedValue {
    match reducer {
        ReducerId::CountAll => ReducedValue::Number(values.len() as f64),
        ReducerId::ChangeCount => ReducedValue::Number(change_count(values) as f64),
        ReducerId::DistinctCount => ReducedValue::Number(unique_values(values).len() as f64),
        ReducerId::AllValues => ReducedValue::List(values.to_vec()),
        ReducerId::UniqueValues => ReducedValue::List(unique_values(values)),
        ReducerId::Variance => variance(values).into(),
        ReducerId::StdDev => variance(values).map(f64::sqrt).into(),
        ReducerId::Median => median(values).into(),
        _ => ReducedValue::Null,
    }
}

/// Compute `reducers` over `values`, reusing anything already in `calcs`.
///
/// Missing standard reducers trigger one standard pass whose results are
/// all stored.
pub fn reduce_values(
    values: &[CellValue],
    field_type: FieldType,
    reducers: &[ReducerId],
    calcs: &mut FieldCalcs,
) {
    let missing: Vec<ReducerId> = reducers
        .iter()
        .copied()
        .filter(|r| !calcs.contains_key(r))
        .collect();
    if missing.is_empty() {
        tracing::trace!(reducers = reducers.len(), "reducers served from cache");
        return;
    }

    if missing.iter().copied().any(is_standard) {
        let standard = StandardCalcs::compute(values, field_type.is_numeric());
        for reducer in ReducerId::ALL.into_iter().filter(|r| is_standard(*r)) {
            if let Some(value) = standard.get(reducer) {
                calcs.insert(reducer, value);
            }
        }
    }
    for reducer in missing.into_iter().filter(|r| !is_standard(*r)) {
        calcs.insert(reducer, compute_extra(reducer, values));
    }
    tracing::debug!(rows = values.len(), cached = calcs.len(), "reduced field values");
}

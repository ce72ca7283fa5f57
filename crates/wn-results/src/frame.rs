//! A time-indexed table of named columns.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ResultsError, ResultsResult};

/// Values of one attribute over time: one row per time (seconds), one
/// column per element name.
///
/// The time index is strictly increasing and every column is exactly as
/// long as it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultFrame {
    times: Vec<i64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl ResultFrame {
    /// Empty-column frame over `times`.
    pub fn new(times: Vec<i64>) -> ResultsResult<Self> {
        if let Some(w) = times.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ResultsError::ShapeMismatch {
                what: format!("time index not strictly increasing at {} -> {}", w[0], w[1]),
            });
        }
        Ok(Self {
            times,
            columns: BTreeMap::new(),
        })
    }

    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> ResultsResult<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Insert or replace a column.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> ResultsResult<()> {
        let name = name.into();
        if values.len() != self.times.len() {
            return Err(ResultsError::ShapeMismatch {
                what: format!(
                    "column '{name}' has {} values for {} times",
                    values.len(),
                    self.times.len()
                ),
            });
        }
        self.columns.insert(name, values);
        Ok(())
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names, sorted.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Value of `column` at `time`, if both exist.
    pub fn value(&self, time: i64, column: &str) -> Option<f64> {
        let row = self.times.binary_search(&time).ok()?;
        self.columns.get(column).map(|c| c[row])
    }

    /// Apply `f` to every cell.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let columns = self
            .columns
            .par_iter()
            .map(|(name, values)| {
                let mapped: Vec<f64> = values.iter().map(|&v| f(v)).collect();
                (name.clone(), mapped)
            })
            .collect();
        Self {
            times: self.times.clone(),
            columns,
        }
    }

    /// Combine two frames cell by cell.
    ///
    /// Both frames are aligned on the union of their times and columns;
    /// a cell missing on either side enters `f` as NaN.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        let times: Vec<i64> = if self.times == other.times {
            self.times.clone()
        } else {
            let union: BTreeSet<i64> = self.times.iter().chain(&other.times).copied().collect();
            union.into_iter().collect()
        };
        let names: BTreeSet<&String> = self.columns.keys().chain(other.columns.keys()).collect();

        let columns = names
            .into_par_iter()
            .map(|name| {
                let values: Vec<f64> = times
                    .iter()
                    .map(|&t| f(self.cell(t, name), other.cell(t, name)))
                    .collect();
                (name.clone(), values)
            })
            .collect();
        Self { times, columns }
    }

    /// Same times and columns, every value NaN.
    pub fn nan_like(&self) -> Self {
        self.map(|_| f64::NAN)
    }

    /// Rows strictly before `cut`.
    pub fn rows_before(&self, cut: i64) -> Self {
        let end = self.times.partition_point(|&t| t < cut);
        Self {
            times: self.times[..end].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), values[..end].to_vec()))
                .collect(),
        }
    }

    /// Rows of `self` followed by rows of `other`. Columns are the union
    /// of both; cells a side does not have are NaN.
    ///
    /// # Errors
    /// [`ResultsError::ShapeMismatch`] unless every time in `other` comes
    /// after the last time in `self`.
    pub fn concat(&self, other: &Self) -> ResultsResult<Self> {
        if let (Some(&last), Some(&first)) = (self.times.last(), other.times.first())
            && first <= last
        {
            return Err(ResultsError::ShapeMismatch {
                what: format!("appended rows start at {first}, not after {last}"),
            });
        }
        let mut times = self.times.clone();
        times.extend_from_slice(&other.times);

        let names: BTreeSet<&String> = self.columns.keys().chain(other.columns.keys()).collect();
        let columns = names
            .into_iter()
            .map(|name| {
                let mut values = padded(self.columns.get(name), self.len());
                values.extend(padded(other.columns.get(name), other.len()));
                (name.clone(), values)
            })
            .collect();
        Ok(Self { times, columns })
    }

    /// Add `seconds` to every time.
    pub fn shift_time(&mut self, seconds: i64) {
        for t in &mut self.times {
            *t += seconds;
        }
    }

    fn cell(&self, time: i64, column: &str) -> f64 {
        self.value(time, column).unwrap_or(f64::NAN)
    }
}

fn padded(values: Option<&Vec<f64>>, len: usize) -> Vec<f64> {
    match values {
        Some(v) => v.clone(),
        None => vec![f64::NAN; len],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(times: &[i64], cols: &[(&str, &[f64])]) -> ResultFrame {
        cols.iter()
            .try_fold(ResultFrame::new(times.to_vec()).unwrap(), |f, (name, vals)| {
                f.with_column(*name, vals.to_vec())
            })
            .unwrap()
    }

    #[test]
    fn rejects_unordered_times_and_short_columns() {
        assert!(ResultFrame::new(vec![0, 10, 10]).is_err());
        assert!(ResultFrame::new(vec![0, 10]).unwrap().with_column("J1", vec![1.0]).is_err());
    }

    #[test]
    fn value_lookup() {
        let f = frame(&[0, 3600], &[("J1", &[1.0, 2.0])]);
        assert_eq!(f.value(3600, "J1"), Some(2.0));
        assert_eq!(f.value(1800, "J1"), None);
        assert_eq!(f.value(0, "J2"), None);
    }

    #[test]
    fn zip_aligns_on_union() {
        let a = frame(&[0, 10], &[("J1", &[1.0, 2.0]), ("J2", &[5.0, 5.0])]);
        let b = frame(&[10, 20], &[("J1", &[3.0, 4.0])]);
        let c = a.zip_with(&b, |x, y| x + y);
        assert_eq!(c.times(), &[0, 10, 20]);
        assert_eq!(c.value(10, "J1"), Some(5.0));
        assert!(c.value(0, "J1").unwrap().is_nan());
        assert!(c.value(10, "J2").unwrap().is_nan());
    }

    #[test]
    fn rows_before_and_concat() {
        let a = frame(&[0, 10, 20], &[("J1", &[1.0, 2.0, 3.0])]);
        let b = frame(&[10, 20], &[("J1", &[7.0, 8.0]), ("J2", &[0.5, 0.5])]);
        let head = a.rows_before(10);
        assert_eq!(head.times(), &[0]);
        let merged = head.concat(&b).unwrap();
        assert_eq!(merged.times(), &[0, 10, 20]);
        assert_eq!(merged.column("J1").unwrap(), &[1.0, 7.0, 8.0]);
        assert!(merged.value(0, "J2").unwrap().is_nan());
        assert!(a.concat(&b).is_err());
    }

    #[test]
    fn shift_moves_index() {
        let mut f = frame(&[0, 10], &[("P1", &[1.0, 1.0])]);
        f.shift_time(3600);
        assert_eq!(f.times(), &[3600, 3610]);
    }
}

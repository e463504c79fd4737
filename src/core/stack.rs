use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Lower and upper bound of one stacked segment in domain units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    pub y0: f64,
    pub y1: f64,
}

impl StackSegment {
    #[must_use]
    pub fn value(self) -> f64 {
        self.y1 - self.y0
    }
}

/// All segments for one key, one per input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayer {
    pub key: String,
    pub index: usize,
    pub segments: Vec<StackSegment>,
}

/// Stacks `value(row, key)` for every key in order on a zero baseline.
pub fn stack_series<R, K, F>(rows: &[R], keys: &[K], value: F) -> ChartResult<Vec<StackLayer>>
where
    K: AsRef<str>,
    F: Fn(&R, &K) -> f64,
{
    let mut baselines = vec![0.0_f64; rows.len()];
    let mut layers = Vec::with_capacity(keys.len());

    for (index, key) in keys.iter().enumerate() {
        let mut segments = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let amount = value(row, key);
            if !amount.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "stack value for key `{}` at row {row_index} must be finite",
                    key.as_ref()
                )));
            }
            let y0 = baselines[row_index];
            let y1 = y0 + amount;
            baselines[row_index] = y1;
            segments.push(StackSegment { y0, y1 });
        }
        layers.push(StackLayer {
            key: key.as_ref().to_owned(),
            index,
            segments,
        });
    }

    Ok(layers)
}

/// Per-row totals (top of the last layer); zeros when there are no layers.
#[must_use]
pub fn stack_totals(layers: &[StackLayer], rows: usize) -> Vec<f64> {
    match layers.last() {
        Some(top) => top.segments.iter().map(|segment| segment.y1).collect(),
        None => vec![0.0; rows],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_in_key_order() {
        let rows = [[1.0, 2.0], [3.0, 4.0]];
        let layers =
            stack_series(&rows, &["a", "b"], |row, key| if *key == "a" { row[0] } else { row[1] })
                .expect("stack");

        assert_eq!(layers[0].segments[1], StackSegment { y0: 0.0, y1: 3.0 });
        assert_eq!(layers[1].segments[1], StackSegment { y0: 3.0, y1: 7.0 });
        assert_eq!(stack_totals(&layers, rows.len()), vec![3.0, 7.0]);
    }

    #[test]
    fn rejects_non_finite_values() {
        let rows = [f64::NAN];
        assert!(stack_series(&rows, &["a"], |row, _| *row).is_err());
    }
}

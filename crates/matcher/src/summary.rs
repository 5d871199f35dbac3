//! Summary statistics over a scored table.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::scorer::{output_column_names, BASE_SCORE};
use crate::table::Table;

/// Counts and score range for one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Rows in the table
    pub rows: usize,
    /// Rows with a defined base_score
    pub scored_rows: usize,
    /// Undefined cells per output column
    pub undefined: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
}

impl ScoreSummary {
    /// Summarizes a table produced by the scorer. Output columns that are
    /// missing count as entirely undefined.
    pub fn from_table(table: &Table) -> Self {
        let rows = table.num_rows();

        let undefined = output_column_names()
            .into_iter()
            .map(|name| {
                let count = table
                    .scores(&name)
                    .map(|s| s.iter().filter(|x| x.is_nan()).count())
                    .unwrap_or(rows);
                (name, count)
            })
            .collect();

        let defined: Vec<f64> = table
            .scores(BASE_SCORE)
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(|x| !x.is_nan())
            .collect();

        let (mean_score, min_score, max_score) = if defined.is_empty() {
            (None, None, None)
        } else {
            let sum: f64 = defined.iter().sum();
            (
                Some(sum / defined.len() as f64),
                defined.iter().copied().reduce(f64::min),
                defined.iter().copied().reduce(f64::max),
            )
        };

        Self {
            rows,
            scored_rows: defined.len(),
            undefined,
            mean_score,
            min_score,
            max_score,
        }
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} rows scored", self.scored_rows, self.rows)?;
        if let (Some(mean), Some(min), Some(max)) = (self.mean_score, self.min_score, self.max_score) {
            write!(f, ", base_score mean {:.4} (min {:.4}, max {:.4})", mean, min, max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::compute_base_match;
    use profile_types::AttributeMap;
    use serde_json::json;

    #[test]
    fn test_summary_counts() {
        let agents = Table::from_json(&json!([
            {"age": 30, "sex": 0},
            {"age": 40, "sex": 1},
            {"age": null, "sex": null}
        ]))
        .unwrap();
        let content = AttributeMap::new().with("age", 30).with("sex", 0);
        let summary = ScoreSummary::from_table(&compute_base_match(&agents, &content));

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.scored_rows, 2);
        assert_eq!(summary.undefined["diff_age"], 1);
        assert_eq!(summary.undefined["diff_ethics"], 3);
        assert_eq!(summary.undefined["base_score"], 1);
        assert_eq!(summary.max_score, Some(1.0));
        assert_eq!(summary.min_score, Some(1.0 - 5.5));
        assert_eq!(summary.mean_score, Some((1.0 + (1.0 - 5.5)) / 2.0));
    }

    #[test]
    fn test_summary_of_unscored_table() {
        let summary = ScoreSummary::from_table(&Table::with_rows(2));
        assert_eq!(summary.scored_rows, 0);
        assert_eq!(summary.undefined["base_score"], 2);
        assert_eq!(summary.mean_score, None);
        assert_eq!(summary.to_string(), "0/2 rows scored");
    }
}

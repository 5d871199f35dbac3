//! Agent/content match scoring.
//!
//! For every agent row the scorer measures a distance to the content on six
//! tracked attributes, then averages the distances that could be computed:
//!
//! ```text
//! base_score = 1 - mean(available diff_* for the row)
//! ```
//!
//! Numeric distances are plain absolute differences and are not rescaled, so
//! an age gap of 10 outweighs everything else and `base_score` can drop well
//! below zero.
//!
//! Missing or malformed cells never abort scoring. They produce an undefined
//! (NaN) distance which is left out of the mean rather than counted as zero.

use profile_types::{AttributeMap, AttributeSource};
use serde_json::Value;
use thiserror::Error;

use crate::coerce::{label_column, normalize_label_opt, numeric_column, to_numeric, to_numeric_opt};
use crate::table::{json_type_name, Column, Table, TableError};

/// Externally precomputed income bucket.
pub const TIERED_INCOME: &str = "tiered_income";
/// Categorical attribute.
pub const CULTURAL: &str = "cultural";
/// Aggregate output column.
pub const BASE_SCORE: &str = "base_score";
/// Prefix of per-attribute distance columns.
pub const DIFF_PREFIX: &str = "diff_";

/// How a tracked attribute's distance is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceKind {
    /// `|agent - content|` over the whole column at once. If the content
    /// value is undefined the column is undefined without looking at rows.
    NumericColumn,
    /// `|agent - content|` row by row
    Numeric,
    /// 0.0 when labels match, 1.0 otherwise
    Categorical,
}

/// An attribute that feeds `base_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedAttribute {
    pub name: &'static str,
    pub kind: DistanceKind,
}

impl TrackedAttribute {
    const fn new(name: &'static str, kind: DistanceKind) -> Self {
        Self { name, kind }
    }

    /// Name of this attribute's distance column.
    pub fn diff_column(&self) -> String {
        diff_column_name(self.name)
    }
}

/// Tracked attributes in output column order.
pub const TRACKED_ATTRIBUTES: [TrackedAttribute; 6] = [
    TrackedAttribute::new(TIERED_INCOME, DistanceKind::NumericColumn),
    TrackedAttribute::new("ethics", DistanceKind::Numeric),
    TrackedAttribute::new("politics", DistanceKind::Numeric),
    TrackedAttribute::new("age", DistanceKind::Numeric),
    TrackedAttribute::new("sex", DistanceKind::Numeric),
    TrackedAttribute::new(CULTURAL, DistanceKind::Categorical),
];

/// Positions in [`TRACKED_ATTRIBUTES`], in the order distances are summed
/// for the mean: tiered_income, ethics, politics, cultural, age, sex.
const MEAN_ORDER: [usize; 6] = [0, 1, 2, 5, 3, 4];

/// Returns `diff_<attribute>`.
pub fn diff_column_name(attribute: &str) -> String {
    format!("{}{}", DIFF_PREFIX, attribute)
}

/// Names of every column the scorer adds, in order.
pub fn output_column_names() -> Vec<String> {
    TRACKED_ATTRIBUTES
        .iter()
        .map(TrackedAttribute::diff_column)
        .chain(std::iter::once(BASE_SCORE.to_string()))
        .collect()
}

/// Errors for arguments that are not the right shape at all.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The agent table argument is not a table
    #[error("invalid agent table: {0}")]
    InvalidTable(#[from] TableError),
    /// The content argument is not a record
    #[error("content must be an object or null, got {0}")]
    InvalidContent(&'static str),
}

/// Absolute difference; NaN on either side gives NaN.
pub fn numeric_distance(agent: f64, content: f64) -> f64 {
    (agent - content).abs()
}

/// 0.0 for equal labels, 1.0 for different, NaN if either is missing.
pub fn categorical_distance(agent: Option<&str>, content: Option<&str>) -> f64 {
    match (agent, content) {
        (Some(a), Some(c)) if a == c => 0.0,
        (Some(_), Some(_)) => 1.0,
        _ => f64::NAN,
    }
}

/// Mean of the non-NaN values, NaN if there are none.
pub fn mean_available(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Scores agent tables against a content record.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer;

impl MatchScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores every row of `agents` against `content`.
    ///
    /// Returns a new table: the input columns unchanged, followed by the six
    /// `diff_*` columns and `base_score`. Row `i` of the output is row `i` of
    /// the input.
    pub fn score<C: AttributeSource + ?Sized>(&self, agents: &Table, content: &C) -> Table {
        let content = content.to_attributes();
        let rows = agents.num_rows();

        let diffs: [Vec<f64>; 6] = TRACKED_ATTRIBUTES
            .map(|attr| self.distance_column(&attr, agents, &content));

        let base_score: Vec<f64> = (0..rows)
            .map(|row| 1.0 - mean_available(MEAN_ORDER.iter().map(|&i| diffs[i][row])))
            .collect();

        let defined: Vec<&str> = TRACKED_ATTRIBUTES
            .iter()
            .zip(&diffs)
            .filter(|(_, d)| d.iter().any(|x| !x.is_nan()))
            .map(|(attr, _)| attr.name)
            .collect();
        if rows > 0 && defined.is_empty() {
            tracing::warn!(
                rows,
                "no tracked attribute could be compared; every base_score is undefined"
            );
        }
        tracing::debug!(rows, defined = ?defined, "scored agent table");

        let mut out = agents.clone();
        for (attr, diff) in TRACKED_ATTRIBUTES.iter().zip(diffs) {
            out.set_column(attr.diff_column(), Column::Scores(diff));
        }
        out.set_column(BASE_SCORE.to_string(), Column::Scores(base_score));
        out
    }

    /// Scores untyped JSON arguments.
    ///
    /// `agents` must be an array of records or an object of columns;
    /// `content` must be an object or `null`. Both are checked before any
    /// row is scored.
    pub fn score_json(&self, agents: &Value, content: &Value) -> Result<Table, ScoreError> {
        let table = Table::from_json(agents)?;
        let content = content_attributes(content)?;
        Ok(self.score(&table, &content))
    }

    fn distance_column(
        &self,
        attr: &TrackedAttribute,
        agents: &Table,
        content: &AttributeMap,
    ) -> Vec<f64> {
        let rows = agents.num_rows();
        let undefined = || vec![f64::NAN; rows];
        let Some(column) = agents.column(attr.name) else {
            return undefined();
        };

        match attr.kind {
            DistanceKind::NumericColumn => {
                let target = to_numeric_opt(content.get(attr.name));
                if target.is_nan() {
                    return undefined();
                }
                numeric_column(column)
                    .into_iter()
                    .map(|v| numeric_distance(v, target))
                    .collect()
            }
            DistanceKind::Numeric => {
                let target = to_numeric_opt(content.get(attr.name));
                (0..rows)
                    .map(|row| {
                        let cell = column.value_at(row).unwrap_or(Value::Null);
                        numeric_distance(to_numeric(&cell), target)
                    })
                    .collect()
            }
            DistanceKind::Categorical => {
                let target = normalize_label_opt(content.get(attr.name));
                label_column(column)
                    .iter()
                    .map(|label| categorical_distance(label.as_deref(), target.as_deref()))
                    .collect()
            }
        }
    }
}

/// Projects an untyped JSON content record. `null` is treated as empty
/// content; anything other than an object is rejected.
pub fn content_attributes(content: &Value) -> Result<AttributeMap, ScoreError> {
    match content {
        Value::Null => Ok(AttributeMap::new()),
        Value::Object(obj) => Ok(obj.to_attributes()),
        other => Err(ScoreError::InvalidContent(json_type_name(other))),
    }
}

/// Scores `agents` against `content` with a default [`MatchScorer`].
pub fn compute_base_match<C: AttributeSource + ?Sized>(agents: &Table, content: &C) -> Table {
    MatchScorer::new().score(agents, content)
}

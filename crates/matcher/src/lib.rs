//! Match scoring between an agent population and a piece of content.
//!
//! The scorer takes a column-oriented [`Table`] of agents and any record that
//! can project itself to an attribute map, and returns a new table with one
//! distance column per tracked attribute plus an aggregate `base_score`.
//!
//! ```text
//! agents (Table) ──┐
//!                  ├──▶ MatchScorer::score ──▶ Table + diff_* + base_score
//! content ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`table`]: Column-oriented tables and JSON conversion
//! - [`coerce`]: Cell coercion to numbers and labels
//! - [`scorer`]: Distance rules and aggregation
//! - [`summary`]: Counts and score range of a scored table
//! - [`config`]: Output and logging settings

pub mod coerce;
pub mod config;
pub mod scorer;
pub mod summary;
pub mod table;

// Re-export table types
pub use table::{json_type_name, Column, Table, TableError};

// Re-export scorer types
pub use scorer::{
    categorical_distance, compute_base_match, content_attributes, diff_column_name, mean_available,
    numeric_distance, output_column_names, DistanceKind, MatchScorer, ScoreError,
    TrackedAttribute, BASE_SCORE, CULTURAL, DIFF_PREFIX, TIERED_INCOME, TRACKED_ATTRIBUTES,
};

// Re-export summary types
pub use summary::ScoreSummary;

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, LoggingConfig, MatcherConfig, OutputConfig, OutputFormat,
};

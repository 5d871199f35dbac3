//! Agent and content value objects for the matching engine.
//!
//! This crate contains pure data structures with no scoring logic. Records
//! are validated once when built and are read-only afterwards; the scorer in
//! the `matcher` crate only ever sees them through [`AttributeSource`].

pub mod agent;
pub mod attributes;
pub mod content;
pub mod cultural;
pub mod validation;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use agent::{generate_id, Agent, AgentBuilder};
pub use attributes::{AttributeMap, AttributeSource};
pub use content::{Content, ContentBuilder};
pub use cultural::{Cultural, Tagged};
pub use validation::{round_economic_status, ValidationError};

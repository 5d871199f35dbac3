//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers from other
//! crates.
//!
//! ```ignore
//! // [dev-dependencies]
//! // profile-types = { path = "../profile-types", features = ["test-fixtures"] }
//!
//! use profile_types::fixtures;
//!
//! let agents = fixtures::sample_agents();
//! let content = fixtures::sample_content();
//! ```

use crate::{Agent, Content, Cultural};

/// Returns the sample population from the fixtures file.
///
/// Contains 5 agents spanning every cultural tag, ids `agent_01`..`agent_05`.
pub fn sample_agents() -> Vec<Agent> {
    let json = include_str!("../tests/fixtures/sample_agents.json");
    serde_json::from_str(json).expect("Failed to parse sample_agents.json")
}

/// Returns sample content aimed at a western, centrist, middle-aged audience.
pub fn sample_content() -> Content {
    let json = include_str!("../tests/fixtures/sample_content.json");
    serde_json::from_str(json).expect("Failed to parse sample_content.json")
}

/// Returns a specific agent by id from the sample population.
pub fn get_agent(agent_id: &str) -> Option<Agent> {
    sample_agents().into_iter().find(|a| a.id() == agent_id)
}

/// Content that only specifies a cultural target.
pub fn cultural_only_content(cultural: Cultural) -> Content {
    Content::builder()
        .with_id(format!("content_{}", cultural))
        .with_cultural(cultural)
        .build()
        .expect("cultural-only content is always valid")
}

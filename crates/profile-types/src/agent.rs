//! Agent Records
//!
//! A fully specified synthetic individual. Every field is validated once, at
//! construction, and the record is read-only afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::{AttributeMap, AttributeSource};
use crate::cultural::Cultural;
use crate::validation::{self, ValidationError, AGENT_SEX_VALUES};

/// Generates a fresh random identifier.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validated agent. Construct with [`Agent::builder`] or deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AgentBuilder")]
pub struct Agent {
    #[serde(rename = "agent_id")]
    id: String,
    education: u8,
    economic_status: f64,
    ethics: f64,
    politics: i8,
    cultural: Cultural,
    age: u8,
    sex: u8,
    novelty: f64,
    conscientiousness: f64,
    impulsivity: f64,
    tech_affinity: f64,
    social_trust: f64,
}

impl Agent {
    /// Starts a builder populated with the default attribute values.
    pub fn builder() -> AgentBuilder {
        AgentBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn education(&self) -> u8 {
        self.education
    }

    /// Income, always a multiple of 5000.
    pub fn economic_status(&self) -> f64 {
        self.economic_status
    }

    pub fn ethics(&self) -> f64 {
        self.ethics
    }

    pub fn politics(&self) -> i8 {
        self.politics
    }

    pub fn cultural(&self) -> Cultural {
        self.cultural
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn sex(&self) -> u8 {
        self.sex
    }

    pub fn novelty(&self) -> f64 {
        self.novelty
    }

    pub fn conscientiousness(&self) -> f64 {
        self.conscientiousness
    }

    pub fn impulsivity(&self) -> f64 {
        self.impulsivity
    }

    pub fn tech_affinity(&self) -> f64 {
        self.tech_affinity
    }

    pub fn social_trust(&self) -> f64 {
        self.social_trust
    }
}

impl AttributeSource for Agent {
    fn to_attributes(&self) -> AttributeMap {
        AttributeMap::new()
            .with("agent_id", self.id.as_str())
            .with("education", self.education)
            .with("economic_status", self.economic_status)
            .with("ethics", self.ethics)
            .with("politics", self.politics)
            .with_tagged("cultural", Some(&self.cultural))
            .with("age", self.age)
            .with("sex", self.sex)
            .with("novelty", self.novelty)
            .with("conscientiousness", self.conscientiousness)
            .with("impulsivity", self.impulsivity)
            .with("tech_affinity", self.tech_affinity)
            .with("social_trust", self.social_trust)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agent(id={}, education={}, economic_status={}, ethics={}, politics={}, \
             cultural={}, age={}, sex={})",
            self.id,
            self.education,
            self.economic_status,
            self.ethics,
            self.politics,
            self.cultural,
            self.age,
            self.sex
        )
    }
}

/// Unvalidated agent fields.
///
/// Also the deserialization shape of [`Agent`]: any field left out of the
/// JSON takes its default, and the whole record is validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentBuilder {
    #[serde(rename = "agent_id")]
    pub id: Option<String>,
    pub education: u8,
    pub economic_status: f64,
    pub ethics: f64,
    pub politics: i8,
    pub cultural: Cultural,
    pub age: u8,
    pub sex: u8,
    pub novelty: f64,
    pub conscientiousness: f64,
    pub impulsivity: f64,
    pub tech_affinity: f64,
    pub social_trust: f64,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self {
            id: None,
            education: 1,
            economic_status: validation::ECONOMIC_STATUS_MIN,
            ethics: 0.5,
            politics: 0,
            cultural: Cultural::Western,
            age: 30,
            sex: 0,
            novelty: 0.5,
            conscientiousness: 0.5,
            impulsivity: 0.5,
            tech_affinity: 0.5,
            social_trust: 0.5,
        }
    }
}

impl AgentBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_education(mut self, education: u8) -> Self {
        self.education = education;
        self
    }

    pub fn with_economic_status(mut self, economic_status: f64) -> Self {
        self.economic_status = economic_status;
        self
    }

    pub fn with_ethics(mut self, ethics: f64) -> Self {
        self.ethics = ethics;
        self
    }

    pub fn with_politics(mut self, politics: i8) -> Self {
        self.politics = politics;
        self
    }

    pub fn with_cultural(mut self, cultural: Cultural) -> Self {
        self.cultural = cultural;
        self
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = age;
        self
    }

    pub fn with_sex(mut self, sex: u8) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_novelty(mut self, novelty: f64) -> Self {
        self.novelty = novelty;
        self
    }

    pub fn with_conscientiousness(mut self, conscientiousness: f64) -> Self {
        self.conscientiousness = conscientiousness;
        self
    }

    pub fn with_impulsivity(mut self, impulsivity: f64) -> Self {
        self.impulsivity = impulsivity;
        self
    }

    pub fn with_tech_affinity(mut self, tech_affinity: f64) -> Self {
        self.tech_affinity = tech_affinity;
        self
    }

    pub fn with_social_trust(mut self, social_trust: f64) -> Self {
        self.social_trust = social_trust;
        self
    }

    /// Validates every field in declaration order and builds the agent.
    ///
    /// Fails on the first out-of-bounds field; nothing is constructed in that
    /// case.
    pub fn build(self) -> Result<Agent, ValidationError> {
        let education = validation::check_education(self.education)?;
        let economic_status = validation::round_economic_status(self.economic_status)?;
        let ethics = validation::check_unit("ethics", self.ethics)?;
        let politics = validation::check_politics(self.politics)?;
        let age = validation::check_age(self.age)?;
        let sex = validation::check_sex(self.sex, &AGENT_SEX_VALUES, "0, 1 or 2")?;
        let novelty = validation::check_unit("novelty", self.novelty)?;
        let conscientiousness = validation::check_unit("conscientiousness", self.conscientiousness)?;
        let impulsivity = validation::check_unit("impulsivity", self.impulsivity)?;
        let tech_affinity = validation::check_unit("tech_affinity", self.tech_affinity)?;
        let social_trust = validation::check_unit("social_trust", self.social_trust)?;

        Ok(Agent {
            id: self.id.unwrap_or_else(generate_id),
            education,
            economic_status,
            ethics,
            politics,
            cultural: self.cultural,
            age,
            sex,
            novelty,
            conscientiousness,
            impulsivity,
            tech_affinity,
            social_trust,
        })
    }
}

impl TryFrom<AgentBuilder> for Agent {
    type Error = ValidationError;

    fn try_from(builder: AgentBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

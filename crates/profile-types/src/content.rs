//! Content Records
//!
//! Same attribute shape as an agent, but every field may be absent. Absence is
//! `None` and is never collapsed into a number.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::agent::generate_id;
use crate::attributes::{AttributeMap, AttributeSource};
use crate::cultural::Cultural;
use crate::validation::{self, ValidationError, CONTENT_SEX_VALUES};

/// Validated content record. Construct with [`Content::builder`] or
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContentBuilder")]
pub struct Content {
    #[serde(rename = "content_id")]
    id: String,
    education: Option<u8>,
    economic_status: Option<f64>,
    ethics: Option<f64>,
    politics: Option<i8>,
    cultural: Option<Cultural>,
    age: Option<u8>,
    sex: Option<u8>,
    novelty: Option<f64>,
    conscientiousness: Option<f64>,
    impulsivity: Option<f64>,
    tech_affinity: Option<f64>,
    social_trust: Option<f64>,
}

impl Content {
    pub fn builder() -> ContentBuilder {
        ContentBuilder::default()
    }

    /// Content with a fresh id and every attribute absent.
    pub fn empty() -> Self {
        Self {
            id: generate_id(),
            education: None,
            economic_status: None,
            ethics: None,
            politics: None,
            cultural: None,
            age: None,
            sex: None,
            novelty: None,
            conscientiousness: None,
            impulsivity: None,
            tech_affinity: None,
            social_trust: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn education(&self) -> Option<u8> {
        self.education
    }

    pub fn economic_status(&self) -> Option<f64> {
        self.economic_status
    }

    pub fn ethics(&self) -> Option<f64> {
        self.ethics
    }

    pub fn politics(&self) -> Option<i8> {
        self.politics
    }

    pub fn cultural(&self) -> Option<Cultural> {
        self.cultural
    }

    pub fn age(&self) -> Option<u8> {
        self.age
    }

    pub fn sex(&self) -> Option<u8> {
        self.sex
    }

    pub fn novelty(&self) -> Option<f64> {
        self.novelty
    }

    pub fn conscientiousness(&self) -> Option<f64> {
        self.conscientiousness
    }

    pub fn impulsivity(&self) -> Option<f64> {
        self.impulsivity
    }

    pub fn tech_affinity(&self) -> Option<f64> {
        self.tech_affinity
    }

    pub fn social_trust(&self) -> Option<f64> {
        self.social_trust
    }
}

/// Absent fields project to `null`.
impl AttributeSource for Content {
    fn to_attributes(&self) -> AttributeMap {
        AttributeMap::new()
            .with("content_id", self.id.as_str())
            .with("education", self.education)
            .with("economic_status", self.economic_status)
            .with("ethics", self.ethics)
            .with("politics", self.politics)
            .with_tagged("cultural", self.cultural.as_ref())
            .with("age", self.age)
            .with("sex", self.sex)
            .with("novelty", self.novelty)
            .with("conscientiousness", self.conscientiousness)
            .with("impulsivity", self.impulsivity)
            .with("tech_affinity", self.tech_affinity)
            .with("social_trust", self.social_trust)
    }
}

/// Formats an optional field, printing `none` when absent.
struct Opt<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Content(id={}, education={}, economic_status={}, ethics={}, politics={}, \
             cultural={}, age={}, sex={})",
            self.id,
            Opt(&self.education),
            Opt(&self.economic_status),
            Opt(&self.ethics),
            Opt(&self.politics),
            Opt(&self.cultural),
            Opt(&self.age),
            Opt(&self.sex)
        )
    }
}

/// Unvalidated content fields; every field defaults to absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBuilder {
    #[serde(rename = "content_id")]
    pub id: Option<String>,
    pub education: Option<u8>,
    pub economic_status: Option<f64>,
    pub ethics: Option<f64>,
    pub politics: Option<i8>,
    pub cultural: Option<Cultural>,
    pub age: Option<u8>,
    pub sex: Option<u8>,
    pub novelty: Option<f64>,
    pub conscientiousness: Option<f64>,
    pub impulsivity: Option<f64>,
    pub tech_affinity: Option<f64>,
    pub social_trust: Option<f64>,
}

impl ContentBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_education(mut self, education: u8) -> Self {
        self.education = Some(education);
        self
    }

    pub fn with_economic_status(mut self, economic_status: f64) -> Self {
        self.economic_status = Some(economic_status);
        self
    }

    pub fn with_ethics(mut self, ethics: f64) -> Self {
        self.ethics = Some(ethics);
        self
    }

    pub fn with_politics(mut self, politics: i8) -> Self {
        self.politics = Some(politics);
        self
    }

    pub fn with_cultural(mut self, cultural: Cultural) -> Self {
        self.cultural = Some(cultural);
        self
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_sex(mut self, sex: u8) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_novelty(mut self, novelty: f64) -> Self {
        self.novelty = Some(novelty);
        self
    }

    pub fn with_conscientiousness(mut self, conscientiousness: f64) -> Self {
        self.conscientiousness = Some(conscientiousness);
        self
    }

    pub fn with_impulsivity(mut self, impulsivity: f64) -> Self {
        self.impulsivity = Some(impulsivity);
        self
    }

    pub fn with_tech_affinity(mut self, tech_affinity: f64) -> Self {
        self.tech_affinity = Some(tech_affinity);
        self
    }

    pub fn with_social_trust(mut self, social_trust: f64) -> Self {
        self.social_trust = Some(social_trust);
        self
    }

    /// Validates the present fields with the same rules as an agent, except
    /// that `sex` is limited to 0 or 1.
    pub fn build(self) -> Result<Content, ValidationError> {
        let unit = |field: &'static str, value: Option<f64>| {
            value.map(|v| validation::check_unit(field, v)).transpose()
        };

        let education = self.education.map(validation::check_education).transpose()?;
        let economic_status = self
            .economic_status
            .map(validation::round_economic_status)
            .transpose()?;
        let ethics = unit("ethics", self.ethics)?;
        let politics = self.politics.map(validation::check_politics).transpose()?;
        let age = self.age.map(validation::check_age).transpose()?;
        let sex = self
            .sex
            .map(|s| validation::check_sex(s, &CONTENT_SEX_VALUES, "0 or 1"))
            .transpose()?;
        let novelty = unit("novelty", self.novelty)?;
        let conscientiousness = unit("conscientiousness", self.conscientiousness)?;
        let impulsivity = unit("impulsivity", self.impulsivity)?;
        let tech_affinity = unit("tech_affinity", self.tech_affinity)?;
        let social_trust = unit("social_trust", self.social_trust)?;

        Ok(Content {
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

impl TryFrom<ContentBuilder> for Content {
    type Error = ValidationError;

    fn try_from(builder: ContentBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

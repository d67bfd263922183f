//! Builder session state.
//!
//! The multi-step builder is modeled as an explicit, serializable state
//! object so an interrupted session can be persisted and resumed, and so the
//! server can re-validate the accumulated draft at commit time. The
//! lifecycle logic (advancing, validation, slug seeding) lives in
//! `folionest-core`; this module only defines the data shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::portfolio::{PortfolioData, PortfolioId, SeoMeta, TemplateId};
use crate::user::UserId;

/// Ordered steps of the builder flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderStep {
    Template,
    Personal,
    Experience,
    Projects,
    Skills,
    Socials,
    Theme,
    Publish,
}

impl BuilderStep {
    /// All steps in flow order.
    pub const ALL: [BuilderStep; 8] = [
        BuilderStep::Template,
        BuilderStep::Personal,
        BuilderStep::Experience,
        BuilderStep::Projects,
        BuilderStep::Skills,
        BuilderStep::Socials,
        BuilderStep::Theme,
        BuilderStep::Publish,
    ];

    /// Zero-based position in the flow.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    /// The step after this one, or `None` on the last step.
    pub fn next(&self) -> Option<BuilderStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The step before this one, or `None` on the first step.
    pub fn previous(&self) -> Option<BuilderStep> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

impl fmt::Display for BuilderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuilderStep::Template => "template",
            BuilderStep::Personal => "personal",
            BuilderStep::Experience => "experience",
            BuilderStep::Projects => "projects",
            BuilderStep::Skills => "skills",
            BuilderStep::Socials => "socials",
            BuilderStep::Theme => "theme",
            BuilderStep::Publish => "publish",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BuilderStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "template" => Ok(BuilderStep::Template),
            "personal" => Ok(BuilderStep::Personal),
            "experience" => Ok(BuilderStep::Experience),
            "projects" => Ok(BuilderStep::Projects),
            "skills" => Ok(BuilderStep::Skills),
            "socials" => Ok(BuilderStep::Socials),
            "theme" => Ok(BuilderStep::Theme),
            "publish" => Ok(BuilderStep::Publish),
            other => Err(format!("invalid builder step: '{other}'")),
        }
    }
}

impl Default for BuilderStep {
    fn default() -> Self {
        BuilderStep::Template
    }
}

/// Per-step validation outcome, recorded when a step is validated on
/// advance or at commit time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepValidity {
    pub template: bool,
    pub personal: bool,
    pub experience: bool,
    pub projects: bool,
    pub skills: bool,
    pub socials: bool,
    pub theme: bool,
    pub publish: bool,
}

impl StepValidity {
    pub fn get(&self, step: BuilderStep) -> bool {
        match step {
            BuilderStep::Template => self.template,
            BuilderStep::Personal => self.personal,
            BuilderStep::Experience => self.experience,
            BuilderStep::Projects => self.projects,
            BuilderStep::Skills => self.skills,
            BuilderStep::Socials => self.socials,
            BuilderStep::Theme => self.theme,
            BuilderStep::Publish => self.publish,
        }
    }

    pub fn set(&mut self, step: BuilderStep, valid: bool) {
        match step {
            BuilderStep::Template => self.template = valid,
            BuilderStep::Personal => self.personal = valid,
            BuilderStep::Experience => self.experience = valid,
            BuilderStep::Projects => self.projects = valid,
            BuilderStep::Skills => self.skills = valid,
            BuilderStep::Socials => self.socials = valid,
            BuilderStep::Theme => self.theme = valid,
            BuilderStep::Publish => self.publish = valid,
        }
    }
}

/// Serializable state of one builder session.
///
/// Single-writer, sequential, in-process; persisted between interactions
/// through the builder draft store for resumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderSession {
    pub session_id: Uuid,
    pub owner_id: UserId,
    /// Set when the session edits an existing aggregate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<PortfolioId>,
    pub step: BuilderStep,
    pub template: TemplateId,
    pub data: PortfolioData,
    /// Desired public address. Seeded once from the personal name.
    #[serde(default)]
    pub slug: String,
    /// One-shot marker: the slug default has been applied and later name
    /// edits must not overwrite it.
    #[serde(default)]
    pub slug_seeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMeta>,
    /// Publish immediately on commit, or keep as draft.
    #[serde(default)]
    pub publish: bool,
    #[serde(default)]
    pub validity: StepValidity,
}

/// The complete draft a committed builder session hands to the publish
/// service. The session itself never persists portfolios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioDraft {
    /// Present on the edit flow; absent when creating.
    pub portfolio_id: Option<PortfolioId>,
    pub template: TemplateId,
    pub slug: String,
    pub data: PortfolioData,
    /// Explicit SEO override; derived from the personal block when absent.
    pub seo: Option<SeoMeta>,
    pub publish: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(BuilderStep::Template.index(), 0);
        assert_eq!(BuilderStep::Publish.index(), 7);
        assert_eq!(BuilderStep::Template.next(), Some(BuilderStep::Personal));
        assert_eq!(BuilderStep::Publish.next(), None);
        assert_eq!(BuilderStep::Template.previous(), None);
        assert_eq!(BuilderStep::Publish.previous(), Some(BuilderStep::Theme));
    }

    #[test]
    fn test_step_roundtrip() {
        for step in BuilderStep::ALL {
            let parsed: BuilderStep = step.to_string().parse().unwrap();
            assert_eq!(step, parsed);
        }
    }

    #[test]
    fn test_validity_get_set() {
        let mut validity = StepValidity::default();
        for step in BuilderStep::ALL {
            assert!(!validity.get(step));
            validity.set(step, true);
            assert!(validity.get(step));
        }
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = BuilderSession {
            session_id: Uuid::now_v7(),
            owner_id: UserId::new(),
            portfolio_id: None,
            step: BuilderStep::Projects,
            template: TemplateId::default(),
            data: PortfolioData::default(),
            slug: "jane-doe".to_string(),
            slug_seeded: true,
            seo: None,
            publish: false,
            validity: StepValidity::default(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: BuilderSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.session_id, session.session_id);
        assert_eq!(back.step, BuilderStep::Projects);
        assert!(back.slug_seeded);
    }
}

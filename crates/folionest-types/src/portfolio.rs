use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a portfolio, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortfolioId(pub Uuid);

impl PortfolioId {
    /// Create a new PortfolioId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a PortfolioId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PortfolioId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PortfolioId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a rendering template.
///
/// Stored as an opaque string on the aggregate; the closed set of known
/// variants lives in the template dispatcher, which maps unknown ids to a
/// placeholder page instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self("aurora".to_string())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Portfolio lifecycle states.
///
/// - Draft: owner-visible only, not publicly resolvable
/// - Published: resolvable under its slug, view counting active
///
/// Transitions go `draft <-> published` only; deletion is a separate,
/// irreversible operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioStatus {
    Draft,
    Published,
}

impl fmt::Display for PortfolioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioStatus::Draft => write!(f, "draft"),
            PortfolioStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for PortfolioStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PortfolioStatus::Draft),
            "published" => Ok(PortfolioStatus::Published),
            other => Err(format!("invalid portfolio status: '{other}'")),
        }
    }
}

impl Default for PortfolioStatus {
    fn default() -> Self {
        PortfolioStatus::Draft
    }
}

/// Identity block shown on every page of a portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Display name.
    pub name: String,
    /// Short professional headline ("Backend Engineer").
    pub headline: String,
    /// Short bio (1-2 sentences for the home page).
    pub bio: String,
    /// Extended bio for the about page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Asset reference string for the profile photo. Binary content is
    /// handled by the asset store; the aggregate only carries the reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// A single work-history entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    /// Freeform period label ("2021 - 2023", "Summer 2020").
    pub period: String,
    pub summary: String,
}

/// A showcased project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub summary: String,
    /// Technology tags; at least one is required by the builder.
    pub technologies: Vec<String>,
    /// Asset reference strings.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A skill with freeform category grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    /// Freeform category ("Languages", "Tooling").
    pub category: String,
    /// Optional 0-100 proficiency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<u8>,
}

/// Contact and social links. Email is the only required field; the rest
/// are validated as well-formed URLs by the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Theme selection for the rendered site.
///
/// `dark_mode` may be true only when the owner's entitlement grants it;
/// the publish service enforces this regardless of what the builder let
/// through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Hex color, either from the curated palette or custom.
    pub primary_color: String,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#6366f1".to_string(),
            dark_mode: false,
        }
    }
}

/// The full content of a portfolio: everything the builder collects and
/// the templates render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub socials: SocialLinks,
    #[serde(default)]
    pub theme: ThemeSettings,
}

/// Search-engine metadata, derived from the personal block when the owner
/// does not override it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
}

/// A portfolio in the Folionest platform.
///
/// The persisted aggregate. Only the publish service writes it; the public
/// resolver mutates nothing but the view counter (through the gateway's
/// atomic increment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: PortfolioId,
    pub owner_id: UserId,
    pub template: TemplateId,
    /// URL-safe unique path segment ("jane-doe"). Unique among published
    /// aggregates only; drafts may share a slug until publish time.
    pub slug: String,
    pub status: PortfolioStatus,
    pub data: PortfolioData,
    pub seo: SeoMeta,
    /// Monotonic non-negative public view counter.
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last time the aggregate transitioned to published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Generate a URL-safe slug from a display name.
///
/// Rules:
/// - Lowercase
/// - Replace runs of non-alphanumeric characters with a single hyphen
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use folionest_types::portfolio::slugify;
///
/// assert_eq!(slugify("Jane Doe"), "jane-doe");
/// assert_eq!(slugify("  Ada // Lovelace!  "), "ada-lovelace");
/// assert_eq!(slugify("---portfolio---2024---"), "portfolio-2024");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

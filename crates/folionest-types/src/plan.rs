//! Plan tiers and resolved entitlement limits.
//!
//! `Limit` is an explicit bounded-or-unlimited sentinel. It deliberately is
//! NOT a large integer: arithmetic never touches the unlimited marker, and
//! serde round-trips it as the string `"unlimited"` or a plain number.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

/// Bounded-or-unlimited capacity for one plan dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    Bounded(u32),
}

impl Limit {
    /// Whether `current` items already exist leaves room for one more.
    pub fn allows_another(&self, current: usize) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Bounded(max) => current < *max as usize,
        }
    }

    /// Whether a total of `count` items fits within the limit.
    pub fn allows_total(&self, count: usize) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Bounded(max) => count <= *max as usize,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unlimited => write!(f, "unlimited"),
            Limit::Bounded(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Unlimited => serializer.serialize_str("unlimited"),
            Limit::Bounded(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(Limit::Bounded(n)),
            Raw::Marker(s) if s == "unlimited" => Ok(Limit::Unlimited),
            Raw::Marker(s) => Err(D::Error::custom(format!(
                "invalid limit '{s}': expected a number or \"unlimited\""
            ))),
        }
    }
}

/// Which rendering templates a plan may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateAccess {
    All,
    Restricted(Vec<String>),
}

impl TemplateAccess {
    pub fn allows(&self, template_id: &str) -> bool {
        match self {
            TemplateAccess::All => true,
            TemplateAccess::Restricted(ids) => ids.iter().any(|id| id == template_id),
        }
    }
}

impl Serialize for TemplateAccess {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TemplateAccess::All => serializer.serialize_str("all"),
            TemplateAccess::Restricted(ids) => ids.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TemplateAccess {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Marker(String),
            Set(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Marker(s) if s == "all" => Ok(TemplateAccess::All),
            Raw::Marker(s) => Err(D::Error::custom(format!(
                "invalid template access '{s}': expected \"all\" or a list of template ids"
            ))),
            Raw::Set(ids) => Ok(TemplateAccess::Restricted(ids)),
        }
    }
}

/// Subscription plan tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
        }
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            other => Err(format!("invalid plan: '{other}'")),
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::Free
    }
}

/// Platform-wide pricing mode.
///
/// `Free` disables all gating: every user (including anonymous visitors)
/// resolves to unlimited entitlements. `Freemium` applies the per-plan
/// limits table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    Free,
    Freemium,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Free => write!(f, "free"),
            PricingMode::Freemium => write!(f, "freemium"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PricingMode::Free),
            "freemium" => Ok(PricingMode::Freemium),
            other => Err(format!("invalid pricing mode: '{other}'")),
        }
    }
}

impl Default for PricingMode {
    fn default() -> Self {
        PricingMode::Freemium
    }
}

/// The resolved capability set available to a user at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub portfolios: Limit,
    pub projects: Limit,
    pub images: Limit,
    pub dark_mode: bool,
    pub templates: TemplateAccess,
    /// Rendered pages carry the platform watermark footer.
    pub watermark: bool,
    pub analytics: bool,
}

impl PlanLimits {
    /// The everything-granted limit set used when the platform runs in
    /// free pricing mode.
    pub fn unlimited() -> Self {
        Self {
            portfolios: Limit::Unlimited,
            projects: Limit::Unlimited,
            images: Limit::Unlimited,
            dark_mode: true,
            templates: TemplateAccess::All,
            watermark: false,
            analytics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_allows_another() {
        assert!(Limit::Unlimited.allows_another(usize::MAX));
        assert!(Limit::Bounded(3).allows_another(2));
        assert!(!Limit::Bounded(3).allows_another(3));
        assert!(!Limit::Bounded(0).allows_another(0));
    }

    #[test]
    fn test_limit_allows_total() {
        assert!(Limit::Bounded(3).allows_total(3));
        assert!(!Limit::Bounded(3).allows_total(4));
        assert!(Limit::Unlimited.allows_total(1_000_000));
    }

    #[test]
    fn test_limit_serde_number() {
        let json = serde_json::to_string(&Limit::Bounded(5)).unwrap();
        assert_eq!(json, "5");
        let back: Limit = serde_json::from_str("5").unwrap();
        assert_eq!(back, Limit::Bounded(5));
    }

    #[test]
    fn test_limit_serde_unlimited() {
        let json = serde_json::to_string(&Limit::Unlimited).unwrap();
        assert_eq!(json, "\"unlimited\"");
        let back: Limit = serde_json::from_str("\"unlimited\"").unwrap();
        assert_eq!(back, Limit::Unlimited);
    }

    #[test]
    fn test_limit_serde_rejects_garbage() {
        assert!(serde_json::from_str::<Limit>("\"lots\"").is_err());
        assert!(serde_json::from_str::<Limit>("-1").is_err());
    }

    #[test]
    fn test_template_access_allows() {
        assert!(TemplateAccess::All.allows("slate"));
        let restricted = TemplateAccess::Restricted(vec!["aurora".to_string()]);
        assert!(restricted.allows("aurora"));
        assert!(!restricted.allows("slate"));
    }

    #[test]
    fn test_template_access_serde() {
        let json = serde_json::to_string(&TemplateAccess::All).unwrap();
        assert_eq!(json, "\"all\"");

        let restricted = TemplateAccess::Restricted(vec!["aurora".to_string()]);
        let json = serde_json::to_string(&restricted).unwrap();
        assert_eq!(json, "[\"aurora\"]");
        let back: TemplateAccess = serde_json::from_str(&json).unwrap();
        assert_eq!(back, restricted);
    }

    #[test]
    fn test_plan_roundtrip() {
        for plan in [Plan::Free, Plan::Pro] {
            let parsed: Plan = plan.to_string().parse().unwrap();
            assert_eq!(plan, parsed);
        }
    }

    #[test]
    fn test_pricing_mode_roundtrip() {
        for mode in [PricingMode::Free, PricingMode::Freemium] {
            let parsed: PricingMode = mode.to_string().parse().unwrap();
            assert_eq!(mode, parsed);
        }
    }

    #[test]
    fn test_unlimited_limits() {
        let limits = PlanLimits::unlimited();
        assert!(limits.portfolios.is_unlimited());
        assert!(limits.projects.is_unlimited());
        assert!(limits.images.is_unlimited());
        assert!(limits.dark_mode);
        assert!(!limits.watermark);
        assert!(limits.analytics);
        assert!(limits.templates.allows("anything"));
    }
}

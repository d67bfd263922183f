//! Platform-wide settings.
//!
//! `AppSettings` controls the pricing mode and the per-plan limits table.
//! It is loaded through the persistence gateway and passed by value into
//! the feature resolver -- never held as a module-level global. Refreshing
//! a cached copy is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::plan::{Limit, PlanLimits, PricingMode, TemplateAccess};

/// Per-plan limits table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTable {
    #[serde(default = "default_free_limits")]
    pub free: PlanLimits,
    #[serde(default = "default_pro_limits")]
    pub pro: PlanLimits,
}

impl Default for PlanTable {
    fn default() -> Self {
        Self {
            free: default_free_limits(),
            pro: default_pro_limits(),
        }
    }
}

/// Top-level platform settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub pricing_mode: PricingMode,
    #[serde(default)]
    pub limits: PlanTable,
}

fn default_free_limits() -> PlanLimits {
    PlanLimits {
        portfolios: Limit::Bounded(1),
        projects: Limit::Bounded(3),
        images: Limit::Bounded(5),
        dark_mode: false,
        templates: TemplateAccess::Restricted(vec!["aurora".to_string()]),
        watermark: true,
        analytics: false,
    }
}

fn default_pro_limits() -> PlanLimits {
    PlanLimits {
        portfolios: Limit::Unlimited,
        projects: Limit::Unlimited,
        images: Limit::Unlimited,
        dark_mode: true,
        templates: TemplateAccess::All,
        watermark: false,
        analytics: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let settings = AppSettings::default();
        assert_eq!(settings.pricing_mode, PricingMode::Freemium);
        assert_eq!(settings.limits.free.portfolios, Limit::Bounded(1));
        assert_eq!(settings.limits.free.projects, Limit::Bounded(3));
        assert!(settings.limits.free.watermark);
        assert!(!settings.limits.free.dark_mode);
        assert!(settings.limits.pro.portfolios.is_unlimited());
        assert!(settings.limits.pro.dark_mode);
        assert!(!settings.limits.pro.watermark);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_toml_with_values() {
        let toml_str = r#"
pricing_mode = "free"

[limits.free]
portfolios = 2
projects = 5
images = "unlimited"
dark_mode = true
templates = ["aurora", "slate"]
watermark = false
analytics = false
"#;
        let settings: AppSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.pricing_mode, PricingMode::Free);
        assert_eq!(settings.limits.free.portfolios, Limit::Bounded(2));
        assert_eq!(settings.limits.free.images, Limit::Unlimited);
        assert!(settings.limits.free.templates.allows("slate"));
        // Absent pro table falls back to defaults
        assert!(settings.limits.pro.portfolios.is_unlimited());
    }

    #[test]
    fn test_serde_roundtrip() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}

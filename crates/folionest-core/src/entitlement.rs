//! Entitlement resolution.
//!
//! Computes the effective plan limits for a user/settings pair. Pure: no
//! side effects, no I/O, never fails. Settings are injected by the caller;
//! repeated calls are cheap, so callers may memoize for performance but
//! never need to for correctness.

use folionest_types::plan::{Limit, PlanLimits, Plan, PricingMode, TemplateAccess};
use folionest_types::settings::AppSettings;
use folionest_types::user::User;

/// Resolve the effective limits for `user` under `settings`.
///
/// Precedence, top rule wins:
/// 1. Platform pricing mode `free`: unbounded everything, for anyone.
/// 2. No authenticated user: the free-plan table entry.
/// 3. Pro plan: the pro table entry.
/// 4. Grandfathered user: limits assembled from the bespoke override.
/// 5. Everyone else: the free table entry.
pub fn resolve(settings: &AppSettings, user: Option<&User>) -> PlanLimits {
    if settings.pricing_mode == PricingMode::Free {
        return PlanLimits::unlimited();
    }

    let Some(user) = user else {
        return settings.limits.free.clone();
    };

    if user.plan == Plan::Pro {
        return settings.limits.pro.clone();
    }

    if user.grandfathered {
        if let Some(features) = &user.grandfathered_features {
            return PlanLimits {
                portfolios: Limit::Bounded(features.portfolios),
                projects: Limit::Unlimited,
                images: Limit::Unlimited,
                dark_mode: features.dark_mode,
                templates: TemplateAccess::All,
                watermark: features.watermark,
                analytics: false,
            };
        }
    }

    settings.limits.free.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use folionest_types::user::{GrandfatheredFeatures, UserId};

    fn make_user(plan: Plan) -> User {
        User {
            id: UserId::new(),
            email: "jane@example.com".to_string(),
            display_name: "Jane".to_string(),
            plan,
            grandfathered: false,
            grandfathered_features: None,
            api_key_hash: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn freemium_settings() -> AppSettings {
        AppSettings {
            pricing_mode: PricingMode::Freemium,
            ..AppSettings::default()
        }
    }

    #[test]
    fn test_free_pricing_mode_unbounds_everyone() {
        let settings = AppSettings {
            pricing_mode: PricingMode::Free,
            ..AppSettings::default()
        };

        // Even an anonymous visitor gets unlimited limits.
        assert_eq!(resolve(&settings, None), PlanLimits::unlimited());
        // A free-plan user too -- the global mode wins over the plan.
        let user = make_user(Plan::Free);
        assert_eq!(resolve(&settings, Some(&user)), PlanLimits::unlimited());
        let user = make_user(Plan::Pro);
        assert_eq!(resolve(&settings, Some(&user)), PlanLimits::unlimited());
    }

    #[test]
    fn test_anonymous_gets_free_table() {
        let settings = freemium_settings();
        assert_eq!(resolve(&settings, None), settings.limits.free);
    }

    #[test]
    fn test_pro_plan_gets_pro_table() {
        let settings = freemium_settings();
        let user = make_user(Plan::Pro);
        assert_eq!(resolve(&settings, Some(&user)), settings.limits.pro);
    }

    #[test]
    fn test_pro_wins_over_grandfathered() {
        let settings = freemium_settings();
        let mut user = make_user(Plan::Pro);
        user.grandfathered = true;
        user.grandfathered_features = Some(GrandfatheredFeatures {
            portfolios: 2,
            dark_mode: false,
            watermark: true,
        });
        assert_eq!(resolve(&settings, Some(&user)), settings.limits.pro);
    }

    #[test]
    fn test_grandfathered_override_assembly() {
        let settings = freemium_settings();
        let mut user = make_user(Plan::Free);
        user.grandfathered = true;
        user.grandfathered_features = Some(GrandfatheredFeatures {
            portfolios: 3,
            dark_mode: true,
            watermark: false,
        });

        let limits = resolve(&settings, Some(&user));
        assert_eq!(limits.portfolios, Limit::Bounded(3));
        assert_eq!(limits.projects, Limit::Unlimited);
        assert_eq!(limits.images, Limit::Unlimited);
        assert!(limits.dark_mode);
        assert!(!limits.watermark);
        assert_eq!(limits.templates, TemplateAccess::All);
        assert!(!limits.analytics);
    }

    #[test]
    fn test_grandfathered_without_override_falls_back_to_free() {
        let settings = freemium_settings();
        let mut user = make_user(Plan::Free);
        user.grandfathered = true;

        assert_eq!(resolve(&settings, Some(&user)), settings.limits.free);
    }

    #[test]
    fn test_free_plan_gets_free_table() {
        let settings = freemium_settings();
        let user = make_user(Plan::Free);
        assert_eq!(resolve(&settings, Some(&user)), settings.limits.free);
    }
}

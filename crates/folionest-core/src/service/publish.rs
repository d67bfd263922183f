//! Publish service.
//!
//! The only writer of portfolio aggregates. Enforces plan quotas, published
//! slug uniqueness, and per-entity limits; re-runs the builder's step
//! validation so a hand-crafted draft can never bypass gating the builder
//! applied client-side.

use chrono::Utc;

use folionest_types::builder::PortfolioDraft;
use folionest_types::error::{PortfolioError, RepositoryError};
use folionest_types::plan::{Limit, PlanLimits};
use folionest_types::portfolio::{
    Portfolio, PortfolioData, PortfolioId, PortfolioStatus, SeoMeta, slugify,
};
use folionest_types::settings::AppSettings;
use folionest_types::user::User;

use crate::builder::rules;
use crate::entitlement;
use crate::repository::portfolio::{PortfolioFilter, PortfolioRepository};
use crate::repository::settings::SettingsRepository;

/// Longest description carried into derived SEO metadata.
const SEO_DESCRIPTION_MAX: usize = 160;

/// Service orchestrating the portfolio lifecycle.
///
/// Generic over the repository traits to maintain clean architecture --
/// folionest-core never depends on folionest-infra.
pub struct PublishService<P: PortfolioRepository, S: SettingsRepository> {
    portfolios: P,
    settings: S,
}

impl<P: PortfolioRepository, S: SettingsRepository> PublishService<P, S> {
    pub fn new(portfolios: P, settings: S) -> Self {
        Self { portfolios, settings }
    }

    /// Load the current settings document, falling back to the default
    /// table when none has been written yet.
    pub async fn load_settings(&self) -> Result<AppSettings, PortfolioError> {
        Ok(self
            .settings
            .get()
            .await
            .map_err(gateway_failure)?
            .unwrap_or_default())
    }

    /// Resolve the caller's current entitlements.
    pub async fn resolve_limits(&self, user: Option<&User>) -> Result<PlanLimits, PortfolioError> {
        let settings = self.load_settings().await?;
        Ok(entitlement::resolve(&settings, user))
    }

    /// Persist a committed draft for `owner`.
    ///
    /// Creates a new aggregate, or updates the one named by
    /// `draft.portfolio_id`. New aggregates count against the portfolio
    /// quota; updates never do. Retrying an identical create after a lost
    /// response converges onto the owner's existing aggregate instead of
    /// failing with a spurious `SlugConflict`.
    pub async fn publish(
        &self,
        owner: &User,
        draft: PortfolioDraft,
    ) -> Result<Portfolio, PortfolioError> {
        let limits = self.resolve_limits(Some(owner)).await?;
        validate_draft(&draft, &limits)?;

        if let Some(id) = draft.portfolio_id {
            return self.apply_update(owner, &id, draft).await;
        }

        let slug = slugify(&draft.slug);

        // Pre-check the published slug holder. A collision with someone
        // else is a definite conflict; a collision with the caller's own
        // aggregate is a retried publish that lost its response, so it
        // converges onto that aggregate instead of failing or double
        // counting against the quota. The partial unique index still
        // backstops the race at commit time below.
        if draft.publish {
            if let Some(holder) = self
                .portfolios
                .get_published_by_slug(&slug)
                .await
                .map_err(gateway_failure)?
            {
                if holder.owner_id != owner.id {
                    return Err(PortfolioError::SlugConflict(slug));
                }
                let mut retry = draft;
                retry.portfolio_id = Some(holder.id);
                return self.apply_update(owner, &holder.id, retry).await;
            }
        }

        // Quota applies to new aggregates only.
        let existing = self
            .portfolios
            .count_by_owner(&owner.id)
            .await
            .map_err(gateway_failure)?;
        if let Limit::Bounded(max) = limits.portfolios {
            if existing >= i64::from(max) {
                return Err(PortfolioError::QuotaExceeded {
                    resource: "portfolio",
                    limit: max,
                });
            }
        }

        let now = Utc::now();
        let status = if draft.publish {
            PortfolioStatus::Published
        } else {
            PortfolioStatus::Draft
        };
        let portfolio = Portfolio {
            id: PortfolioId::new(),
            owner_id: owner.id,
            template: draft.template.clone(),
            slug: slug.clone(),
            status,
            seo: draft.seo.clone().unwrap_or_else(|| derive_seo(&draft.data)),
            data: draft.data.clone(),
            view_count: 0,
            created_at: now,
            updated_at: now,
            published_at: draft.publish.then_some(now),
        };

        match self.portfolios.create(&portfolio).await {
            Ok(created) => Ok(created),
            Err(RepositoryError::Conflict(_)) => {
                // The slug is already published. If its holder is ours this
                // is a retried publish that lost only its response; finish
                // it as an update so the outcome is idempotent.
                let holder = self
                    .portfolios
                    .get_published_by_slug(&slug)
                    .await
                    .map_err(gateway_failure)?;
                match holder {
                    Some(theirs) if theirs.owner_id == owner.id => {
                        let mut retry = draft;
                        retry.portfolio_id = Some(theirs.id);
                        self.apply_update(owner, &theirs.id, retry).await
                    }
                    _ => Err(PortfolioError::SlugConflict(slug)),
                }
            }
            Err(e) => Err(gateway_failure(e)),
        }
    }

    /// Apply a draft the caller has already validated onto an existing
    /// aggregate.
    async fn apply_update(
        &self,
        owner: &User,
        id: &PortfolioId,
        draft: PortfolioDraft,
    ) -> Result<Portfolio, PortfolioError> {
        let current = self.get_owned(owner, id).await?;

        let slug = slugify(&draft.slug);
        let now = Utc::now();
        let status = if draft.publish {
            PortfolioStatus::Published
        } else {
            PortfolioStatus::Draft
        };
        let becoming_published =
            status == PortfolioStatus::Published && current.status != PortfolioStatus::Published;

        let updated = Portfolio {
            id: current.id,
            owner_id: current.owner_id,
            template: draft.template.clone(),
            slug,
            status,
            seo: draft.seo.clone().unwrap_or_else(|| derive_seo(&draft.data)),
            data: draft.data,
            view_count: current.view_count,
            created_at: current.created_at,
            updated_at: now,
            published_at: if becoming_published {
                Some(now)
            } else {
                current.published_at
            },
        };

        match self.portfolios.update(&updated).await {
            Ok(saved) => Ok(saved),
            Err(RepositoryError::Conflict(_)) => Err(PortfolioError::SlugConflict(updated.slug)),
            Err(RepositoryError::NotFound) => Err(PortfolioError::NotFound),
            Err(e) => Err(gateway_failure(e)),
        }
    }

    /// Take an aggregate offline. The slug is retained but no longer
    /// publicly resolvable.
    pub async fn unpublish(&self, owner: &User, id: &PortfolioId) -> Result<Portfolio, PortfolioError> {
        let mut portfolio = self.get_owned(owner, id).await?;
        if portfolio.status == PortfolioStatus::Draft {
            return Ok(portfolio);
        }
        portfolio.status = PortfolioStatus::Draft;
        portfolio.updated_at = Utc::now();
        self.portfolios
            .update(&portfolio)
            .await
            .map_err(gateway_failure)
    }

    /// Explicit, irreversible owner-initiated delete.
    pub async fn delete(&self, owner: &User, id: &PortfolioId) -> Result<(), PortfolioError> {
        self.get_owned(owner, id).await?;
        match self.portfolios.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(PortfolioError::NotFound),
            Err(e) => Err(gateway_failure(e)),
        }
    }

    /// Atomic view count increment, called once per public render.
    pub async fn record_view(&self, id: &PortfolioId) -> Result<(), PortfolioError> {
        match self.portfolios.increment_views(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(PortfolioError::NotFound),
            Err(e) => Err(gateway_failure(e)),
        }
    }

    /// Resolve a public slug. Drafts and unknown slugs are both `NotFound`;
    /// the public surface must not reveal which.
    pub async fn resolve_public(&self, slug: &str) -> Result<Portfolio, PortfolioError> {
        self.portfolios
            .get_published_by_slug(slug)
            .await
            .map_err(gateway_failure)?
            .ok_or(PortfolioError::NotFound)
    }

    /// Load an aggregate for its owner, for the edit flow and the owner
    /// dashboard. Unlike public resolution this sees drafts.
    pub async fn get_owned(
        &self,
        owner: &User,
        id: &PortfolioId,
    ) -> Result<Portfolio, PortfolioError> {
        let portfolio = self
            .portfolios
            .get_by_id(id)
            .await
            .map_err(gateway_failure)?
            .ok_or(PortfolioError::NotFound)?;
        if portfolio.owner_id != owner.id {
            return Err(PortfolioError::PermissionDenied);
        }
        Ok(portfolio)
    }

    /// List the owner's aggregates, drafts included.
    pub async fn list_owned(
        &self,
        owner: &User,
        filter: Option<PortfolioFilter>,
    ) -> Result<Vec<Portfolio>, PortfolioError> {
        self.portfolios
            .list_by_owner(&owner.id, filter)
            .await
            .map_err(gateway_failure)
    }
}

/// Translate a gateway failure, logging the detail and surfacing a generic
/// message so internals never leak to users.
fn gateway_failure(e: RepositoryError) -> PortfolioError {
    match e {
        RepositoryError::NotFound => PortfolioError::NotFound,
        other => {
            tracing::error!(error = %other, "persistence gateway failure");
            PortfolioError::Upstream("persistence gateway failure".to_string())
        }
    }
}

/// Authoritative draft validation: the builder's step rules plus the
/// per-entity plan limits.
fn validate_draft(draft: &PortfolioDraft, limits: &PlanLimits) -> Result<(), PortfolioError> {
    let mut errors = Vec::new();
    errors.extend(rules::validate_template(draft.template.as_str(), limits));
    errors.extend(rules::validate_personal(&draft.data.personal));
    errors.extend(rules::validate_experience(&draft.data.experience));
    errors.extend(rules::validate_projects(&draft.data.projects));
    errors.extend(rules::validate_skills(&draft.data.skills));
    errors.extend(rules::validate_socials(&draft.data.socials));
    errors.extend(rules::validate_theme(&draft.data.theme, limits));
    errors.extend(rules::validate_publish(&draft.slug));
    if !errors.is_empty() {
        return Err(PortfolioError::Validation(errors));
    }

    if let Limit::Bounded(max) = limits.projects {
        if draft.data.projects.len() > max as usize {
            return Err(PortfolioError::QuotaExceeded {
                resource: "project",
                limit: max,
            });
        }
    }
    let image_count: usize = draft.data.projects.iter().map(|p| p.images.len()).sum();
    if let Limit::Bounded(max) = limits.images {
        if image_count > max as usize {
            return Err(PortfolioError::QuotaExceeded {
                resource: "image",
                limit: max,
            });
        }
    }

    Ok(())
}

/// Derive SEO metadata from the personal block when the owner has not
/// overridden it.
fn derive_seo(data: &PortfolioData) -> SeoMeta {
    let personal = &data.personal;
    let title = if personal.headline.trim().is_empty() {
        personal.name.trim().to_string()
    } else {
        format!("{} | {}", personal.name.trim(), personal.headline.trim())
    };
    let description: String = personal.bio.trim().chars().take(SEO_DESCRIPTION_MAX).collect();
    SeoMeta { title, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;
    use folionest_types::builder::PortfolioDraft;
    use folionest_types::plan::{Plan, PricingMode};
    use folionest_types::portfolio::{
        PersonalInfo, ProjectEntry, SkillEntry, SocialLinks, TemplateId,
    };
    use folionest_types::user::UserId;
    use std::sync::Mutex;

    /// In-memory gateway fake mirroring the SQLite implementation's
    /// conflict semantics: published slugs are unique, drafts are not.
    #[derive(Default)]
    struct MemPortfolios {
        items: DashMap<PortfolioId, Portfolio>,
    }

    impl MemPortfolios {
        fn published_slug_taken(&self, slug: &str, not_by: &PortfolioId) -> bool {
            self.items.iter().any(|entry| {
                entry.status == PortfolioStatus::Published
                    && entry.slug == slug
                    && entry.id != *not_by
            })
        }
    }

    impl PortfolioRepository for MemPortfolios {
        async fn create(&self, portfolio: &Portfolio) -> Result<Portfolio, RepositoryError> {
            if portfolio.status == PortfolioStatus::Published
                && self.published_slug_taken(&portfolio.slug, &portfolio.id)
            {
                return Err(RepositoryError::Conflict(format!(
                    "slug '{}' already published",
                    portfolio.slug
                )));
            }
            self.items.insert(portfolio.id, portfolio.clone());
            Ok(portfolio.clone())
        }

        async fn get_by_id(&self, id: &PortfolioId) -> Result<Option<Portfolio>, RepositoryError> {
            Ok(self.items.get(id).map(|e| e.value().clone()))
        }

        async fn get_published_by_slug(
            &self,
            slug: &str,
        ) -> Result<Option<Portfolio>, RepositoryError> {
            Ok(self
                .items
                .iter()
                .find(|e| e.status == PortfolioStatus::Published && e.slug == slug)
                .map(|e| e.value().clone()))
        }

        async fn list_by_owner(
            &self,
            owner_id: &UserId,
            _filter: Option<PortfolioFilter>,
        ) -> Result<Vec<Portfolio>, RepositoryError> {
            Ok(self
                .items
                .iter()
                .filter(|e| e.owner_id == *owner_id)
                .map(|e| e.value().clone())
                .collect())
        }

        async fn count_by_owner(&self, owner_id: &UserId) -> Result<i64, RepositoryError> {
            Ok(self.items.iter().filter(|e| e.owner_id == *owner_id).count() as i64)
        }

        async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, RepositoryError> {
            if !self.items.contains_key(&portfolio.id) {
                return Err(RepositoryError::NotFound);
            }
            if portfolio.status == PortfolioStatus::Published
                && self.published_slug_taken(&portfolio.slug, &portfolio.id)
            {
                return Err(RepositoryError::Conflict(format!(
                    "slug '{}' already published",
                    portfolio.slug
                )));
            }
            self.items.insert(portfolio.id, portfolio.clone());
            Ok(portfolio.clone())
        }

        async fn delete(&self, id: &PortfolioId) -> Result<(), RepositoryError> {
            self.items
                .remove(id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound)
        }

        async fn increment_views(&self, id: &PortfolioId) -> Result<(), RepositoryError> {
            let mut entry = self.items.get_mut(id).ok_or(RepositoryError::NotFound)?;
            entry.view_count += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemSettings {
        value: Mutex<Option<AppSettings>>,
    }

    impl SettingsRepository for MemSettings {
        async fn get(&self) -> Result<Option<AppSettings>, RepositoryError> {
            Ok(self.value.lock().unwrap().clone())
        }

        async fn update(&self, settings: &AppSettings) -> Result<AppSettings, RepositoryError> {
            *self.value.lock().unwrap() = Some(settings.clone());
            Ok(settings.clone())
        }
    }

    fn service() -> PublishService<MemPortfolios, MemSettings> {
        PublishService::new(MemPortfolios::default(), MemSettings::default())
    }

    fn service_with(settings: AppSettings) -> PublishService<MemPortfolios, MemSettings> {
        let repo = MemSettings::default();
        *repo.value.lock().unwrap() = Some(settings);
        PublishService::new(MemPortfolios::default(), repo)
    }

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

    fn make_draft(slug: &str, publish: bool) -> PortfolioDraft {
        let mut data = PortfolioData::default();
        data.personal = PersonalInfo {
            name: "Jane Doe".to_string(),
            headline: "Engineer".to_string(),
            bio: "I build things.".to_string(),
            ..PersonalInfo::default()
        };
        data.projects = vec![ProjectEntry {
            title: "Tracer".to_string(),
            summary: "A ray tracer".to_string(),
            technologies: vec!["rust".to_string()],
            images: vec![],
            link: None,
        }];
        data.skills = vec![SkillEntry {
            name: "Rust".to_string(),
            category: "Languages".to_string(),
            proficiency: Some(80),
        }];
        data.socials = SocialLinks {
            email: "jane@example.com".to_string(),
            ..SocialLinks::default()
        };
        PortfolioDraft {
            portfolio_id: None,
            template: TemplateId::new("aurora"),
            slug: slug.to_string(),
            data,
            seo: None,
            publish,
        }
    }

    #[tokio::test]
    async fn test_publish_and_resolve() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let published = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();
        assert_eq!(published.status, PortfolioStatus::Published);
        assert!(published.published_at.is_some());

        let resolved = svc.resolve_public("jane-doe").await.unwrap();
        assert_eq!(resolved.id, published.id);
    }

    #[tokio::test]
    async fn test_free_quota_blocks_second_portfolio() {
        // pricing freemium, free plan limited to 1 portfolio (default table)
        let svc = service();
        let owner = make_user(Plan::Free);

        svc.publish(&owner, make_draft("first", true)).await.unwrap();
        let err = svc.publish(&owner, make_draft("second", true)).await.unwrap_err();
        assert!(matches!(
            err,
            PortfolioError::QuotaExceeded { resource: "portfolio", limit: 1 }
        ));
    }

    #[tokio::test]
    async fn test_update_does_not_trip_quota() {
        let svc = service();
        let owner = make_user(Plan::Free);

        let first = svc.publish(&owner, make_draft("first", true)).await.unwrap();

        let mut update = make_draft("first", true);
        update.portfolio_id = Some(first.id);
        update.data.personal.headline = "Staff Engineer".to_string();

        let updated = svc.publish(&owner, update).await.unwrap();
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.data.personal.headline, "Staff Engineer");
        assert_eq!(updated.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_pricing_mode_free_lifts_quota() {
        let svc = service_with(AppSettings {
            pricing_mode: PricingMode::Free,
            ..AppSettings::default()
        });
        let owner = make_user(Plan::Free);

        svc.publish(&owner, make_draft("one", true)).await.unwrap();
        svc.publish(&owner, make_draft("two", true)).await.unwrap();
        svc.publish(&owner, make_draft("three", true)).await.unwrap();
    }

    #[tokio::test]
    async fn test_slug_conflict_across_owners() {
        let svc = service();
        let jane = make_user(Plan::Pro);
        let mut mark = make_user(Plan::Pro);
        mark.email = "mark@example.com".to_string();

        svc.publish(&jane, make_draft("portfolio", true)).await.unwrap();
        let err = svc.publish(&mark, make_draft("portfolio", true)).await.unwrap_err();
        assert!(matches!(err, PortfolioError::SlugConflict(ref s) if s == "portfolio"));
    }

    #[tokio::test]
    async fn test_draft_slugs_do_not_conflict() {
        let svc = service();
        let jane = make_user(Plan::Pro);
        let mut mark = make_user(Plan::Pro);
        mark.email = "mark@example.com".to_string();

        svc.publish(&jane, make_draft("portfolio", true)).await.unwrap();
        // A draft with the same slug is fine; uniqueness binds published only.
        svc.publish(&mark, make_draft("portfolio", false)).await.unwrap();
    }

    #[tokio::test]
    async fn test_identical_retry_converges() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let first = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();
        // The client never saw the response and retries the same payload.
        let second = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(svc.list_owned(&owner, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_denied() {
        let svc = service();
        let jane = make_user(Plan::Pro);
        let mut mark = make_user(Plan::Pro);
        mark.email = "mark@example.com".to_string();

        let theirs = svc.publish(&jane, make_draft("jane-doe", true)).await.unwrap();

        let mut update = make_draft("jane-doe", true);
        update.portfolio_id = Some(theirs.id);
        let err = svc.publish(&mark, update).await.unwrap_err();
        assert!(matches!(err, PortfolioError::PermissionDenied));

        let err = svc.delete(&mark, &theirs.id).await.unwrap_err();
        assert!(matches!(err, PortfolioError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_unpublish_hides_from_public_resolution() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let published = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();
        svc.unpublish(&owner, &published.id).await.unwrap();

        let err = svc.resolve_public("jane-doe").await.unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound));

        // The owner still sees it, slug retained.
        let mine = svc.get_owned(&owner, &published.id).await.unwrap();
        assert_eq!(mine.status, PortfolioStatus::Draft);
        assert_eq!(mine.slug, "jane-doe");
    }

    #[tokio::test]
    async fn test_delete_removes_aggregate() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let published = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();
        svc.delete(&owner, &published.id).await.unwrap();

        let err = svc.get_owned(&owner, &published.id).await.unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound));
    }

    #[tokio::test]
    async fn test_record_view_increments() {
        let svc = service();
        let owner = make_user(Plan::Pro);
        let published = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();

        for _ in 0..5 {
            svc.record_view(&published.id).await.unwrap();
        }
        let current = svc.get_owned(&owner, &published.id).await.unwrap();
        assert_eq!(current.view_count, 5);
    }

    #[tokio::test]
    async fn test_seo_derived_when_absent() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let published = svc.publish(&owner, make_draft("jane-doe", true)).await.unwrap();
        assert_eq!(published.seo.title, "Jane Doe | Engineer");
        assert_eq!(published.seo.description, "I build things.");
    }

    #[tokio::test]
    async fn test_seo_override_preserved() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let mut draft = make_draft("jane-doe", true);
        draft.seo = Some(SeoMeta {
            title: "Custom".to_string(),
            description: "Custom description".to_string(),
        });
        let published = svc.publish(&owner, draft).await.unwrap();
        assert_eq!(published.seo.title, "Custom");
    }

    #[tokio::test]
    async fn test_dark_mode_rechecked_authoritatively() {
        let svc = service();
        let owner = make_user(Plan::Free); // free defaults: no dark mode

        let mut draft = make_draft("jane-doe", true);
        draft.template = TemplateId::new("aurora");
        draft.data.theme.dark_mode = true;
        let err = svc.publish(&owner, draft).await.unwrap_err();
        assert!(matches!(
            err,
            PortfolioError::Validation(ref errors) if errors.iter().any(|e| e.field == "theme.dark_mode")
        ));
    }

    #[tokio::test]
    async fn test_project_quota_enforced() {
        let svc = service();
        let owner = make_user(Plan::Free); // free defaults: 3 projects

        let mut draft = make_draft("jane-doe", true);
        let project = draft.data.projects[0].clone();
        draft.data.projects = vec![project.clone(), project.clone(), project.clone(), project];
        let err = svc.publish(&owner, draft).await.unwrap_err();
        assert!(matches!(
            err,
            PortfolioError::QuotaExceeded { resource: "project", limit: 3 }
        ));
    }

    #[tokio::test]
    async fn test_restricted_template_rejected() {
        let svc = service();
        let owner = make_user(Plan::Free); // free defaults allow only "aurora"

        let mut draft = make_draft("jane-doe", true);
        draft.template = TemplateId::new("slate");
        let err = svc.publish(&owner, draft).await.unwrap_err();
        assert!(matches!(
            err,
            PortfolioError::Validation(ref errors) if errors.iter().any(|e| e.field == "template")
        ));
    }

    #[tokio::test]
    async fn test_full_round_trip_field_equality() {
        let svc = service();
        let owner = make_user(Plan::Pro);

        let draft = make_draft("jane-doe", true);
        let published = svc.publish(&owner, draft.clone()).await.unwrap();
        let fetched = svc.get_owned(&owner, &published.id).await.unwrap();

        assert_eq!(fetched.data, draft.data);
        assert_eq!(fetched.template, draft.template);
        assert_eq!(fetched.slug, draft.slug);
        assert_eq!(fetched.status, PortfolioStatus::Published);
    }
}

//! Builder session lifecycle.
//!
//! The `BuilderSession` struct lives in `folionest-types`; this module
//! provides an extension trait (`BuilderSessionExt`) with the step state
//! machine: editing step slices, advancing with validation, backing up
//! without it, and assembling the final draft. The extension trait pattern
//! is used because Rust does not allow inherent impls for types defined in
//! another crate.

use uuid::Uuid;

use folionest_types::builder::{BuilderSession, BuilderStep, PortfolioDraft, StepValidity};
use folionest_types::error::BuilderError;
use folionest_types::plan::PlanLimits;
use folionest_types::portfolio::{
    ExperienceEntry, PersonalInfo, Portfolio, ProjectEntry, SeoMeta, SkillEntry, SocialLinks,
    TemplateId, ThemeSettings, slugify,
};
use folionest_types::user::UserId;

use super::rules;

/// Create a fresh builder session for `owner_id`, starting at the template
/// step with an empty draft.
pub fn new_session(owner_id: UserId) -> BuilderSession {
    BuilderSession {
        session_id: Uuid::now_v7(),
        owner_id,
        portfolio_id: None,
        step: BuilderStep::Template,
        template: TemplateId::default(),
        data: Default::default(),
        slug: String::new(),
        slug_seeded: false,
        seo: None,
        publish: false,
        validity: StepValidity::default(),
    }
}

/// Create a session pre-loaded from an existing aggregate (the edit flow).
///
/// The caller must already have verified ownership. The slug is marked
/// seeded so renames never clobber the published address.
pub fn edit_session(portfolio: &Portfolio) -> BuilderSession {
    BuilderSession {
        session_id: Uuid::now_v7(),
        owner_id: portfolio.owner_id,
        portfolio_id: Some(portfolio.id),
        step: BuilderStep::Template,
        template: portfolio.template.clone(),
        data: portfolio.data.clone(),
        slug: portfolio.slug.clone(),
        slug_seeded: true,
        seo: Some(portfolio.seo.clone()),
        publish: portfolio.status == folionest_types::portfolio::PortfolioStatus::Published,
        validity: StepValidity::default(),
    }
}

/// Extension trait for `BuilderSession` lifecycle management.
pub trait BuilderSessionExt {
    /// Replace the template selection. Resets that step's validity.
    fn set_template(&mut self, template: TemplateId);

    /// Replace the personal block. Seeds the slug from the name the first
    /// time the name becomes non-empty while the slug is still empty; the
    /// default is one-shot and never overwritten by later name edits.
    fn edit_personal(&mut self, personal: PersonalInfo);

    fn edit_experience(&mut self, entries: Vec<ExperienceEntry>);

    fn edit_projects(&mut self, projects: Vec<ProjectEntry>);

    fn edit_skills(&mut self, skills: Vec<SkillEntry>);

    fn edit_socials(&mut self, socials: SocialLinks);

    fn edit_theme(&mut self, theme: ThemeSettings);

    /// Set the desired slug and publish options for the final step.
    fn edit_publish_options(&mut self, slug: String, seo: Option<SeoMeta>, publish: bool);

    /// Validate the current step against `limits` and advance on success.
    ///
    /// On failure the step does not change and the field-level errors are
    /// returned. On the last step, `AlreadyAtEnd`.
    fn advance(&mut self, limits: &PlanLimits) -> Result<BuilderStep, BuilderError>;

    /// Go back one step. Never validates; `None` on the first step.
    fn back(&mut self) -> Option<BuilderStep>;

    /// Validate every step and assemble the complete draft for the publish
    /// service. The session itself never persists portfolios.
    fn commit(&mut self, limits: &PlanLimits) -> Result<PortfolioDraft, BuilderError>;
}

impl BuilderSessionExt for BuilderSession {
    fn set_template(&mut self, template: TemplateId) {
        self.template = template;
        self.validity.set(BuilderStep::Template, false);
    }

    fn edit_personal(&mut self, personal: PersonalInfo) {
        if !self.slug_seeded && self.slug.is_empty() {
            let seeded = slugify(&personal.name);
            if !seeded.is_empty() {
                self.slug = seeded;
                self.slug_seeded = true;
            }
        }
        self.data.personal = personal;
        self.validity.set(BuilderStep::Personal, false);
    }

    fn edit_experience(&mut self, entries: Vec<ExperienceEntry>) {
        self.data.experience = entries;
        self.validity.set(BuilderStep::Experience, false);
    }

    fn edit_projects(&mut self, projects: Vec<ProjectEntry>) {
        self.data.projects = projects;
        self.validity.set(BuilderStep::Projects, false);
    }

    fn edit_skills(&mut self, skills: Vec<SkillEntry>) {
        self.data.skills = skills;
        self.validity.set(BuilderStep::Skills, false);
    }

    fn edit_socials(&mut self, socials: SocialLinks) {
        self.data.socials = socials;
        self.validity.set(BuilderStep::Socials, false);
    }

    fn edit_theme(&mut self, theme: ThemeSettings) {
        self.data.theme = theme;
        self.validity.set(BuilderStep::Theme, false);
    }

    fn edit_publish_options(&mut self, slug: String, seo: Option<SeoMeta>, publish: bool) {
        if !slug.is_empty() {
            self.slug = slug;
            // An explicit slug counts as seeded: the one-shot default must
            // never overwrite a deliberate choice.
            self.slug_seeded = true;
        }
        self.seo = seo;
        self.publish = publish;
        self.validity.set(BuilderStep::Publish, false);
    }

    fn advance(&mut self, limits: &PlanLimits) -> Result<BuilderStep, BuilderError> {
        let errors = rules::validate_step(
            self.step,
            self.template.as_str(),
            &self.data,
            &self.slug,
            limits,
        );
        if !errors.is_empty() {
            self.validity.set(self.step, false);
            return Err(BuilderError::Invalid(errors));
        }

        self.validity.set(self.step, true);
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(BuilderError::AlreadyAtEnd),
        }
    }

    fn back(&mut self) -> Option<BuilderStep> {
        let previous = self.step.previous()?;
        self.step = previous;
        Some(previous)
    }

    fn commit(&mut self, limits: &PlanLimits) -> Result<PortfolioDraft, BuilderError> {
        let mut all_errors = Vec::new();
        for step in BuilderStep::ALL {
            let errors = rules::validate_step(
                step,
                self.template.as_str(),
                &self.data,
                &self.slug,
                limits,
            );
            self.validity.set(step, errors.is_empty());
            all_errors.extend(errors);
        }
        if !all_errors.is_empty() {
            return Err(BuilderError::Invalid(all_errors));
        }

        Ok(PortfolioDraft {
            portfolio_id: self.portfolio_id,
            template: self.template.clone(),
            slug: slugify(&self.slug),
            data: self.data.clone(),
            seo: self.seo.clone(),
            publish: self.publish,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folionest_types::plan::PlanLimits;

    fn limits() -> PlanLimits {
        PlanLimits::unlimited()
    }

    fn complete_session() -> BuilderSession {
        let mut session = new_session(UserId::new());
        session.set_template(TemplateId::new("aurora"));
        session.edit_personal(PersonalInfo {
            name: "Jane Doe".to_string(),
            headline: "Engineer".to_string(),
            bio: "I build things.".to_string(),
            ..PersonalInfo::default()
        });
        session.edit_projects(vec![ProjectEntry {
            title: "Tracer".to_string(),
            summary: "A ray tracer".to_string(),
            technologies: vec!["rust".to_string()],
            images: vec![],
            link: None,
        }]);
        session.edit_skills(vec![SkillEntry {
            name: "Rust".to_string(),
            category: "Languages".to_string(),
            proficiency: Some(80),
        }]);
        session.edit_socials(SocialLinks {
            email: "jane@example.com".to_string(),
            ..SocialLinks::default()
        });
        session
    }

    #[test]
    fn test_new_session_starts_at_template() {
        let session = new_session(UserId::new());
        assert_eq!(session.step, BuilderStep::Template);
        assert!(session.slug.is_empty());
        assert!(!session.slug_seeded);
        assert!(session.portfolio_id.is_none());
    }

    #[test]
    fn test_slug_seeds_once_from_name() {
        let mut session = new_session(UserId::new());

        // Empty name: nothing seeded yet.
        session.edit_personal(PersonalInfo::default());
        assert!(session.slug.is_empty());
        assert!(!session.slug_seeded);

        session.edit_personal(PersonalInfo {
            name: "Jane Doe".to_string(),
            ..PersonalInfo::default()
        });
        assert_eq!(session.slug, "jane-doe");
        assert!(session.slug_seeded);

        // A later rename never overwrites the seeded slug.
        session.edit_personal(PersonalInfo {
            name: "Janet Doe".to_string(),
            ..PersonalInfo::default()
        });
        assert_eq!(session.slug, "jane-doe");
    }

    #[test]
    fn test_explicit_slug_is_never_overwritten() {
        let mut session = new_session(UserId::new());
        session.edit_publish_options("my-site".to_string(), None, false);

        session.edit_personal(PersonalInfo {
            name: "Jane Doe".to_string(),
            ..PersonalInfo::default()
        });
        assert_eq!(session.slug, "my-site");
    }

    #[test]
    fn test_advance_blocks_on_invalid_step() {
        let mut session = new_session(UserId::new());
        session.advance(&limits()).unwrap(); // template has a default
        let err = session.advance(&limits()).unwrap_err();

        // Personal step fails with field-level errors and does not move.
        assert!(matches!(err, BuilderError::Invalid(ref errors) if errors.len() == 3));
        assert_eq!(session.step, BuilderStep::Personal);
    }

    #[test]
    fn test_projects_step_requires_one_project() {
        let mut session = complete_session();
        session.edit_projects(vec![]);
        session.step = BuilderStep::Projects;

        let err = session.advance(&limits()).unwrap_err();
        assert!(matches!(err, BuilderError::Invalid(_)));
        assert_eq!(session.step, BuilderStep::Projects);

        session.edit_projects(vec![ProjectEntry {
            title: "Tracer".to_string(),
            summary: "A ray tracer".to_string(),
            technologies: vec!["rust".to_string()],
            images: vec![],
            link: None,
        }]);
        assert_eq!(session.advance(&limits()).unwrap(), BuilderStep::Skills);
    }

    #[test]
    fn test_back_never_validates() {
        let mut session = new_session(UserId::new());
        session.advance(&limits()).unwrap();
        assert_eq!(session.step, BuilderStep::Personal);

        // Personal is empty and invalid, but back still succeeds.
        assert_eq!(session.back(), Some(BuilderStep::Template));
        assert_eq!(session.back(), None);
        assert_eq!(session.step, BuilderStep::Template);
    }

    #[test]
    fn test_advance_at_end_errors() {
        let mut session = complete_session();
        session.step = BuilderStep::Publish;
        let err = session.advance(&limits()).unwrap_err();
        assert!(matches!(err, BuilderError::AlreadyAtEnd));
    }

    #[test]
    fn test_dark_mode_gating_is_advisory_at_theme_step() {
        let mut session = complete_session();
        session.step = BuilderStep::Theme;
        session.edit_theme(ThemeSettings {
            primary_color: "#6366f1".to_string(),
            dark_mode: true,
        });

        let mut no_dark = PlanLimits::unlimited();
        no_dark.dark_mode = false;

        let err = session.advance(&no_dark).unwrap_err();
        assert!(matches!(err, BuilderError::Invalid(ref e) if e[0].field == "theme.dark_mode"));

        // Same theme advances fine for an entitled user.
        assert!(session.advance(&limits()).is_ok());
    }

    #[test]
    fn test_commit_assembles_normalized_draft() {
        let mut session = complete_session();
        session.edit_publish_options("Jane's Site".to_string(), None, true);

        let draft = session.commit(&limits()).unwrap();
        assert_eq!(draft.slug, "jane-s-site");
        assert!(draft.publish);
        assert_eq!(draft.data.projects.len(), 1);
        assert!(draft.portfolio_id.is_none());
    }

    #[test]
    fn test_commit_collects_errors_across_steps() {
        let mut session = new_session(UserId::new());
        let err = session.commit(&limits()).unwrap_err();
        let BuilderError::Invalid(errors) = err else {
            panic!("expected Invalid");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"personal.name"));
        assert!(fields.contains(&"projects"));
        assert!(fields.contains(&"skills"));
        assert!(fields.contains(&"socials.email"));
        assert!(fields.contains(&"slug"));
    }

    #[test]
    fn test_edit_session_preserves_slug() {
        use chrono::Utc;
        use folionest_types::portfolio::{Portfolio, PortfolioId, PortfolioStatus, SeoMeta};

        let portfolio = Portfolio {
            id: PortfolioId::new(),
            owner_id: UserId::new(),
            template: TemplateId::new("slate"),
            slug: "jane-doe".to_string(),
            status: PortfolioStatus::Published,
            data: Default::default(),
            seo: SeoMeta::default(),
            view_count: 42,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            published_at: Some(Utc::now()),
        };

        let mut session = edit_session(&portfolio);
        assert_eq!(session.portfolio_id, Some(portfolio.id));
        assert!(session.publish);

        // Renaming during edit must not clobber the published address.
        session.edit_personal(PersonalInfo {
            name: "Janet Doe".to_string(),
            ..PersonalInfo::default()
        });
        assert_eq!(session.slug, "jane-doe");
    }
}

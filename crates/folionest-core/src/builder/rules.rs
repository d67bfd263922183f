//! Per-step validation rules.
//!
//! Pure functions over the draft slices. The builder session calls these
//! when advancing; the publish service calls them again at commit time so a
//! hand-crafted or stale draft can never bypass step gating.

use folionest_types::builder::BuilderStep;
use folionest_types::error::ValidationError;
use folionest_types::plan::PlanLimits;
use folionest_types::portfolio::{
    PersonalInfo, PortfolioData, ProjectEntry, SkillEntry, SocialLinks, ThemeSettings, slugify,
};

/// Curated primary colors offered by the theme step. Custom hex values are
/// accepted as well.
pub const THEME_PALETTE: [&str; 6] = [
    "#6366f1", "#0ea5e9", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6",
];

fn required(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "required"));
    }
}

pub fn validate_template(template_id: &str, limits: &PlanLimits) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if template_id.trim().is_empty() {
        errors.push(ValidationError::new("template", "required"));
    } else if !limits.templates.allows(template_id) {
        errors.push(ValidationError::new(
            "template",
            format!("template '{template_id}' is not available on the current plan"),
        ));
    }
    errors
}

pub fn validate_personal(personal: &PersonalInfo) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    required(&mut errors, "personal.name", &personal.name);
    required(&mut errors, "personal.headline", &personal.headline);
    required(&mut errors, "personal.bio", &personal.bio);
    errors
}

/// Zero entries is fine; present entries must be complete.
pub fn validate_experience(
    entries: &[folionest_types::portfolio::ExperienceEntry],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        required(&mut errors, &format!("experience[{i}].company"), &entry.company);
        required(&mut errors, &format!("experience[{i}].position"), &entry.position);
        required(&mut errors, &format!("experience[{i}].period"), &entry.period);
        required(&mut errors, &format!("experience[{i}].summary"), &entry.summary);
    }
    errors
}

/// At least one project is required to advance.
pub fn validate_projects(projects: &[ProjectEntry]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if projects.is_empty() {
        errors.push(ValidationError::new("projects", "at least one project is required"));
        return errors;
    }
    for (i, project) in projects.iter().enumerate() {
        required(&mut errors, &format!("projects[{i}].title"), &project.title);
        required(&mut errors, &format!("projects[{i}].summary"), &project.summary);
        if project.technologies.iter().all(|t| t.trim().is_empty()) {
            errors.push(ValidationError::new(
                format!("projects[{i}].technologies"),
                "at least one technology is required",
            ));
        }
    }
    errors
}

pub fn validate_skills(skills: &[SkillEntry]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if skills.is_empty() {
        errors.push(ValidationError::new("skills", "at least one skill is required"));
        return errors;
    }
    for (i, skill) in skills.iter().enumerate() {
        required(&mut errors, &format!("skills[{i}].name"), &skill.name);
        required(&mut errors, &format!("skills[{i}].category"), &skill.category);
        if let Some(p) = skill.proficiency {
            if p > 100 {
                errors.push(ValidationError::new(
                    format!("skills[{i}].proficiency"),
                    "must be between 0 and 100",
                ));
            }
        }
    }
    errors
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &Option<String>) {
    let Some(value) = value else { return };
    if value.trim().is_empty() {
        return;
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::new(field, "must be a well-formed http(s) URL")),
    }
}

pub fn validate_socials(socials: &SocialLinks) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if socials.email.trim().is_empty() {
        errors.push(ValidationError::new("socials.email", "required"));
    } else if !socials.email.contains('@') {
        errors.push(ValidationError::new("socials.email", "must be a valid email address"));
    }
    check_url(&mut errors, "socials.website", &socials.website);
    check_url(&mut errors, "socials.github", &socials.github);
    check_url(&mut errors, "socials.linkedin", &socials.linkedin);
    check_url(&mut errors, "socials.twitter", &socials.twitter);
    errors
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Theme validation. The dark-mode check against `limits` is advisory
/// client-side gating; the publish service repeats it authoritatively.
pub fn validate_theme(theme: &ThemeSettings, limits: &PlanLimits) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let color = theme.primary_color.trim();
    if color.is_empty() {
        errors.push(ValidationError::new("theme.primary_color", "required"));
    } else if !THEME_PALETTE.contains(&color) && !is_hex_color(color) {
        errors.push(ValidationError::new(
            "theme.primary_color",
            "must be a palette color or a hex value like #1a2b3c",
        ));
    }
    if theme.dark_mode && !limits.dark_mode {
        errors.push(ValidationError::new(
            "theme.dark_mode",
            "dark mode is not available on the current plan",
        ));
    }
    errors
}

pub fn validate_publish(slug: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if slugify(slug).is_empty() {
        errors.push(ValidationError::new(
            "slug",
            "must contain at least one alphanumeric character",
        ));
    }
    errors
}

/// Validate one step's slice of the draft.
pub fn validate_step(
    step: BuilderStep,
    template_id: &str,
    data: &PortfolioData,
    slug: &str,
    limits: &PlanLimits,
) -> Vec<ValidationError> {
    match step {
        BuilderStep::Template => validate_template(template_id, limits),
        BuilderStep::Personal => validate_personal(&data.personal),
        BuilderStep::Experience => validate_experience(&data.experience),
        BuilderStep::Projects => validate_projects(&data.projects),
        BuilderStep::Skills => validate_skills(&data.skills),
        BuilderStep::Socials => validate_socials(&data.socials),
        BuilderStep::Theme => validate_theme(&data.theme, limits),
        BuilderStep::Publish => validate_publish(slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folionest_types::plan::PlanLimits;

    #[test]
    fn test_personal_requires_core_fields() {
        let mut personal = PersonalInfo::default();
        let errors = validate_personal(&personal);
        assert_eq!(errors.len(), 3);

        personal.name = "Jane".to_string();
        personal.headline = "Engineer".to_string();
        personal.bio = "Hi".to_string();
        assert!(validate_personal(&personal).is_empty());
    }

    #[test]
    fn test_experience_allows_empty_list() {
        assert!(validate_experience(&[]).is_empty());
    }

    #[test]
    fn test_projects_require_at_least_one() {
        let errors = validate_projects(&[]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "projects");
    }

    #[test]
    fn test_project_requires_technologies() {
        let project = ProjectEntry {
            title: "Tracer".to_string(),
            summary: "A ray tracer".to_string(),
            technologies: vec![],
            images: vec![],
            link: None,
        };
        let errors = validate_projects(&[project]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "projects[0].technologies");
    }

    #[test]
    fn test_socials_email_required_and_shaped() {
        let mut socials = SocialLinks::default();
        assert_eq!(validate_socials(&socials)[0].field, "socials.email");

        socials.email = "not-an-email".to_string();
        assert_eq!(validate_socials(&socials)[0].reason, "must be a valid email address");

        socials.email = "jane@example.com".to_string();
        assert!(validate_socials(&socials).is_empty());
    }

    #[test]
    fn test_socials_urls_validated() {
        let socials = SocialLinks {
            email: "jane@example.com".to_string(),
            github: Some("github.com/jane".to_string()),
            ..SocialLinks::default()
        };
        let errors = validate_socials(&socials);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "socials.github");

        let socials = SocialLinks {
            email: "jane@example.com".to_string(),
            github: Some("https://github.com/jane".to_string()),
            ..SocialLinks::default()
        };
        assert!(validate_socials(&socials).is_empty());
    }

    #[test]
    fn test_theme_dark_mode_gated_by_limits() {
        let theme = ThemeSettings {
            primary_color: "#6366f1".to_string(),
            dark_mode: true,
        };

        let mut limits = PlanLimits::unlimited();
        assert!(validate_theme(&theme, &limits).is_empty());

        limits.dark_mode = false;
        let errors = validate_theme(&theme, &limits);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "theme.dark_mode");
    }

    #[test]
    fn test_theme_accepts_custom_hex() {
        let theme = ThemeSettings {
            primary_color: "#1a2b3c".to_string(),
            dark_mode: false,
        };
        assert!(validate_theme(&theme, &PlanLimits::unlimited()).is_empty());

        let theme = ThemeSettings {
            primary_color: "cornflower".to_string(),
            dark_mode: false,
        };
        assert_eq!(validate_theme(&theme, &PlanLimits::unlimited()).len(), 1);
    }

    #[test]
    fn test_publish_rejects_unusable_slug() {
        assert_eq!(validate_publish("!!!").len(), 1);
        assert!(validate_publish("Jane Doe").is_empty());
    }
}

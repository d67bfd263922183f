//! Template rendering dispatch.
//!
//! A portfolio stores an opaque template id; this module owns the closed
//! set of rendering variants and is the only place that branches on the id.
//! Unknown ids render a placeholder page instead of failing, and a variant
//! that does not support the project-detail page falls back to home.
//!
//! Dark rendering is double-gated: the stored `theme.dark_mode` flag AND a
//! live re-check of the owner's current entitlement (plans change after
//! save, so a prior grant is not trusted at render time).

mod aurora;
mod meridian;
mod slate;

use std::fmt;
use std::str::FromStr;

use folionest_types::portfolio::{Portfolio, ThemeSettings};

pub use aurora::Aurora;
pub use meridian::Meridian;
pub use slate::Slate;

/// The pages every template can be asked to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    About,
    Projects,
    /// Optional per variant; unsupported variants fall back to `Home`.
    ProjectDetail,
    Contact,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Home => "home",
            PageKind::About => "about",
            PageKind::Projects => "projects",
            PageKind::ProjectDetail => "project-detail",
            PageKind::Contact => "contact",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "home" => Ok(PageKind::Home),
            "about" => Ok(PageKind::About),
            "projects" => Ok(PageKind::Projects),
            "contact" => Ok(PageKind::Contact),
            other => Err(format!("unknown page: '{other}'")),
        }
    }
}

/// Coarse device classification for responsive rendering decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Classify from a User-Agent header value.
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Mobi") || user_agent.contains("Android") {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Everything a render call needs beyond the aggregate itself.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Live entitlement re-check result for the owner's dark-mode grant.
    pub dark_entitled: bool,
    /// The owner's plan carries the platform watermark.
    pub watermark: bool,
    pub device: DeviceClass,
    /// Which project a project-detail render targets.
    pub project_index: Option<usize>,
}

/// A fully rendered page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub title: String,
    pub html: String,
}

/// Resolved colors handed to a variant's markup.
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted: String,
    pub accent: String,
}

/// Default light/dark palette derived from the theme's primary color.
/// Variants start here and override what their look needs.
pub fn base_palette(theme: &ThemeSettings, dark: bool) -> Palette {
    if dark {
        Palette {
            background: "#0b0b0f".to_string(),
            surface: "#18181b".to_string(),
            text: "#fafafa".to_string(),
            muted: "#a1a1aa".to_string(),
            accent: theme.primary_color.clone(),
        }
    } else {
        Palette {
            background: "#ffffff".to_string(),
            surface: "#f4f4f5".to_string(),
            text: "#18181b".to_string(),
            muted: "#52525b".to_string(),
            accent: theme.primary_color.clone(),
        }
    }
}

/// One of the closed set of rendering implementations.
pub trait TemplateVariant: Send + Sync {
    /// Stable id stored on aggregates ("aurora").
    fn id(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn supports_project_detail(&self) -> bool {
        false
    }

    fn palette(&self, theme: &ThemeSettings, dark: bool) -> Palette {
        base_palette(theme, dark)
    }

    /// Produce the page body for `kind`. The dispatcher wraps it in the
    /// shared document chrome.
    fn render_body(
        &self,
        kind: PageKind,
        portfolio: &Portfolio,
        palette: &Palette,
        ctx: &RenderContext,
    ) -> String;
}

/// Escape text for embedding in HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const AURORA: Aurora = Aurora;
const MERIDIAN: Meridian = Meridian;
const SLATE: Slate = Slate;

/// Centralized template dispatch: the only `template id -> variant` branch
/// in the codebase.
pub struct TemplateDispatcher;

impl TemplateDispatcher {
    pub fn variant_for(template_id: &str) -> Option<&'static dyn TemplateVariant> {
        match template_id {
            "aurora" => Some(&AURORA),
            "meridian" => Some(&MERIDIAN),
            "slate" => Some(&SLATE),
            _ => None,
        }
    }

    /// The closed variant set, in catalog order.
    pub fn catalog() -> [&'static dyn TemplateVariant; 3] {
        [&AURORA, &MERIDIAN, &SLATE]
    }

    /// Render `kind` for the aggregate. Never fails: unknown template ids
    /// produce a placeholder page and unsupported project-detail requests
    /// fall back to the home page.
    pub fn render(portfolio: &Portfolio, kind: PageKind, ctx: &RenderContext) -> RenderedPage {
        let Some(variant) = Self::variant_for(portfolio.template.as_str()) else {
            tracing::warn!(template = %portfolio.template, slug = %portfolio.slug, "unknown template id");
            return placeholder_page(portfolio);
        };

        let kind = if kind == PageKind::ProjectDetail && !variant.supports_project_detail() {
            PageKind::Home
        } else {
            kind
        };

        let dark = portfolio.data.theme.dark_mode && ctx.dark_entitled;
        let palette = variant.palette(&portfolio.data.theme, dark);
        let body = variant.render_body(kind, portfolio, &palette, ctx);

        let title = match kind {
            PageKind::Home => portfolio.seo.title.clone(),
            other => format!("{} - {}", portfolio.data.personal.name, other),
        };

        RenderedPage {
            html: wrap_document(&title, &portfolio.seo.description, &palette, dark, ctx.watermark, &body),
            title,
        }
    }
}

/// Shared document chrome: head, palette CSS variables, optional watermark.
fn wrap_document(
    title: &str,
    description: &str,
    palette: &Palette,
    dark: bool,
    watermark: bool,
    body: &str,
) -> String {
    let scheme = if dark { "dark" } else { "light" };
    let footer = if watermark {
        "\n<footer class=\"watermark\"><a href=\"/\">Made with Folionest</a></footer>"
    } else {
        ""
    };
    format!(
        "<!doctype html>\n<html lang=\"en\" data-scheme=\"{scheme}\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<meta name=\"description\" content=\"{}\">\n<title>{}</title>\n<style>:root{{--background:{};--surface:{};--text:{};--muted:{};--accent:{}}}</style>\n</head>\n<body>\n{body}{footer}\n</body>\n</html>\n",
        escape_html(description),
        escape_html(title),
        palette.background,
        palette.surface,
        palette.text,
        palette.muted,
        palette.accent,
    )
}

/// Rendered when an aggregate references a template this build does not
/// know. Keeps the public page up instead of erroring.
fn placeholder_page(portfolio: &Portfolio) -> RenderedPage {
    let palette = base_palette(&portfolio.data.theme, false);
    let body = format!(
        "<main class=\"placeholder\"><h1>{}</h1><p>This portfolio uses a template that is not available.</p></main>",
        escape_html(&portfolio.data.personal.name),
    );
    let title = "Template not found".to_string();
    RenderedPage {
        html: wrap_document(&title, "", &palette, false, false, &body),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use folionest_types::portfolio::{
        PersonalInfo, PortfolioData, PortfolioId, PortfolioStatus, ProjectEntry, SeoMeta,
        TemplateId,
    };
    use folionest_types::user::UserId;

    fn make_portfolio(template: &str) -> Portfolio {
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
        Portfolio {
            id: PortfolioId::new(),
            owner_id: UserId::new(),
            template: TemplateId::new(template),
            slug: "jane-doe".to_string(),
            status: PortfolioStatus::Published,
            data,
            seo: SeoMeta {
                title: "Jane Doe | Engineer".to_string(),
                description: "I build things.".to_string(),
            },
            view_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            published_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_page_kind_parse() {
        assert_eq!("".parse::<PageKind>().unwrap(), PageKind::Home);
        assert_eq!("home".parse::<PageKind>().unwrap(), PageKind::Home);
        assert_eq!("About".parse::<PageKind>().unwrap(), PageKind::About);
        assert!("admin".parse::<PageKind>().is_err());
    }

    #[test]
    fn test_device_class_from_user_agent() {
        assert_eq!(
            DeviceClass::from_user_agent("Mozilla/5.0 (iPhone) Mobile/15E148"),
            DeviceClass::Mobile
        );
        assert_eq!(
            DeviceClass::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)"),
            DeviceClass::Desktop
        );
    }

    #[test]
    fn test_every_variant_renders_every_page() {
        let ctx = RenderContext::default();
        for variant in TemplateDispatcher::catalog() {
            let portfolio = make_portfolio(variant.id());
            for kind in [
                PageKind::Home,
                PageKind::About,
                PageKind::Projects,
                PageKind::ProjectDetail,
                PageKind::Contact,
            ] {
                let page = TemplateDispatcher::render(&portfolio, kind, &ctx);
                assert!(page.html.contains("<!doctype html>"), "{} {kind}", variant.id());
                assert!(page.html.contains("Jane Doe"), "{} {kind}", variant.id());
            }
        }
    }

    #[test]
    fn test_unknown_template_renders_placeholder() {
        let portfolio = make_portfolio("vaporwave");
        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &RenderContext::default());
        assert_eq!(page.title, "Template not found");
        assert!(page.html.contains("not available"));
    }

    #[test]
    fn test_project_detail_falls_back_without_support() {
        let portfolio = make_portfolio("meridian");
        assert!(!Meridian.supports_project_detail());

        let ctx = RenderContext {
            project_index: Some(0),
            ..RenderContext::default()
        };
        let page = TemplateDispatcher::render(&portfolio, PageKind::ProjectDetail, &ctx);
        // Falls back to the home page's title rather than a detail page.
        assert_eq!(page.title, portfolio.seo.title);
    }

    #[test]
    fn test_dark_requires_flag_and_entitlement() {
        let mut portfolio = make_portfolio("aurora");
        portfolio.data.theme.dark_mode = true;

        let entitled = RenderContext {
            dark_entitled: true,
            ..RenderContext::default()
        };
        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &entitled);
        assert!(page.html.contains("data-scheme=\"dark\""));

        // Entitlement revoked after save: stored flag alone must not win.
        let revoked = RenderContext::default();
        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &revoked);
        assert!(page.html.contains("data-scheme=\"light\""));

        // Entitled but the owner keeps light mode.
        portfolio.data.theme.dark_mode = false;
        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &entitled);
        assert!(page.html.contains("data-scheme=\"light\""));
    }

    #[test]
    fn test_watermark_footer_gated_by_plan() {
        let portfolio = make_portfolio("slate");

        let watermarked = RenderContext {
            watermark: true,
            ..RenderContext::default()
        };
        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &watermarked);
        assert!(page.html.contains("Made with Folionest"));

        let clean = RenderContext::default();
        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &clean);
        assert!(!page.html.contains("Made with Folionest"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let mut portfolio = make_portfolio("aurora");
        portfolio.data.personal.name = "Jane <script>alert(1)</script>".to_string();
        portfolio.seo.title = portfolio.data.personal.name.clone();

        let page = TemplateDispatcher::render(&portfolio, PageKind::Home, &RenderContext::default());
        assert!(!page.html.contains("<script>alert"));
        assert!(page.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_palette_accent_follows_primary_color() {
        let mut theme = ThemeSettings::default();
        theme.primary_color = "#10b981".to_string();

        let light = base_palette(&theme, false);
        assert_eq!(light.accent, "#10b981");
        let dark = base_palette(&theme, true);
        assert_eq!(dark.accent, "#10b981");
        assert_ne!(light.background, dark.background);
    }
}

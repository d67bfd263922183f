//! The Meridian template: a split editorial layout on warm paper tones.

use folionest_types::portfolio::{Portfolio, ThemeSettings};

use super::{PageKind, Palette, RenderContext, TemplateVariant, base_palette, escape_html};

pub struct Meridian;

impl TemplateVariant for Meridian {
    fn id(&self) -> &'static str {
        "meridian"
    }

    fn display_name(&self) -> &'static str {
        "Meridian"
    }

    // No dedicated project-detail page; the dispatcher falls back to home.

    fn palette(&self, theme: &ThemeSettings, dark: bool) -> Palette {
        let mut palette = base_palette(theme, dark);
        if !dark {
            palette.background = "#faf6f0".to_string();
            palette.surface = "#f1e9dd".to_string();
            palette.text = "#2b2118".to_string();
            palette.muted = "#6b5d4f".to_string();
        }
        palette
    }

    fn render_body(
        &self,
        kind: PageKind,
        portfolio: &Portfolio,
        _palette: &Palette,
        _ctx: &RenderContext,
    ) -> String {
        let sidebar = sidebar(portfolio);
        let content = match kind {
            PageKind::Home | PageKind::ProjectDetail => home(portfolio),
            PageKind::About => about(portfolio),
            PageKind::Projects => projects(portfolio),
            PageKind::Contact => contact(portfolio),
        };
        format!("<div class=\"meridian\">\n{sidebar}\n<section class=\"content\">{content}</section>\n</div>")
    }
}

fn sidebar(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    let slug = &portfolio.slug;
    format!(
        "<aside class=\"sidebar\"><h1>{}</h1><p class=\"headline\">{}</p><nav><a href=\"/u/{slug}\">Home</a><a href=\"/u/{slug}/about\">About</a><a href=\"/u/{slug}/projects\">Projects</a><a href=\"/u/{slug}/contact\">Contact</a></nav></aside>",
        escape_html(&personal.name),
        escape_html(&personal.headline),
    )
}

fn home(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    let recent: String = portfolio
        .data
        .projects
        .iter()
        .take(2)
        .map(|p| {
            format!(
                "<article><h3>{}</h3><p>{}</p></article>",
                escape_html(&p.title),
                escape_html(&p.summary),
            )
        })
        .collect();
    format!(
        "<p class=\"lede\">{}</p><h2>Selected work</h2>{recent}",
        escape_html(&personal.bio),
    )
}

fn about(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    let bio = personal.long_bio.as_deref().unwrap_or(&personal.bio);
    let roles: String = portfolio
        .data
        .experience
        .iter()
        .map(|e| {
            format!(
                "<dt>{} <small>{}</small></dt><dd>{}, {}</dd>",
                escape_html(&e.company),
                escape_html(&e.period),
                escape_html(&e.position),
                escape_html(&e.summary),
            )
        })
        .collect();
    let skills: String = portfolio
        .data
        .skills
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(&s.name)))
        .collect();
    format!(
        "<h2>About</h2><p>{}</p><h2>Experience</h2><dl>{roles}</dl><h2>Skills</h2><ul>{skills}</ul>",
        escape_html(bio),
    )
}

fn projects(portfolio: &Portfolio) -> String {
    let entries: String = portfolio
        .data
        .projects
        .iter()
        .map(|p| {
            let tech = p
                .technologies
                .iter()
                .map(|t| escape_html(t))
                .collect::<Vec<_>>()
                .join(", ");
            let link = p
                .link
                .as_deref()
                .map(|l| format!(" <a href=\"{}\" rel=\"noopener\">link</a>", escape_html(l)))
                .unwrap_or_default();
            format!(
                "<article><h3>{}{link}</h3><p>{}</p><p class=\"tech\">{tech}</p></article>",
                escape_html(&p.title),
                escape_html(&p.summary),
            )
        })
        .collect();
    format!("<h2>Projects</h2>{entries}")
}

fn contact(portfolio: &Portfolio) -> String {
    let socials = &portfolio.data.socials;
    let mut rows = vec![format!(
        "<p>Email: <a href=\"mailto:{0}\">{0}</a></p>",
        escape_html(&socials.email)
    )];
    for (label, value) in [
        ("Website", &socials.website),
        ("GitHub", &socials.github),
        ("LinkedIn", &socials.linkedin),
        ("Twitter", &socials.twitter),
    ] {
        if let Some(url) = value {
            rows.push(format!(
                "<p>{label}: <a href=\"{0}\" rel=\"noopener\">{0}</a></p>",
                escape_html(url)
            ));
        }
    }
    format!("<h2>Contact</h2>{}", rows.concat())
}

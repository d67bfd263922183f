//! The Slate template: a dense monospace grid.

use folionest_types::portfolio::{Portfolio, ThemeSettings};

use super::{PageKind, Palette, RenderContext, TemplateVariant, base_palette, escape_html};

pub struct Slate;

impl TemplateVariant for Slate {
    fn id(&self) -> &'static str {
        "slate"
    }

    fn display_name(&self) -> &'static str {
        "Slate"
    }

    fn supports_project_detail(&self) -> bool {
        true
    }

    fn palette(&self, theme: &ThemeSettings, dark: bool) -> Palette {
        let mut palette = base_palette(theme, dark);
        if dark {
            palette.background = "#101418".to_string();
            palette.surface = "#1c2128".to_string();
        } else {
            palette.surface = "#e7ebef".to_string();
        }
        palette
    }

    fn render_body(
        &self,
        kind: PageKind,
        portfolio: &Portfolio,
        _palette: &Palette,
        ctx: &RenderContext,
    ) -> String {
        let personal = &portfolio.data.personal;
        let slug = &portfolio.slug;
        let header = format!(
            "<header class=\"bar\"><span class=\"name\">{}</span><nav><a href=\"/u/{slug}\">~</a> <a href=\"/u/{slug}/about\">about</a> <a href=\"/u/{slug}/projects\">projects</a> <a href=\"/u/{slug}/contact\">contact</a></nav></header>",
            escape_html(&personal.name),
        );
        let content = match kind {
            PageKind::Home => home(portfolio),
            PageKind::About => about(portfolio),
            PageKind::Projects => project_list(portfolio),
            PageKind::ProjectDetail => project_detail(portfolio, ctx.project_index.unwrap_or(0)),
            PageKind::Contact => contact(portfolio),
        };
        format!("<div class=\"slate\">\n{header}\n{content}\n</div>")
    }
}

fn home(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    format!(
        "<main><pre class=\"intro\">$ whoami\n{}\n{}</pre><p>{}</p></main>",
        escape_html(&personal.name),
        escape_html(&personal.headline),
        escape_html(&personal.bio),
    )
}

fn about(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    let bio = personal.long_bio.as_deref().unwrap_or(&personal.bio);
    let rows: String = portfolio
        .data
        .experience
        .iter()
        .map(|e| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&e.period),
                escape_html(&e.company),
                escape_html(&e.position),
            )
        })
        .collect();
    let skills: String = portfolio
        .data
        .skills
        .iter()
        .map(|s| format!("<code>{}</code> ", escape_html(&s.name)))
        .collect();
    format!(
        "<main><p>{}</p><table class=\"log\">{rows}</table><p class=\"skills\">{skills}</p></main>",
        escape_html(bio),
    )
}

fn project_list(portfolio: &Portfolio) -> String {
    let slug = &portfolio.slug;
    let rows: String = portfolio
        .data
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "<li><a href=\"/u/{slug}/projects/{i}\">{}</a> {}</li>",
                escape_html(&p.title),
                escape_html(&p.summary),
            )
        })
        .collect();
    format!("<main><ol class=\"index\">{rows}</ol></main>")
}

fn project_detail(portfolio: &Portfolio, index: usize) -> String {
    let Some(project) = portfolio.data.projects.get(index) else {
        return project_list(portfolio);
    };
    let tech: String = project
        .technologies
        .iter()
        .map(|t| format!("<code>{}</code> ", escape_html(t)))
        .collect();
    let link = project
        .link
        .as_deref()
        .map(|l| format!("<p><a href=\"{0}\" rel=\"noopener\">{0}</a></p>", escape_html(l)))
        .unwrap_or_default();
    format!(
        "<main><h1>{}</h1><p>{}</p><p>{tech}</p>{link}</main>",
        escape_html(&project.title),
        escape_html(&project.summary),
    )
}

fn contact(portfolio: &Portfolio) -> String {
    let socials = &portfolio.data.socials;
    let mut rows = vec![format!("email: {}", escape_html(&socials.email))];
    for (label, value) in [
        ("web", &socials.website),
        ("github", &socials.github),
        ("linkedin", &socials.linkedin),
        ("twitter", &socials.twitter),
    ] {
        if let Some(url) = value {
            rows.push(format!("{label}: {}", escape_html(url)));
        }
    }
    format!("<main><pre class=\"contact\">{}</pre></main>", rows.join("\n"))
}

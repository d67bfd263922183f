//! The Aurora template: a hero-led single column.
//!
//! The default template and the only one available on the free tier, so it
//! renders every page kind including project detail.

use folionest_types::portfolio::{Portfolio, ProjectEntry};

use super::{DeviceClass, PageKind, Palette, RenderContext, TemplateVariant, escape_html};

pub struct Aurora;

impl TemplateVariant for Aurora {
    fn id(&self) -> &'static str {
        "aurora"
    }

    fn display_name(&self) -> &'static str {
        "Aurora"
    }

    fn supports_project_detail(&self) -> bool {
        true
    }

    fn render_body(
        &self,
        kind: PageKind,
        portfolio: &Portfolio,
        _palette: &Palette,
        ctx: &RenderContext,
    ) -> String {
        let nav = nav(&portfolio.slug, ctx.device);
        let content = match kind {
            PageKind::Home => home(portfolio),
            PageKind::About => about(portfolio),
            PageKind::Projects => projects(portfolio),
            PageKind::ProjectDetail => project_detail(portfolio, ctx.project_index.unwrap_or(0)),
            PageKind::Contact => contact(portfolio),
        };
        format!("<div class=\"aurora\">\n{nav}\n{content}\n</div>")
    }
}

fn nav(slug: &str, device: DeviceClass) -> String {
    let class = match device {
        DeviceClass::Desktop => "nav",
        DeviceClass::Mobile => "nav nav-compact",
    };
    format!(
        "<nav class=\"{class}\"><a href=\"/u/{slug}\">Home</a> <a href=\"/u/{slug}/about\">About</a> <a href=\"/u/{slug}/projects\">Projects</a> <a href=\"/u/{slug}/contact\">Contact</a></nav>",
    )
}

fn home(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    let photo = personal
        .photo
        .as_deref()
        .map(|r| format!("<img class=\"hero-photo\" src=\"/assets/{}\" alt=\"\">", escape_html(r)))
        .unwrap_or_default();
    let featured: String = portfolio
        .data
        .projects
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, p)| project_card(p, &portfolio.slug, i))
        .collect();
    format!(
        "<header class=\"hero\">{photo}<h1>{}</h1><p class=\"headline\">{}</p><p>{}</p></header>\n<section class=\"featured\"><h2>Featured work</h2>{featured}</section>",
        escape_html(&personal.name),
        escape_html(&personal.headline),
        escape_html(&personal.bio),
    )
}

fn about(portfolio: &Portfolio) -> String {
    let personal = &portfolio.data.personal;
    let bio = personal.long_bio.as_deref().unwrap_or(&personal.bio);
    let location = personal
        .location
        .as_deref()
        .map(|l| format!("<p class=\"location\">{}</p>", escape_html(l)))
        .unwrap_or_default();
    let experience: String = portfolio
        .data
        .experience
        .iter()
        .map(|e| {
            format!(
                "<article class=\"role\"><h3>{} at {}</h3><p class=\"period\">{}</p><p>{}</p></article>",
                escape_html(&e.position),
                escape_html(&e.company),
                escape_html(&e.period),
                escape_html(&e.summary),
            )
        })
        .collect();
    let skills: String = portfolio
        .data
        .skills
        .iter()
        .map(|s| {
            let meter = s
                .proficiency
                .map(|p| format!("<meter min=\"0\" max=\"100\" value=\"{p}\"></meter>"))
                .unwrap_or_default();
            format!(
                "<li><span>{}</span> <small>{}</small>{meter}</li>",
                escape_html(&s.name),
                escape_html(&s.category),
            )
        })
        .collect();
    format!(
        "<main class=\"about\"><h1>About {}</h1>{location}<p>{}</p><section><h2>Experience</h2>{experience}</section><section><h2>Skills</h2><ul class=\"skills\">{skills}</ul></section></main>",
        escape_html(&personal.name),
        escape_html(bio),
    )
}

fn projects(portfolio: &Portfolio) -> String {
    let cards: String = portfolio
        .data
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| project_card(p, &portfolio.slug, i))
        .collect();
    format!("<main class=\"projects\"><h1>Projects</h1>{cards}</main>")
}

fn project_detail(portfolio: &Portfolio, index: usize) -> String {
    let Some(project) = portfolio.data.projects.get(index) else {
        // Stale or out-of-range link; show the list instead of an error.
        return projects(portfolio);
    };
    let tech: String = project
        .technologies
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
        .collect();
    let images: String = project
        .images
        .iter()
        .map(|r| format!("<img src=\"/assets/{}\" alt=\"\">", escape_html(r)))
        .collect();
    let link = project
        .link
        .as_deref()
        .map(|l| format!("<p><a href=\"{}\" rel=\"noopener\">Visit project</a></p>", escape_html(l)))
        .unwrap_or_default();
    format!(
        "<main class=\"project-detail\"><h1>{}</h1><div class=\"tags\">{tech}</div><p>{}</p>{images}{link}</main>",
        escape_html(&project.title),
        escape_html(&project.summary),
    )
}

fn contact(portfolio: &Portfolio) -> String {
    let socials = &portfolio.data.socials;
    let mut links = vec![format!(
        "<li><a href=\"mailto:{0}\">{0}</a></li>",
        escape_html(&socials.email)
    )];
    for (label, value) in [
        ("Website", &socials.website),
        ("GitHub", &socials.github),
        ("LinkedIn", &socials.linkedin),
        ("Twitter", &socials.twitter),
    ] {
        if let Some(url) = value {
            links.push(format!(
                "<li><a href=\"{}\" rel=\"noopener\">{label}</a></li>",
                escape_html(url)
            ));
        }
    }
    format!(
        "<main class=\"contact\"><h1>Get in touch</h1><ul class=\"links\">{}</ul></main>",
        links.concat()
    )
}

fn project_card(project: &ProjectEntry, slug: &str, index: usize) -> String {
    let tech: String = project
        .technologies
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
        .collect();
    format!(
        "<article class=\"card\"><h3><a href=\"/u/{slug}/projects/{index}\">{}</a></h3><p>{}</p><div class=\"tags\">{tech}</div></article>",
        escape_html(&project.title),
        escape_html(&project.summary),
    )
}

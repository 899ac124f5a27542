//! HTML rendering of page models and the authoring screens.

use arena_core::{Article, SiteConfig};
use chrono::{Datelike, Utc};
use tracing::debug;

use crate::{
    composer::{Block, LinkCard, LinkSection, PageModel},
    error::Result,
    metadata::{MetadataBuilder, PageMeta},
    template::{TemplateContext, TemplateRegistry, escape_html},
};

/// Renders composed pages into complete HTML documents.
#[derive(Debug)]
pub struct HtmlRenderer {
    templates: TemplateRegistry,
    site: SiteConfig,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            site,
        }
    }

    /// Render a public page.
    pub fn render_page(&self, page: &PageModel) -> Result<String> {
        debug!(path = %page.path, found = page.is_found(), "rendering page");

        let mut ctx = TemplateContext::new()
            .with_var("heading", escape_html(&page.heading))
            .with_var("blocks", page.blocks.iter().map(block_html).collect::<String>());
        ctx.insert_opt(
            "subheading",
            page.tagline
                .as_deref()
                .map(|t| format!("<p>{}</p>", escape_html(t))),
        );
        ctx.insert_opt(
            "hero_style",
            page.hero_image.as_deref().map(|img| {
                format!(
                    r#" style="background-image: url('{}')""#,
                    escape_html(img)
                )
            }),
        );

        let content = self.templates.render("page", &ctx)?;
        self.render_document(&page.meta, &content)
    }

    /// Render the authoring index listing every article.
    pub fn render_editor_list(&self, articles: &[Article], error: Option<&str>) -> Result<String> {
        let rows = if articles.is_empty() {
            r#"<p class="empty">No articles yet.</p>"#.to_string()
        } else {
            let mut rows = String::from(
                "<table>\n<thead><tr><th>Title</th><th>Status</th><th>Updated</th></tr></thead>\n<tbody>\n",
            );
            for article in articles {
                rows.push_str(&format!(
                    "<tr><td><a href=\"/editeur/{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&article.slug),
                    escape_html(&article.title),
                    if article.published { "Published" } else { "Draft" },
                    article.updated_at.format("%Y-%m-%d %H:%M"),
                ));
            }
            rows.push_str("</tbody>\n</table>");
            rows
        };

        let mut ctx = TemplateContext::new().with_var("rows", rows);
        ctx.insert_opt("error", error.map(error_html));
        let content = self.templates.render("editor_list", &ctx)?;

        let meta = MetadataBuilder::new(&self.site).editor("Articles", "/editeur");
        self.render_document(&meta, &content)
    }

    /// Render the article form; `None` renders the blank creation form.
    pub fn render_editor_form(&self, article: Option<&Article>, error: Option<&str>) -> Result<String> {
        let (heading, action) = match article {
            Some(a) => ("Edit Article", format!("/editeur/{}", a.slug)),
            None => ("New Article", "/editeur/new".to_string()),
        };
        let field = |f: fn(&Article) -> String| article.map(f).unwrap_or_default();

        let mut ctx = TemplateContext::new()
            .with_var("heading", heading)
            .with_var("action", escape_html(&action))
            .with_var("title", escape_html(&field(|a| a.title.clone())))
            .with_var("content", escape_html(&field(|a| a.content.clone())))
            .with_var(
                "meta_description",
                escape_html(&field(|a| a.meta().description)),
            )
            .with_var("category", escape_html(&field(|a| a.category.clone())))
            .with_var(
                "subcategory",
                escape_html(&field(|a| a.subcategory.clone().unwrap_or_default())),
            )
            .with_var("tags", escape_html(&field(|a| a.tags.clone())))
            .with_var(
                "alt_text",
                escape_html(&field(|a| a.alt_text.clone().unwrap_or_default())),
            );
        ctx.insert_opt("error", error.map(error_html));

        if let Some(article) = article {
            if let Some(image) = article.image_url.as_deref().filter(|i| !i.is_empty()) {
                ctx.insert(
                    "current_image",
                    format!(
                        r#"<p><img src="{}" alt="{}" width="240"></p>"#,
                        escape_html(image),
                        escape_html(article.alt_text.as_deref().unwrap_or_default()),
                    ),
                );
            }
            if article.published {
                ctx.insert("published_checked", " checked");
            }
            ctx.insert(
                "delete_form",
                format!(
                    r#"<form method="post" action="/editeur/{}/delete"><button type="submit">Delete</button></form>"#,
                    escape_html(&article.slug)
                ),
            );
        }

        let content = self.templates.render("editor_form", &ctx)?;
        let meta = MetadataBuilder::new(&self.site).editor(heading, &action);
        self.render_document(&meta, &content)
    }

    fn render_document(&self, meta: &PageMeta, content: &str) -> Result<String> {
        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&lang_tag(&self.site.language)))
            .with_var("title", escape_html(&meta.title))
            .with_var("description", escape_html(&meta.description))
            .with_var("robots", meta.robots)
            .with_var("canonical_url", escape_html(&meta.canonical_url))
            .with_var("site_name", escape_html(&meta.site_name))
            .with_var("locale", escape_html(&meta.locale))
            .with_var("og_type", meta.og_type.as_str())
            .with_var("og_image", escape_html(&meta.image.url))
            .with_var("og_image_width", meta.image.width.to_string())
            .with_var("og_image_height", meta.image.height.to_string())
            .with_var("og_image_alt", escape_html(&meta.image.alt))
            .with_var("twitter_card", meta.twitter_card)
            .with_var("content", content)
            .with_var("year", Utc::now().year().to_string());

        if !meta.keywords.is_empty() {
            ctx.insert("keywords", escape_html(&meta.keywords.join(", ")));
        }

        let mut times = String::new();
        if let Some(published) = &meta.published_time {
            times.push_str(&format!(
                r#"<meta property="article:published_time" content="{}">"#,
                escape_html(published)
            ));
        }
        if let Some(modified) = &meta.modified_time {
            times.push_str(&format!(
                r#"<meta property="article:modified_time" content="{}">"#,
                escape_html(modified)
            ));
        }
        if !times.is_empty() {
            ctx.insert("article_times", times);
        }

        let mut scripts = String::new();
        for doc in &meta.structured_data {
            scripts.push_str(&json_ld_script(&serde_json::to_string(doc)?));
        }
        if !scripts.is_empty() {
            ctx.insert("structured_data", scripts);
        }

        Ok(self.templates.render("base", &ctx)?)
    }
}

/// `en_GB` becomes `en-GB`.
fn lang_tag(locale: &str) -> String {
    locale.replace('_', "-")
}

/// Embed JSON-LD so that no string inside can close the script element.
fn json_ld_script(json: &str) -> String {
    format!(
        "<script type=\"application/ld+json\">{}</script>\n",
        json.replace("</", "<\\/")
    )
}

fn error_html(message: &str) -> String {
    format!(r#"<p class="error" role="alert">{}</p>"#, escape_html(message))
}

fn block_html(block: &Block) -> String {
    match block {
        Block::Text(text) => format!("<p>{}</p>\n", escape_html(text)),
        Block::Markup(html) => format!("<div class=\"prose\">\n{html}\n</div>\n"),
        Block::Facts(facts) => definition_list("facts", facts),
        Block::Questions(questions) => definition_list("faq", questions),
        Block::Links(section) => section_html(section),
    }
}

fn definition_list(class: &str, entries: &[(String, String)]) -> String {
    let mut html = format!("<dl class=\"{class}\">\n");
    for (term, detail) in entries {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape_html(term),
            escape_html(detail)
        ));
    }
    html.push_str("</dl>\n");
    html
}

fn section_html(section: &LinkSection) -> String {
    if section.is_empty() && section.empty_message.is_empty() {
        return String::new();
    }

    let mut html = format!("<section>\n<h2>{}</h2>\n", escape_html(&section.heading));
    if section.is_empty() {
        html.push_str(&format!(
            "<p class=\"empty\">{}</p>\n",
            escape_html(&section.empty_message)
        ));
    } else {
        html.push_str("<ul class=\"cards\">\n");
        for card in &section.cards {
            html.push_str(&card_html(card));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
    html
}

fn card_html(card: &LinkCard) -> String {
    let mut html = String::from("<li class=\"card\">");
    if let Some(image) = &card.image {
        html.push_str(&format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_html(image),
            escape_html(&card.title)
        ));
    }
    html.push_str(&format!(
        r#"<a href="{}"><h3>{}</h3>"#,
        escape_html(&card.href),
        escape_html(&card.title)
    ));
    if let Some(summary) = &card.summary {
        html.push_str(&format!("<p>{}</p>", escape_html(summary)));
    }
    html.push_str("</a></li>\n");
    html
}

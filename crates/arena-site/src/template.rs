//! HTML template system for page generation.
//!
//! A lightweight template system using string interpolation. Placeholders are
//! written `{{ name }}`; `{{ name? }}` renders empty when the variable is unset.
//! Values are inserted verbatim, so callers escape text with [`escape_html`].

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder form of [`TemplateContext::insert`].
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when a value is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template string.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace every placeholder with its value from `context`.
    ///
    /// Substituted values are never re-scanned for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim(), true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", BASE_TEMPLATE));
        registry.register(Template::new("page", PAGE_TEMPLATE));
        registry.register(Template::new("editor_list", EDITOR_LIST_TEMPLATE));
        registry.register(Template::new("editor_form", EDITOR_FORM_TEMPLATE));
        registry
    }

    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Document shell: head metadata, navigation and footer.
pub const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description }}">
    <meta name="keywords" content="{{ keywords? }}">
    <meta name="robots" content="{{ robots }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <meta property="og:title" content="{{ title }}">
    <meta property="og:description" content="{{ description }}">
    <meta property="og:url" content="{{ canonical_url }}">
    <meta property="og:site_name" content="{{ site_name }}">
    <meta property="og:locale" content="{{ locale }}">
    <meta property="og:type" content="{{ og_type }}">
    <meta property="og:image" content="{{ og_image }}">
    <meta property="og:image:width" content="{{ og_image_width }}">
    <meta property="og:image:height" content="{{ og_image_height }}">
    <meta property="og:image:alt" content="{{ og_image_alt }}">
    {{ article_times? }}
    <meta name="twitter:card" content="{{ twitter_card }}">
    <meta name="twitter:title" content="{{ title }}">
    <meta name="twitter:description" content="{{ description }}">
    <meta name="twitter:image" content="{{ og_image }}">
    <link rel="alternate" type="application/rss+xml" title="{{ site_name }} Blog" href="/blog/rss.xml">
    <style>
        :root { --accent: #d946ef; --bg: #0b0b12; --panel: #1f2030; --text: #f1f5f9; --muted: #94a3b8; }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); line-height: 1.6; }
        a { color: var(--accent); }
        .container { max-width: 1100px; margin: 0 auto; padding: 0 1.5rem; }
        header nav { display: flex; flex-wrap: wrap; gap: 1rem; padding: 1rem 0; align-items: center; }
        header .brand { font-weight: 700; font-size: 1.25rem; margin-right: auto; text-decoration: none; }
        main { padding: 2rem 0 4rem; }
        .hero { padding: 3rem 0; text-align: center; background-size: cover; background-position: center; }
        .hero h1 { font-size: 2.5rem; color: var(--accent); }
        .hero p { color: var(--muted); font-size: 1.25rem; }
        section { margin: 2rem 0; }
        section h2 { margin-bottom: 1rem; }
        .cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; list-style: none; }
        .card { background: var(--panel); border-radius: 0.5rem; overflow: hidden; }
        .card img { width: 100%; height: 140px; object-fit: cover; }
        .card a { display: block; padding: 1rem; text-decoration: none; color: var(--text); }
        .card p { color: var(--muted); font-size: 0.9rem; }
        .empty { color: var(--muted); font-style: italic; }
        dl.faq dt { font-weight: 600; margin-top: 1rem; }
        dl.faq dd { color: var(--muted); }
        footer { border-top: 1px solid var(--panel); padding: 2rem 0; color: var(--muted); font-size: 0.875rem; }
    </style>
    {{ structured_data? }}
</head>
<body>
    <header>
        <div class="container">
            <nav>
                <a class="brand" href="/">{{ site_name }}</a>
                <a href="/activities">Activities</a>
                <a href="/location">Locations</a>
                <a href="/event">Events</a>
                <a href="/offers">Offers</a>
                <a href="/blog">Blog</a>
                <a href="/booking-now">Book Now</a>
            </nav>
        </div>
    </header>
    <main>
        <div class="container">
{{ content }}
        </div>
    </main>
    <footer>
        <div class="container">
            <p>&copy; {{ year }} {{ site_name }} &middot; <a href="/legal/privacy">Privacy</a> &middot; <a href="/legal/tc">Terms</a> &middot; <a href="/contact">Contact</a></p>
        </div>
    </footer>
</body>
</html>"##;

/// Public page body: hero followed by rendered blocks.
pub const PAGE_TEMPLATE: &str = r#"<article class="page">
    <section class="hero"{{ hero_style? }}>
        <h1>{{ heading }}</h1>
        {{ subheading? }}
    </section>
{{ blocks }}
</article>"#;

/// Authoring index.
pub const EDITOR_LIST_TEMPLATE: &str = r#"<section class="editor">
    <h1>Articles</h1>
    {{ error? }}
    <p><a href="/editeur/new">New article</a></p>
    {{ rows }}
</section>"#;

/// Authoring form for create (`/editeur/new`) and update.
pub const EDITOR_FORM_TEMPLATE: &str = r#"<section class="editor">
    <h1>{{ heading }}</h1>
    {{ error? }}
    <form method="post" action="{{ action }}" enctype="multipart/form-data">
        <p><label>Title <input type="text" name="title" value="{{ title }}" required></label></p>
        <p><label>Content <textarea name="content" rows="16">{{ content }}</textarea></label></p>
        <p><label>Meta description <input type="text" name="metaDesc" value="{{ meta_description }}"></label></p>
        <p><label>Category <input type="text" name="category" value="{{ category }}"></label></p>
        <p><label>Subcategory <input type="text" name="subcategory" value="{{ subcategory }}"></label></p>
        <p><label>Tags <input type="text" name="tags" value="{{ tags }}"></label></p>
        {{ current_image? }}
        <p><label>Image <input type="file" name="image" accept="image/*"></label></p>
        <p><label>Alt text <input type="text" name="altText" value="{{ alt_text }}"></label></p>
        <p><label><input type="checkbox" name="published"{{ published_checked? }}> Publish Article</label></p>
        <p><button type="submit">Save</button></p>
    </form>
    {{ delete_form? }}
</section>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let mut ctx = TemplateContext::new();
        ctx.insert("name", "World");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");
        let result = template.render(&TemplateContext::new()).unwrap();
        assert_eq!(result, "Hello!");

        let ctx = TemplateContext::new().with_var("suffix", ", World");
        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::MissingVariable(_))));
    }

    #[test]
    fn test_template_unclosed() {
        let template = Template::new("test", "Hello, {{ name");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::new("test", "{{ a }}");
        let ctx = TemplateContext::new().with_var("a", "{{ b }}");
        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}");
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();
        assert!(registry.get("base").is_some());
        assert!(registry.get("page").is_some());
        assert!(registry.get("editor_form").is_some());
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}

//! HTTP server: public pages, feeds, legacy redirects and the editor.

use std::sync::Arc;

use arena_core::{Catalog, Config, ContentKind};
use arena_site::{
    HtmlRenderer, PageComposer, PageModel, RobotsGenerator, RssGenerator, SitemapGenerator, pages,
    redirects,
};
use arena_store::{
    ArticleForm, ArticleStore, AuthoringWorkflow, ImageUpload, NEW_RECORD_SLUG, StoreError,
    UploadArea,
};
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, Request, State},
    http::{StatusCode, Uri, header},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, warn};

/// Largest accepted editor submission, image included.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared per-process state. Catalogs and config are read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub composer: PageComposer,
    pub authoring: AuthoringWorkflow,
    pub renderer: Arc<HtmlRenderer>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, store: Arc<dyn ArticleStore>) -> Self {
        let uploads = UploadArea::new(&config.store.upload_dir, &config.store.upload_url_prefix);
        let renderer = Arc::new(HtmlRenderer::new(config.site.clone()));
        let config = Arc::new(config);
        Self {
            composer: PageComposer::new(Arc::clone(&config), Arc::new(catalog), Arc::clone(&store)),
            authoring: AuthoringWorkflow::new(store, uploads),
            renderer,
            config,
        }
    }

    fn respond(&self, page: &PageModel) -> Response {
        let status = if page.is_found() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };
        match self.renderer.render_page(page) {
            Ok(html) => (status, html_headers(), html).into_response(),
            Err(e) => internal_error(&page.path, &e),
        }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let uploads_prefix = state.config.store.upload_url_prefix.clone();
    let uploads_dir = state.config.store.upload_dir.clone();

    let editor = Router::new()
        .route("/editeur", get(editor_list))
        .route("/editeur/{slug}", get(editor_form).post(editor_save))
        .route("/editeur/{slug}/delete", post(editor_delete))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/", get(home))
        .route("/activities", get(activities))
        .route("/activities/{slug}", get(activity))
        .route("/event", get(events))
        .route("/event/{slug}", get(event))
        .route("/location", get(locations))
        .route("/location/{slug}", get(location))
        .route("/blog", get(blog))
        .route("/blog/rss.xml", get(rss_feed))
        .route("/blog/{slug}", get(article))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .merge(editor)
        .nest_service(&uploads_prefix, ServeDir::new(uploads_dir))
        .fallback(static_page)
        .layer(middleware::from_fn(legacy_redirects))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn legacy_redirects(request: Request, next: Next) -> Response {
    match redirects::lookup(request.uri().path()) {
        Some(target) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response(),
        None => next.run(request).await,
    }
}

fn html_headers() -> [(header::HeaderName, &'static str); 1] {
    [(header::CONTENT_TYPE, "text/html; charset=utf-8")]
}

fn internal_error(path: &str, e: &dyn std::fmt::Display) -> Response {
    error!(path, error = %e, "render failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn home(State(state): State<AppState>) -> Response {
    state.respond(&state.composer.static_page(&pages::HOME))
}

async fn static_page(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    let trimmed = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
    let page = match pages::find(trimmed) {
        Some(page) => state.composer.static_page(page),
        None => state.composer.not_found(kind_for_path(path), path),
    };
    state.respond(&page)
}

async fn activities(State(state): State<AppState>) -> Response {
    state.respond(&state.composer.activities_listing())
}

async fn activity(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let page = state.composer.activity(&slug, &mut rand::thread_rng());
    state.respond(&page)
}

async fn events(State(state): State<AppState>) -> Response {
    state.respond(&state.composer.events_listing())
}

async fn event(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let page = state.composer.event(&slug, &mut rand::thread_rng());
    state.respond(&page)
}

async fn locations(State(state): State<AppState>) -> Response {
    state.respond(&state.composer.locations_listing())
}

async fn location(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    state.respond(&state.composer.location(&slug))
}

async fn blog(State(state): State<AppState>) -> Response {
    let page = state.composer.blog_listing().await;
    state.respond(&page)
}

async fn article(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let page = state.composer.article(&slug).await;
    state.respond(&page)
}

async fn rss_feed(State(state): State<AppState>) -> Response {
    let limit = state.config.blog.feed_limit;
    let articles = state.composer.blog_articles(limit).await;
    let xml = RssGenerator::new(state.config.site.clone(), limit).generate(&articles);
    ([(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")], xml).into_response()
}

async fn sitemap(State(state): State<AppState>) -> Response {
    let articles = state.composer.published_articles().await;
    let xml = SitemapGenerator::new(state.config.site.clone()).generate(
        state.composer.catalog(),
        &articles,
        Utc::now(),
    );
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
}

async fn robots(State(state): State<AppState>) -> Response {
    let txt = RobotsGenerator::new(state.config.site.clone()).generate();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], txt).into_response()
}

#[derive(Debug, Default, Deserialize)]
struct EditorQuery {
    error: Option<String>,
}

/// Redirect back to an editor screen with a message in `?error=`.
fn redirect_with_error(path: &str, message: &str) -> Response {
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC);
    Redirect::to(&format!("{path}?error={encoded}")).into_response()
}

/// Text shown to the editor for a failed operation.
fn editor_message(e: &StoreError) -> String {
    match e {
        StoreError::Validation(message) => message.clone(),
        StoreError::NotFound(_) => "Article not found".to_string(),
        StoreError::Conflict(_) => "An article with this slug already exists".to_string(),
        StoreError::Database(_) | StoreError::Io(_) => {
            "The article could not be saved. Please try again.".to_string()
        }
    }
}

async fn editor_list(State(state): State<AppState>, Query(query): Query<EditorQuery>) -> Response {
    let (articles, load_error) = match state.authoring.list_records().await {
        Ok(articles) => (articles, None),
        Err(e) => {
            warn!(error = %e, "editor listing failed");
            (Vec::new(), Some(editor_message(&e)))
        }
    };
    let message = query.error.or(load_error);
    match state.renderer.render_editor_list(&articles, message.as_deref()) {
        Ok(html) => (html_headers(), html).into_response(),
        Err(e) => internal_error("/editeur", &e),
    }
}

async fn editor_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<EditorQuery>,
) -> Response {
    let article = if slug == NEW_RECORD_SLUG {
        None
    } else {
        match state.authoring.find_record(&slug).await {
            Ok(Some(article)) => Some(article),
            Ok(None) => return redirect_with_error("/editeur", "Article not found"),
            Err(e) => {
                warn!(%slug, error = %e, "editor lookup failed");
                return redirect_with_error("/editeur", &editor_message(&e));
            }
        }
    };
    match state
        .renderer
        .render_editor_form(article.as_ref(), query.error.as_deref())
    {
        Ok(html) => (html_headers(), html).into_response(),
        Err(e) => internal_error(&format!("/editeur/{slug}"), &e),
    }
}

/// Decode the editor's multipart submission.
async fn read_form(mut multipart: Multipart) -> Result<ArticleForm, axum::extract::multipart::MultipartError> {
    let mut form = ArticleForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            form.image = Some(ImageUpload {
                file_name,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "title" => form.title = value,
            "content" => form.content = value,
            "metaDesc" => form.meta_description = value,
            "category" => form.category = value,
            "subcategory" => form.subcategory = Some(value),
            "tags" => form.tags = value,
            "altText" => form.alt_text = Some(value),
            "published" => form.published = matches!(value.as_str(), "on" | "true" | "1"),
            other => warn!(field = other, "ignoring unknown editor field"),
        }
    }
    Ok(form)
}

async fn editor_save(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Response {
    let back = format!("/editeur/{slug}");
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!(%slug, error = %e, "unreadable editor submission");
            return redirect_with_error(&back, "The form could not be read. Please try again.");
        }
    };

    if slug == NEW_RECORD_SLUG {
        return match state.authoring.create_record(form).await {
            Ok(new_slug) => Redirect::to(&format!("/editeur/{new_slug}")).into_response(),
            Err(e) => {
                warn!(error = %e, "article creation rejected");
                redirect_with_error(&back, &editor_message(&e))
            }
        };
    }

    let existing = match state.authoring.find_record(&slug).await {
        Ok(Some(article)) => article,
        Ok(None) => return redirect_with_error("/editeur", "Article not found"),
        Err(e) => return redirect_with_error(&back, &editor_message(&e)),
    };
    match state.authoring.update_record(existing.id, form).await {
        Ok(_) => Redirect::to(&back).into_response(),
        Err(e) => {
            warn!(%slug, error = %e, "article update rejected");
            redirect_with_error(&back, &editor_message(&e))
        }
    }
}

async fn editor_delete(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let article = match state.authoring.find_record(&slug).await {
        Ok(Some(article)) => article,
        Ok(None) => return redirect_with_error("/editeur", "Article not found"),
        Err(e) => return redirect_with_error("/editeur", &editor_message(&e)),
    };
    match state.authoring.delete_record(article.id).await {
        Ok(()) => Redirect::to("/editeur").into_response(),
        Err(e) => {
            warn!(%slug, error = %e, "article delete failed");
            redirect_with_error("/editeur", &editor_message(&e))
        }
    }
}

/// Content kind whose route prefix `path` falls under.
fn kind_for_path(path: &str) -> Option<ContentKind> {
    [
        ContentKind::Activity,
        ContentKind::Event,
        ContentKind::Location,
        ContentKind::Article,
    ]
    .into_iter()
    .find(|k| path.starts_with(&format!("{}/", k.route_prefix())))
}

#[cfg(test)]
mod tests {
    use arena_core::Activity;
    use arena_store::MemoryArticleStore;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "arena-test-boundary";

    fn app(upload_dir: &std::path::Path) -> Router {
        let config = Config::from_toml(&format!(
            r#"
[site]
name = "JumpArena"
domain = "https://jumparena.co.uk"
title_suffix = " | JumpArena"

[store]
upload_dir = "{}"
"#,
            upload_dir.display()
        ))
        .unwrap();
        let catalog = Catalog::new(
            vec![
                Activity {
                    slug: "dodgeball".to_string(),
                    title: "Dodgeball".to_string(),
                    description: "Throw, dodge, bounce.".to_string(),
                    image: None,
                },
                Activity {
                    slug: "parties".to_string(),
                    title: "Parties".to_string(),
                    description: "Birthday bounces.".to_string(),
                    image: None,
                },
            ],
            Vec::new(),
            Vec::new(),
        );
        create_router(AppState::new(
            config,
            catalog,
            Arc::new(MemoryArticleStore::new()),
        ))
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        send_result(response).await
    }

    async fn send_result(response: Response) -> (StatusCode, Option<String>, String) {
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8_lossy(&body).into_owned())
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, Option<String>, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap();
        send_result(app.clone().oneshot(request).await.unwrap()).await
    }

    #[tokio::test]
    async fn test_activity_page() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, _, body) = get(&app, "/activities/DodgeBall").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Dodgeball</h1>"));
        assert!(body.contains("https://jumparena.co.uk/activities/dodgeball"));
    }

    #[tokio::test]
    async fn test_missing_slug_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, _, body) = get(&app, "/activities/not-a-real-activity").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Activity Not Found"));

        let (status, _, _) = get(&app, "/blog/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = get(&app, "/no-such-page").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn test_static_pages() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, _, body) = get(&app, "/faqs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("FAQPage"));

        let (status, _, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>JumpArena</h1>"));
    }

    #[tokio::test]
    async fn test_legacy_redirects_are_permanent() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, location, _) = get(&app, "/leeds").await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("/location/leeds"));

        let (status, location, _) = get(&app, "/faqs/how-to-book").await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("/faqs"));
    }

    #[tokio::test]
    async fn test_feeds() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, _, body) = get(&app, "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Disallow: /editeur"));

        let (_, _, body) = get(&app, "/sitemap.xml").await;
        assert!(body.contains("<loc>https://jumparena.co.uk/activities/parties</loc>"));

        let (status, _, body) = get(&app, "/blog/rss.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>JumpArena Blog</title>"));
    }

    #[tokio::test]
    async fn test_editor_rejects_empty_title() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, location, _) = post_form(&app, "/editeur/new", &[("title", ""), ("content", "x")]).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(
            location.as_deref(),
            Some("/editeur/new?error=Title%20is%20required")
        );

        let (_, _, body) = get(&app, "/editeur").await;
        assert!(body.contains("No articles yet."));
    }

    #[tokio::test]
    async fn test_editor_create_publish_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let (status, location, _) = post_form(
            &app,
            "/editeur/new",
            &[
                ("title", "My First Post!"),
                ("content", "<p>Hello</p>"),
                ("metaDesc", "A first post"),
                ("published", "on"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/editeur/my-first-post"));

        let (status, _, body) = get(&app, "/blog/my-first-post").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("BlogPosting"));

        let (status, _, body) = get(&app, "/editeur/my-first-post").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Edit Article"));

        let (status, location, _) = post_form(&app, "/editeur/my-first-post/delete", &[]).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/editeur"));

        let (status, _, _) = get(&app, "/blog/my-first-post").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unpublished_article_stays_private() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        post_form(&app, "/editeur/new", &[("title", "Draft Post")]).await;

        let (status, _, _) = get(&app, "/blog/draft-post").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, _, body) = get(&app, "/blog").await;
        assert!(body.contains("No articles found. Check back later for new stories!"));

        let (status, _, body) = get(&app, "/editeur/draft-post").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Draft Post"));
    }

    #[test]
    fn test_kind_for_path() {
        assert_eq!(kind_for_path("/activities/x"), Some(ContentKind::Activity));
        assert_eq!(kind_for_path("/blog/x"), Some(ContentKind::Article));
        assert_eq!(kind_for_path("/about"), None);
    }
}

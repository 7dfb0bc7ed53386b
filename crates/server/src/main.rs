// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Extension, Form, Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, Query, State as AxumState, multipart::MultipartError,
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use earthen_api::{
    ApiError, AuthProvider, ConversionError, Credentials, CredentialsProvider,
    DEFAULT_MAX_UPLOAD_BYTES, DocumentConverter, DocxConverter, Identity, ImageStorage,
    PasswordPolicy, Session, SessionService, StoredImage, UploadError, UploadPolicy, UploadedFile,
    add_faq, add_gallery_image, add_newsletter_post, add_review, add_workshop, delete_faq,
    delete_gallery_image, delete_newsletter_post, delete_review, delete_workshop,
    provision_admin, sign_in, update_faq, update_gallery_image, update_newsletter_post,
    update_review, update_workshop,
};
use earthen_domain::{
    ActionOutcome, Faq, FaqForm, GalleryForm, GalleryImage, NewsletterForm, NewsletterPost,
    RecordIdForm, Review, ReviewForm, Workshop, WorkshopCard, WorkshopForm,
};
use earthen_persistence::{DatabaseConfig, Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use time::format_description::well_known::Iso8601;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::session::{
    cleared_session_cookie, found, require_session, resolve_session, safe_callback,
    session_cookie, session_token,
};

/// How often expired sessions are swept from the store.
const SESSION_PURGE_INTERVAL: StdDuration = StdDuration::from_secs(60 * 60);

/// Longest accepted session lifetime: one year.
const MAX_SESSION_HOURS: i64 = 24 * 365;

/// Headroom on top of the upload ceiling for multipart framing, so an
/// oversized image is rejected with a message rather than a dropped body.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Earthen Server - HTTP server for the Earthen Vessels studio site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database URL: a `SQLite` path, `file:` URI, `:memory:`, or `mysql://` URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Auth token for a hosted database.
    #[arg(long, env = "DATABASE_AUTH_TOKEN", hide_env_values = true)]
    database_auth_token: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "EARTHEN_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory for uploaded images. Images are returned inline as
    /// base64 `data:` URLs when unset.
    #[arg(long, env = "EARTHEN_UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,

    /// Public URL prefix under which `--upload-dir` is served.
    #[arg(long, env = "EARTHEN_UPLOAD_PUBLIC_PREFIX", default_value = "/uploads")]
    upload_public_prefix: String,

    /// Largest accepted image, in bytes.
    #[arg(long, env = "EARTHEN_UPLOAD_MAX_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    upload_max_bytes: usize,

    /// Login name for the first admin, created when no operator exists.
    #[arg(long, env = "EARTHEN_ADMIN_LOGIN")]
    admin_login: Option<String>,

    /// Password for the first admin.
    #[arg(long, env = "EARTHEN_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// How long a dashboard session lasts, in hours (1 to 8760).
    #[arg(
        long,
        env = "EARTHEN_SESSION_HOURS",
        default_value_t = 8,
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_HOURS)
    )]
    session_hours: i64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, one statement at a time.
    persistence: Arc<Mutex<Persistence>>,
    sessions: SessionService,
    auth_provider: Arc<dyn AuthProvider>,
    uploads: Arc<UploadPolicy>,
    converter: Arc<dyn DocumentConverter>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always `false`.
    success: bool,
    /// Error message.
    error: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    const fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

impl From<UploadError> for HttpError {
    fn from(err: UploadError) -> Self {
        let status: StatusCode = match &err {
            UploadError::Storage(cause) => {
                error!(error = %cause, "Upload storage failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            UploadError::NoFile | UploadError::NotAnImage | UploadError::TooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ConversionError> for HttpError {
    fn from(err: ConversionError) -> Self {
        let status: StatusCode = match &err {
            ConversionError::NoFile => StatusCode::BAD_REQUEST,
            ConversionError::InvalidArchive(_)
            | ConversionError::MissingBody
            | ConversionError::Read(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConversionError::Pattern(_) => {
                error!(error = %err, "Converter failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Everything the home page shows.
#[derive(Debug, Clone, Serialize)]
struct HomeResponse {
    workshops: Vec<WorkshopCard>,
    reviews: Vec<Review>,
    faqs: Vec<Faq>,
}

/// The dashboard's view: who is signed in and every collection, raw.
#[derive(Debug, Clone, Serialize)]
struct DashboardResponse {
    identity: Identity,
    /// Session expiry (ISO 8601).
    expires_at: String,
    workshops: Vec<Workshop>,
    faqs: Vec<Faq>,
    reviews: Vec<Review>,
    gallery: Vec<GalleryImage>,
    newsletter: Vec<NewsletterPost>,
}

/// Upload result.
#[derive(Debug, Clone, Serialize)]
struct UploadResponse {
    success: bool,
    #[serde(flatten)]
    image: StoredImage,
}

/// Conversion result.
#[derive(Debug, Clone, Serialize)]
struct ConvertResponse {
    success: bool,
    markdown: String,
}

/// Sign-in form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SignInForm {
    login_name: String,
    password: String,
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

/// Query string of the sign-in page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SignInQuery {
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

fn workshop_cards(workshops: &[Workshop]) -> Vec<WorkshopCard> {
    workshops.iter().map(WorkshopCard::from_workshop).collect()
}

/// Handler for GET `/api/home` endpoint.
async fn handle_home(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HomeResponse>, HttpError> {
    debug!("Handling home request");

    let mut persistence = app_state.persistence.lock().await;
    let workshops: Vec<Workshop> = persistence.list_workshops()?;
    let reviews: Vec<Review> = persistence.list_reviews()?;
    let faqs: Vec<Faq> = persistence.list_faqs()?;
    drop(persistence);

    Ok(Json(HomeResponse {
        workshops: workshop_cards(&workshops),
        reviews,
        faqs,
    }))
}

/// Handler for GET `/api/workshops` endpoint.
async fn handle_list_workshops(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<WorkshopCard>>, HttpError> {
    debug!("Handling list_workshops request");
    let workshops: Vec<Workshop> = app_state.persistence.lock().await.list_workshops()?;
    Ok(Json(workshop_cards(&workshops)))
}

/// Handler for GET `/api/reviews` endpoint.
async fn handle_list_reviews(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Review>>, HttpError> {
    debug!("Handling list_reviews request");
    Ok(Json(app_state.persistence.lock().await.list_reviews()?))
}

/// Handler for GET `/api/faqs` endpoint.
async fn handle_list_faqs(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Faq>>, HttpError> {
    debug!("Handling list_faqs request");
    Ok(Json(app_state.persistence.lock().await.list_faqs()?))
}

/// Handler for GET `/api/gallery` endpoint.
async fn handle_list_gallery(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<GalleryImage>>, HttpError> {
    debug!("Handling list_gallery request");
    Ok(Json(app_state.persistence.lock().await.list_gallery_images()?))
}

/// Handler for GET `/api/newsletter` endpoint.
async fn handle_list_newsletter(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<NewsletterPost>>, HttpError> {
    debug!("Handling list_newsletter request");
    Ok(Json(
        app_state.persistence.lock().await.list_newsletter_posts()?,
    ))
}

/// Handler for GET `/api/newsletter/{slug}` endpoint.
async fn handle_get_newsletter_post(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<NewsletterPost>, HttpError> {
    debug!(slug = %slug, "Handling get_newsletter_post request");

    let post: Option<NewsletterPost> = app_state
        .persistence
        .lock()
        .await
        .get_newsletter_post_by_slug(&slug)?;

    post.map(Json).ok_or_else(|| HttpError {
        status: StatusCode::NOT_FOUND,
        message: format!("Newsletter post '{slug}' not found"),
    })
}

/// Handler for GET `/dashboard` endpoint.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DashboardResponse>, HttpError> {
    info!(login_name = %session.identity.login_name, "Handling dashboard request");

    let expires_at: String = session
        .expires_at
        .format(&Iso8601::DEFAULT)
        .map_err(|e| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to format session expiry: {e}"),
        })?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DashboardResponse = DashboardResponse {
        identity: session.identity,
        expires_at,
        workshops: persistence.list_workshops()?,
        faqs: persistence.list_faqs()?,
        reviews: persistence.list_reviews()?,
        gallery: persistence.list_gallery_images()?,
        newsletter: persistence.list_newsletter_posts()?,
    };
    drop(persistence);

    Ok(Json(response))
}

/// Generates a handler for a dashboard form action.
///
/// Each handler takes the url-encoded form, runs the action against the
/// locked persistence handle and answers with the action outcome.
macro_rules! form_action {
    ($handler:ident, $action:ident, $form:ty) => {
        async fn $handler(
            AxumState(app_state): AxumState<AppState>,
            Form(form): Form<$form>,
        ) -> Result<Json<ActionOutcome>, HttpError> {
            info!(action = stringify!($action), "Handling dashboard action");
            let mut persistence = app_state.persistence.lock().await;
            let outcome: ActionOutcome = $action(&mut persistence, &form)?;
            Ok(Json(outcome))
        }
    };
}

form_action!(handle_add_workshop, add_workshop, WorkshopForm);
form_action!(handle_update_workshop, update_workshop, WorkshopForm);
form_action!(handle_delete_workshop, delete_workshop, RecordIdForm);
form_action!(handle_add_faq, add_faq, FaqForm);
form_action!(handle_update_faq, update_faq, FaqForm);
form_action!(handle_delete_faq, delete_faq, RecordIdForm);
form_action!(handle_add_review, add_review, ReviewForm);
form_action!(handle_update_review, update_review, ReviewForm);
form_action!(handle_delete_review, delete_review, RecordIdForm);
form_action!(handle_add_gallery_image, add_gallery_image, GalleryForm);
form_action!(handle_update_gallery_image, update_gallery_image, GalleryForm);
form_action!(handle_delete_gallery_image, delete_gallery_image, RecordIdForm);
form_action!(handle_add_newsletter_post, add_newsletter_post, NewsletterForm);
form_action!(
    handle_update_newsletter_post,
    update_newsletter_post,
    NewsletterForm
);
form_action!(
    handle_delete_newsletter_post,
    delete_newsletter_post,
    RecordIdForm
);

/// Maps a multipart read failure. Running into the body limit means the
/// file was too large, anything else is a malformed request.
fn multipart_error(err: &MultipartError, policy: &UploadPolicy) -> HttpError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(max = policy.max_bytes, "Upload ran into the body limit");
        return HttpError::from(policy.too_large());
    }
    HttpError::bad_request(format!("Malformed upload: {err}"))
}

/// Reads the named file field out of a multipart body. Other fields are
/// skipped.
///
/// The field is read chunk by chunk and abandoned as soon as it grows past
/// `policy.max_bytes`.
async fn read_file_field(
    multipart: &mut Multipart,
    name: &str,
    policy: &UploadPolicy,
) -> Result<Option<UploadedFile>, HttpError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, policy))?
    {
        if field.name() != Some(name) {
            continue;
        }

        let filename: Option<String> = field.file_name().map(str::to_string);
        let content_type: Option<String> = field.content_type().map(str::to_string);
        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(&e, policy))?
        {
            bytes.extend_from_slice(&chunk);
            policy.check_size(bytes.len())?;
        }

        return Ok(Some(UploadedFile {
            filename,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// Handler for POST `/dashboard/upload` endpoint.
///
/// Accepts an image in the `image` field.
async fn handle_upload(
    AxumState(app_state): AxumState<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpError> {
    info!("Handling upload request");

    let file: Option<UploadedFile> =
        read_file_field(&mut multipart, "image", &app_state.uploads).await?;
    let image: StoredImage = app_state.uploads.store(file)?;

    Ok(Json(UploadResponse {
        success: true,
        image,
    }))
}

/// Handler for POST `/dashboard/newsletter/convert` endpoint.
///
/// Converts a Word document in the `doc` field to Markdown.
async fn handle_convert(
    AxumState(app_state): AxumState<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ConvertResponse>, HttpError> {
    info!("Handling convert request");

    let file: UploadedFile = read_file_field(&mut multipart, "doc", &app_state.uploads)
        .await?
        .ok_or(ConversionError::NoFile)?;
    let markdown: String = app_state
        .converter
        .to_markdown(&file.bytes)
        .inspect_err(|e| warn!(error = %e, filename = ?file.filename, "Conversion failed"))?;

    Ok(Json(ConvertResponse {
        success: true,
        markdown,
    }))
}

fn escape_html(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Handler for GET `/auth/signin` endpoint.
async fn handle_sign_in_page(Query(query): Query<SignInQuery>) -> Html<String> {
    let callback: &str = safe_callback(query.callback_url.as_deref());
    Html(format!(
        concat!(
            "<!doctype html><title>Sign in</title>",
            "<form method=\"post\" action=\"/auth/signin\">",
            "<input type=\"hidden\" name=\"callbackUrl\" value=\"{}\">",
            "<label>Login <input name=\"login_name\" autocomplete=\"username\"></label>",
            "<label>Password <input name=\"password\" type=\"password\" ",
            "autocomplete=\"current-password\"></label>",
            "<button type=\"submit\">Sign in</button></form>"
        ),
        escape_html(callback)
    ))
}

/// Handler for POST `/auth/signin` endpoint.
async fn handle_sign_in(
    AxumState(app_state): AxumState<AppState>,
    Form(form): Form<SignInForm>,
) -> Result<Response, HttpError> {
    info!(login_name = %form.login_name, "Handling sign_in request");

    let credentials: Credentials = Credentials {
        login_name: form.login_name,
        password: form.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let session: Session = sign_in(
        app_state.auth_provider.as_ref(),
        &app_state.sessions,
        &mut persistence,
        &credentials,
    )
    .map_err(ApiError::from)?;
    drop(persistence);

    let cookie: HeaderValue = HeaderValue::from_str(&session_cookie(
        &session.token,
        app_state.sessions.lifetime().whole_seconds(),
    ))
    .map_err(|e| HttpError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("Failed to build session cookie: {e}"),
    })?;

    let mut response: Response = found(safe_callback(form.callback_url.as_deref()));
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// Handler for POST `/auth/signout` endpoint.
async fn handle_sign_out(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if let Some(token) = session_token(&headers) {
        let mut persistence = app_state.persistence.lock().await;
        app_state
            .sessions
            .sign_out(&mut persistence, &token)
            .map_err(ApiError::from)?;
    }

    let cookie: HeaderValue =
        HeaderValue::from_str(&cleared_session_cookie()).map_err(|e| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to build session cookie: {e}"),
        })?;

    info!("Signed out");
    let mut response: Response = found("/");
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let body_limit: usize = app_state
        .uploads
        .max_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let dashboard: Router<AppState> = Router::new()
        .route("/dashboard", get(handle_dashboard))
        .route("/dashboard/workshops/add", post(handle_add_workshop))
        .route("/dashboard/workshops/update", post(handle_update_workshop))
        .route("/dashboard/workshops/delete", post(handle_delete_workshop))
        .route("/dashboard/faqs/add", post(handle_add_faq))
        .route("/dashboard/faqs/update", post(handle_update_faq))
        .route("/dashboard/faqs/delete", post(handle_delete_faq))
        .route("/dashboard/reviews/add", post(handle_add_review))
        .route("/dashboard/reviews/update", post(handle_update_review))
        .route("/dashboard/reviews/delete", post(handle_delete_review))
        .route("/dashboard/gallery/add", post(handle_add_gallery_image))
        .route("/dashboard/gallery/update", post(handle_update_gallery_image))
        .route("/dashboard/gallery/delete", post(handle_delete_gallery_image))
        .route("/dashboard/newsletter/add", post(handle_add_newsletter_post))
        .route(
            "/dashboard/newsletter/update",
            post(handle_update_newsletter_post),
        )
        .route(
            "/dashboard/newsletter/delete",
            post(handle_delete_newsletter_post),
        )
        .route("/dashboard/newsletter/convert", post(handle_convert))
        .route("/dashboard/upload", post(handle_upload))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/api/home", get(handle_home))
        .route("/api/workshops", get(handle_list_workshops))
        .route("/api/reviews", get(handle_list_reviews))
        .route("/api/faqs", get(handle_list_faqs))
        .route("/api/gallery", get(handle_list_gallery))
        .route("/api/newsletter", get(handle_list_newsletter))
        .route("/api/newsletter/{slug}", get(handle_get_newsletter_post))
        .route("/auth/signin", get(handle_sign_in_page).post(handle_sign_in))
        .route("/auth/signout", post(handle_sign_out))
        .merge(dashboard)
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            resolve_session,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state)
}

/// Sweeps expired sessions once per `period` for as long as the server runs.
fn spawn_session_purge(app_state: AppState, period: StdDuration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker: tokio::time::Interval = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut persistence = app_state.persistence.lock().await;
            if let Err(e) = app_state.sessions.purge_expired(&mut persistence) {
                warn!(error = %e, "Failed to purge expired sessions");
            }
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before clap reads the environment
    let dotenv_path: Option<PathBuf> = dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Earthen Server");
    if let Some(path) = &dotenv_path {
        info!(path = %path.display(), "Loaded environment file");
    }

    // Connect to the database (fatal on bad configuration)
    let config: DatabaseConfig =
        DatabaseConfig::new(args.database_url.clone(), args.database_auth_token.clone())?;
    info!(database = %config.redacted(), "Connecting to database");
    let mut persistence: Persistence = Persistence::connect(&config)?;

    // Provision the first admin if asked to
    if let (Some(login), Some(password)) = (&args.admin_login, &args.admin_password) {
        let created: bool =
            provision_admin(&mut persistence, &PasswordPolicy::default(), login, password)?;
        if created {
            info!(login_name = %login, "Created initial admin operator");
        }
    } else if persistence.count_operators()? == 0 {
        warn!("No operators exist; set EARTHEN_ADMIN_LOGIN and EARTHEN_ADMIN_PASSWORD");
    }

    let storage: ImageStorage = match &args.upload_dir {
        Some(dir) => {
            info!(dir = %dir.display(), prefix = %args.upload_public_prefix, "Storing uploads on disk");
            ImageStorage::Filesystem {
                dir: dir.clone(),
                public_prefix: args.upload_public_prefix.clone(),
            }
        }
        None => {
            info!("Returning uploads inline as data URLs");
            ImageStorage::Inline
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        sessions: SessionService::new(time::Duration::hours(args.session_hours)),
        auth_provider: Arc::new(CredentialsProvider),
        uploads: Arc::new(UploadPolicy {
            max_bytes: args.upload_max_bytes,
            storage,
        }),
        converter: Arc::new(DocxConverter::new()?),
    };

    let _purge: tokio::task::JoinHandle<()> =
        spawn_session_purge(app_state.clone(), SESSION_PURGE_INTERVAL);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;

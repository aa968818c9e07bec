//! Gloria Choir Site Backend
//!
//! Serves the site's editable content from a SQLite-backed key-value store,
//! gates editing behind a shared admin password, and simulates the site's
//! contact and application forms.

mod api;
mod auth;
mod calendar;
mod companion;
mod config;
mod content;
mod errors;
mod forms;
mod models;
mod session;
mod storage;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use companion::{Companion, CompanionModel, FeedbackLog, GeminiClient};
use config::Config;
use content::{ContentStore, DocumentStore, EmptyPolicy};
use errors::AppError;
use forms::{FormKind, FormSubmitter, SimulatedPort, SubmissionPort};
use models::{ChoirEvent, GalleryPhoto, Intro, Member, Slide};
use session::AdminGate;
use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KeyValueStore>,
    pub gate: Arc<AdminGate>,
    pub slides: Arc<ContentStore<Slide>>,
    pub gallery: Arc<ContentStore<GalleryPhoto>>,
    pub members: Arc<ContentStore<Member>>,
    pub events: Arc<ContentStore<ChoirEvent>>,
    pub intro: Arc<DocumentStore<Intro>>,
    pub contact: Arc<FormSubmitter>,
    pub application: Arc<FormSubmitter>,
    pub companion: Companion,
    pub feedback: Arc<FeedbackLog>,
}

impl AppState {
    /// Open storage and build every store from `config`.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::open(&config.db_path).await?);
        let session: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::session());
        let policy = EmptyPolicy::from_flag(config.persist_empty);

        let gate = Arc::new(AdminGate::open(config.admin_password.clone(), session).await?);

        let port: Arc<dyn SubmissionPort> = Arc::new(SimulatedPort::new(config.submit_delay));
        let contact = FormSubmitter::new(
            FormKind::Contact,
            port.clone(),
            Some(config.success_display),
        );
        let application = FormSubmitter::new(FormKind::Application, port, None);

        let model = match &config.companion_api_key {
            Some(key) => {
                let client = GeminiClient::new(
                    config.companion_endpoint.clone(),
                    config.companion_model.clone(),
                    key.clone(),
                )?;
                Some(Arc::new(client) as Arc<dyn CompanionModel>)
            }
            None => None,
        };

        Ok(Self {
            gate,
            slides: Arc::new(ContentStore::open(kv.clone(), policy).await?),
            gallery: Arc::new(ContentStore::open(kv.clone(), policy).await?),
            members: Arc::new(ContentStore::open(kv.clone(), policy).await?),
            events: Arc::new(ContentStore::open(kv.clone(), policy).await?),
            intro: Arc::new(DocumentStore::open(kv.clone()).await?),
            contact,
            application,
            companion: Companion::new(model),
            feedback: Arc::new(FeedbackLog::new(kv.clone())?),
            kv,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gloria choir backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_password == "1234" {
        tracing::warn!("Using the default admin password (GLORIA_ADMIN_PASSWORD)");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::build(config).await?;

    if !state.companion.is_enabled() {
        tracing::warn!("No companion API key configured (GLORIA_COMPANION_API_KEY). Companion replies will be fallback messages");
    }

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the gate for the guard layer
    let gate = state.gate.clone();

    // Editing routes
    let admin_routes = Router::new()
        // Slides and gallery
        .route("/media", post(api::create_media))
        .route("/media/{id}", put(api::update_media))
        .route("/slides/{id}", delete(api::delete_slide))
        .route("/gallery/{id}", delete(api::delete_gallery_photo))
        // Members
        .route("/members", post(api::create_member))
        .route("/members/{id}", put(api::update_member))
        .route("/members/{id}", delete(api::delete_member))
        .route("/members/parts/{part}/sort", post(api::sort_part))
        // Events
        .route("/events", post(api::create_event))
        .route("/events/{id}", put(api::update_event))
        .route("/events/{id}", delete(api::delete_event))
        .route("/calendar/{year}/{month}/{day}/draft", get(api::day_draft))
        // Intro
        .route("/intro", put(api::update_intro))
        // Apply admin guard middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_guard_layer(gate.clone(), req, next)
        }));

    // Read-only and visitor routes
    let public_routes = Router::new()
        .route("/site", get(api::get_site))
        .route("/slides", get(api::list_slides))
        .route("/gallery", get(api::list_gallery))
        .route("/members", get(api::list_members))
        .route("/events", get(api::list_events))
        .route("/intro", get(api::get_intro))
        .route("/calendar", get(api::current_month))
        .route("/calendar/{year}/{month}", get(api::month_view))
        // Admin session
        .route("/admin/session", get(api::get_session))
        .route("/admin/login", post(api::login))
        .route("/admin/logout", post(api::logout))
        // Forms
        .route("/forms/{kind}", post(api::submit_form))
        .route("/forms/{kind}/status", get(api::form_status))
        .route("/forms/{kind}/reset", post(api::reset_form))
        // Companion
        .route("/companion/ask", post(api::ask_companion))
        .route("/companion/feedback", post(api::record_feedback));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;

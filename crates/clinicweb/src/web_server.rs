//! Public HTTP API of the clinic site.
//!
//! - `POST /api/contact`                 - contact-form submission
//! - `GET  /api/doctors[?subject=<id>]`  - doctor roster (no contact channels)
//! - `GET  /api/subjects[?locale=<code>]` - localized subject tags
//! - `GET  /api/telegram/get-updates`    - pending bot chats for onboarding
//! - `GET  /health`                      - health check

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clinicore::core::error::InquiryError;
use clinicore::i18n::{self, SubjectCatalog};
use clinicore::{
    ContactPipeline, FluentCatalog, InquiryOutcome, InquiryRequest, Messenger, PublicDoctor, ScriptIntake, Settings,
    TeloxideMessenger,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the web server.
pub struct WebState {
    pipeline: ContactPipeline,
    catalog: Arc<dyn SubjectCatalog>,
    messenger: Option<Arc<dyn Messenger>>,
}

impl WebState {
    pub fn new(
        pipeline: ContactPipeline,
        catalog: Arc<dyn SubjectCatalog>,
        messenger: Option<Arc<dyn Messenger>>,
    ) -> Self {
        Self {
            pipeline,
            catalog,
            messenger,
        }
    }

    /// Production wiring: HTTP intake client, bundled Fluent catalog and a
    /// Telegram messenger when a bot token is configured.
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let intake = Arc::new(ScriptIntake::new(settings.intake_timeout)?);
        let catalog: Arc<dyn SubjectCatalog> = Arc::new(FluentCatalog);
        let messenger: Option<Arc<dyn Messenger>> = settings
            .bot_token
            .as_ref()
            .map(|token| Arc::new(TeloxideMessenger::new(token.expose_secret())) as Arc<dyn Messenger>);

        let mut pipeline = ContactPipeline::new(Arc::new(settings), intake, catalog.clone());
        if let Some(messenger) = &messenger {
            pipeline = pipeline.with_messenger(messenger.clone());
        }

        Ok(Self::new(pipeline, catalog, messenger))
    }

    fn settings(&self) -> &Settings {
        self.pipeline.settings()
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Errors of the read endpoints, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(state: Arc<WebState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/contact", post(contact_handler))
        .route("/api/doctors", get(doctors_handler))
        .route("/api/subjects", get(subjects_handler))
        .route("/api/telegram/get-updates", get(telegram_updates_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the public web server and run until Ctrl+C / SIGTERM.
pub async fn start_web_server(port: u16, state: Arc<WebState>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(state);

    tracing::info!("Starting web server on http://{}", addr);
    tracing::info!("  POST /api/contact              - Contact form");
    tracing::info!("  GET  /api/doctors              - Doctor roster");
    tracing::info!("  GET  /api/subjects             - Subject tags");
    tracing::info!("  GET  /api/telegram/get-updates - Pending bot chats");
    tracing::info!("  GET  /health                   - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// API HANDLERS
// ============================================================================

/// POST /api/contact - submit an inquiry
///
/// The body is read as JSON whatever its content type; browsers posting
/// with `fetch` do not always label it.
async fn contact_handler(State(state): State<Arc<WebState>>, body: Bytes) -> (StatusCode, Json<InquiryOutcome>) {
    let request: InquiryRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let err = InquiryError::MalformedRequest(e.to_string());
            tracing::warn!(category = err.category(), bytes = body.len(), "Malformed contact body: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(InquiryOutcome::from(&err)));
        }
    };

    let result = state.pipeline.submit(&request).await;
    let status = match &result {
        Ok(()) => StatusCode::OK,
        Err(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(InquiryOutcome::from(&result)))
}

#[derive(Debug, Deserialize)]
struct RosterQuery {
    subject: Option<String>,
}

/// GET /api/doctors - roster without contact channels
async fn doctors_handler(
    State(state): State<Arc<WebState>>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<Vec<PublicDoctor>>, ApiError> {
    let Some(directory) = state.settings().doctors.as_ref() else {
        return Ok(Json(Vec::new()));
    };

    let roster = match query.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let tag_id: u32 = raw
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("Invalid subject: {}", raw)))?;
            directory.roster_for(tag_id)
        }
        None => directory.roster(),
    };

    Ok(Json(roster))
}

#[derive(Debug, Deserialize)]
struct SubjectsQuery {
    locale: Option<String>,
}

/// GET /api/subjects - localized subject tags
async fn subjects_handler(
    State(state): State<Arc<WebState>>,
    Query(query): Query<SubjectsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = query.locale.as_deref().unwrap_or(i18n::DEFAULT_LANG_CODE);

    state
        .catalog
        .subjects(locale)
        .map(Json)
        .ok_or_else(|| ApiError::BadRequest(format!("Unsupported locale: {}", locale)))
}

/// GET /api/telegram/get-updates - chats waiting to be onboarded
async fn telegram_updates_handler(State(state): State<Arc<WebState>>) -> Result<impl IntoResponse, ApiError> {
    let messenger = state
        .messenger
        .as_ref()
        .ok_or_else(|| ApiError::Internal("Bot token not configured".to_string()))?;

    let chats = messenger.pending_chats().await.map_err(|e| {
        tracing::error!("Failed to get Telegram updates: {}", e);
        ApiError::Internal("Failed to get updates".to_string())
    })?;

    Ok(Json(json!({ "updates": chats })))
}

/// GET /health - simple health check
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "clinicweb",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

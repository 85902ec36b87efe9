//! Thought Jar Server
//!
//! Local HTTP API for the journal core.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use thoughtjar_core::{Config, Journal, Memory, NotificationSettings, SortOrder};

/// Application state shared across handlers
struct AppState {
    journal: Journal,
}

type SharedState = Arc<RwLock<AppState>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::default();
    tracing::info!("Starting Thought Jar Server on port {}", config.server_port);
    tracing::info!("Data directory: {:?}", config.data_dir);

    // Initialize the journal and compute today's memory
    let mut journal = Journal::new(config.clone())?;
    journal.initialize()?;

    let state = Arc::new(RwLock::new(AppState { journal }));

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health))
        // Memory CRUD
        .route("/memories", get(list_memories).post(create_memory))
        .route(
            "/memories/:id",
            get(get_memory).put(update_memory).delete(delete_memory),
        )
        // Today's memory
        .route("/today", get(todays_memory))
        // Notification preferences
        .route(
            "/settings/notifications",
            get(get_notification_settings).post(set_notification_settings),
        )
        // Add CORS
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state);

    let port = config.server_port;
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

// === Handlers ===

async fn health() -> &'static str {
    "ok"
}

// --- Memory handlers ---

#[derive(Debug, Deserialize)]
struct ListMemoriesQuery {
    sort: Option<String>,
}

async fn list_memories(
    State(state): State<SharedState>,
    Query(query): Query<ListMemoriesQuery>,
) -> Result<Json<Vec<MemoryResponse>>, StatusCode> {
    let state = state.read().await;

    let sort = match query.sort.as_deref() {
        None | Some("last_added") => SortOrder::LastAdded,
        Some("first_added") => SortOrder::FirstAdded,
        Some("alphabetical") => SortOrder::Alphabetical,
        Some(_) => return Err(StatusCode::BAD_REQUEST),
    };

    let memories = state
        .journal
        .list_memories(sort)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(memories.into_iter().map(MemoryResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
struct MemoryTextRequest {
    text: String,
}

async fn create_memory(
    State(state): State<SharedState>,
    Json(req): Json<MemoryTextRequest>,
) -> Result<Json<MemoryResponse>, StatusCode> {
    let mut state = state.write().await;

    let memory = state.journal.add_memory(&req.text).map_err(|e| match e {
        thoughtjar_core::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    })?;

    Ok(Json(MemoryResponse::from(memory)))
}

async fn get_memory(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MemoryResponse>, StatusCode> {
    let state = state.read().await;

    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let memory = state
        .journal
        .get_memory(uuid)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(MemoryResponse::from(memory)))
}

async fn update_memory(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<MemoryTextRequest>,
) -> Result<Json<MemoryResponse>, StatusCode> {
    let mut state = state.write().await;

    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let memory = state
        .journal
        .update_memory(uuid, &req.text)
        .map_err(|e| match e {
            thoughtjar_core::Error::NotFound(_) => StatusCode::NOT_FOUND,
            thoughtjar_core::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        })?;

    Ok(Json(MemoryResponse::from(memory)))
}

async fn delete_memory(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut state = state.write().await;

    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    state
        .journal
        .delete_memory(uuid)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(StatusCode::NO_CONTENT)
}

// --- Today handler ---

#[derive(Debug, Serialize)]
struct TodayResponse {
    memory: Option<MemoryResponse>,
}

async fn todays_memory(
    State(state): State<SharedState>,
) -> Result<Json<TodayResponse>, StatusCode> {
    let state = state.read().await;

    let memory = state
        .journal
        .todays_memory()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(TodayResponse {
        memory: memory.map(MemoryResponse::from),
    }))
}

// --- Notification settings handlers ---

async fn get_notification_settings(
    State(state): State<SharedState>,
) -> Json<NotificationSettings> {
    let state = state.read().await;
    Json(state.journal.notification_settings())
}

async fn set_notification_settings(
    State(state): State<SharedState>,
    Json(settings): Json<NotificationSettings>,
) -> Result<Json<NotificationSettings>, StatusCode> {
    let state = state.write().await;

    state
        .journal
        .set_notification_settings(settings)
        .map_err(|e| match e {
            thoughtjar_core::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        })?;

    Ok(Json(settings))
}

// === Response types ===

#[derive(Debug, Serialize)]
struct MemoryResponse {
    id: String,
    text: String,
    created_at: String,
}

impl From<Memory> for MemoryResponse {
    fn from(m: Memory) -> Self {
        Self {
            id: m.id.to_string(),
            text: m.text,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::audit::AuditClock;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::google::GoogleSheets;
use crate::locator::{self, Located};
use crate::store::SheetStore;
use crate::updater::{self, UpdateRequest};

/// Process-wide service context shared by every request
pub struct AppState<S> {
    pub store: S,
    pub clock: AuditClock,
}

impl<S: SheetStore> AppState<S> {
    pub fn new(store: S, clock: AuditClock) -> Self {
        AppState { store, clock }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    #[serde(default)]
    user_id: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    #[serde(default)]
    row_index: Value,
    #[serde(default)]
    updates: Map<String, Value>,
    #[serde(default)]
    user_id: Value,
}

#[derive(Serialize)]
struct UpdateResponse {
    message: &'static str,
    changed: Vec<usize>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the HTTP routes over an already constructed store
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn router<S: SheetStore>(state: Arc<AppState<S>>, static_dir: Option<PathBuf>) -> Router {
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/login", post(login::<S>))
        .route("/api/update", post(update::<S>))
        .layer(CorsLayer::permissive())
        .with_state(state);

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = GoogleSheets::new(&config);
    let state = Arc::new(AppState::new(store, AuditClock::new(config.audit_offset)));
    let app = router(state, config.static_dir.clone());

    let listener = TcpListener::bind(config.bind).await?;
    log::info!("Listening on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn login<S: SheetStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> AppResult<Json<Located>> {
    let Json(body) = body.map_err(|_| AppError::Validation("Invalid request body"))?;
    if is_blank_id(&body.user_id) {
        return Err(AppError::Validation("ID Required"));
    }
    let user_id = loose_string(&body.user_id);

    let located = locator::locate(&state.store, &user_id).await?;
    Ok(Json(located))
}

async fn update<S: SheetStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> AppResult<Json<UpdateResponse>> {
    let Json(body) = body.map_err(|_| AppError::Validation("Invalid request body"))?;

    let request = UpdateRequest {
        row: loose_row(&body.row_index),
        changes: body
            .updates
            .iter()
            .map(|(field, value)| (field.clone(), loose_string(value)))
            .collect(),
        submitter: loose_string(&body.user_id),
    };

    let outcome = updater::update(&state.store, &request, &state.clock).await?;
    let message = if outcome.changed.is_empty() {
        "No changes"
    } else {
        "Updated + Logged + Highlighted"
    };

    Ok(Json(UpdateResponse {
        message,
        changed: outcome.changed,
    }))
}

/// Form fields arrive as strings, but scripted clients send numbers too
fn loose_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Missing, empty, `0` and `false` all count as no identifier
fn is_blank_id(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Positive whole row number, or 0 when absent or unusable
fn loose_row(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

//! HTTP API for chess sessions
//!
//! Thin axum layer over [`SessionRegistry`]: parse requests, lock the game,
//! call the engine, return snapshots. After every move and state read the
//! session is offered to [`Settlement`], which submits it once.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::registry::SessionRegistry;
use crate::settlement::Settlement;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chess_engine::{GameSnapshot, MoveRecord, PieceKind, Square};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub settlement: Arc<Settlement>,
}

impl AppState {
    pub fn new(registry: SessionRegistry, settlement: Settlement) -> Self {
        AppState {
            registry: Arc::new(registry),
            settlement: Arc::new(settlement),
        }
    }

    /// Registry using `config`'s game duration, logging settlement sink
    pub fn from_config(config: &ServerConfig) -> Self {
        AppState::new(
            SessionRegistry::new(config.game_config()),
            Settlement::default(),
        )
    }

    /// Hand a finished session to settlement; a session deleted meanwhile is skipped
    fn settle(&self, session_id: &str) {
        if let Err(err) = self.settlement.settle(&self.registry, session_id) {
            warn!("[API] Settlement skipped for {}: {}", session_id, err);
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub players: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    pub player: String,
    #[serde(default)]
    pub promotion: Option<PieceKind>,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub success: bool,
    #[serde(rename = "move")]
    pub record: MoveRecord,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Serialize)]
pub struct LegalMovesResponse {
    pub from: Square,
    pub destinations: Vec<Square>,
}

pub fn router(config: &ServerConfig) -> Router {
    router_with_state(AppState::from_config(config))
}

pub fn router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/chess/sessions", post(create_session))
        .route(
            "/chess/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/chess/sessions/{id}/moves", post(submit_move))
        .route("/chess/sessions/{id}/moves/{square}", get(legal_moves))
        .with_state(state)
}

async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<GameSnapshot>), ApiError> {
    let session_id = match payload.session_id {
        Some(id) if id.trim().is_empty() => {
            return Err(ApiError::BadRequest("session_id must not be empty".to_string()))
        }
        Some(id) => id,
        None => generate_session_code(),
    };

    let game = state.registry.create(&session_id, &payload.players)?;
    let snapshot = game.lock().snapshot();
    info!("[API] Created chess session {}", session_id);
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let snapshot = state.registry.with_game(&id, |game| {
        game.poll();
        game.snapshot()
    })?;
    state.settle(&id);
    Ok(Json(snapshot))
}

async fn submit_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let from = parse_square(&payload.from)?;
    let to = parse_square(&payload.to)?;

    let (record, snapshot) = state.registry.with_game(&id, |game| {
        let record = game.try_move(from, to, &payload.player, payload.promotion)?;
        Ok::<_, ApiError>((record, game.snapshot()))
    })??;
    state.settle(&id);

    debug!("[API] Session {} move {} -> {} accepted", id, from, to);
    Ok(Json(MoveResponse {
        success: true,
        record,
        snapshot,
    }))
}

async fn legal_moves(
    State(state): State<AppState>,
    Path((id, square)): Path<(String, String)>,
) -> Result<Json<LegalMovesResponse>, ApiError> {
    let from = parse_square(&square)?;
    let destinations = state
        .registry
        .with_game(&id, |game| game.legal_destinations(from))?;
    Ok(Json(LegalMovesResponse { from, destinations }))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_square(text: &str) -> Result<Square, ApiError> {
    text.parse::<Square>()
        .map_err(|err| ApiError::BadRequest(err.to_string()))
}

/// Random 8-character upper-case alphanumeric session code
fn generate_session_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    (0..8)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

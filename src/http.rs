//! HTTP surface: routes, request/response payloads, and error mapping.
//!
//! Handlers stay thin; every decision lives in the core modules, and this
//! layer only translates between HTTP and plain values.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::accounts::AccountRegistry;
use crate::deck::DeckSessions;
use crate::error::GameError;
use crate::leaderboard::Leaderboard;
use crate::store::Store;

/// The game components behind the router, sharing one injected store.
#[derive(Clone)]
pub struct AppState {
    accounts: AccountRegistry,
    decks: DeckSessions,
    leaderboard: Leaderboard,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            accounts: AccountRegistry::new(store.clone()),
            decks: DeckSessions::new(store.clone()),
            leaderboard: Leaderboard::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/start", post(start_game))
        .route("/draw", get(draw_card))
        .route("/leaderboard", get(leaderboard))
        .route("/updateLeaderboard", post(update_leaderboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct UsernameRequest {
    username: String,
}

#[derive(Debug, Deserialize)]
struct UpdateScoreRequest {
    username: String,
    points: i64,
}

#[derive(Debug, Deserialize)]
struct UsernameQuery {
    #[serde(default)]
    username: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct LoginResponse {
    points: i64,
}

#[derive(Serialize)]
struct DrawResponse {
    card: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match &self {
            GameError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::EmptyDeck => StatusCode::BAD_REQUEST,
            GameError::Store(err) => {
                warn!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

async fn index() -> &'static str {
    "Server is running"
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<MessageResponse>, GameError> {
    state.accounts.register(&request.username).await?;
    info!(username = %request.username, "user registered");
    Ok(Json(MessageResponse {
        message: "user registered",
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<LoginResponse>, GameError> {
    let points = state.accounts.login(&request.username).await?;
    info!(username = %request.username, points, "user logged in");
    Ok(Json(LoginResponse { points }))
}

async fn start_game(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<MessageResponse>, GameError> {
    state.decks.start(&query.username).await?;
    info!(username = %query.username, "game started");
    Ok(Json(MessageResponse {
        message: "game started",
    }))
}

async fn draw_card(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<DrawResponse>, GameError> {
    let card = state.decks.draw(&query.username).await?;
    info!(username = %query.username, %card, "card drawn");
    Ok(Json(DrawResponse { card }))
}

async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, i64>>, GameError> {
    let board = state.leaderboard.snapshot().await?;
    Ok(Json(board))
}

async fn update_leaderboard(
    State(state): State<AppState>,
    Json(request): Json<UpdateScoreRequest>,
) -> Result<Json<MessageResponse>, GameError> {
    state
        .accounts
        .update_score(&request.username, request.points)
        .await?;
    info!(username = %request.username, points = request.points, "score updated");
    Ok(Json(MessageResponse {
        message: "leaderboard updated",
    }))
}

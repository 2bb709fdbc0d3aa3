//! HTTP handlers for the `/tictactoe` resource.

use super::AppState;
use super::response::{ApiError, ApiResult, ok};
use super::validation::{
    CreateGameRequest, MoveRequest, MovesQuery, parse_move_number, parse_player_id,
};
use crate::games::tictactoe::{GameState, Move};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

/// `GET /tictactoe`
#[derive(Debug, Serialize)]
pub struct ListGamesResponse {
    games: Vec<String>,
}

/// `POST /tictactoe`
#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    #[serde(rename = "gameId")]
    game_id: String,
}

/// `GET /tictactoe/{game_id}`
///
/// `winner` is omitted until the game is complete, then holds the winner's
/// name or null for a draw.
#[derive(Debug, Serialize)]
pub struct GameSummaryResponse {
    players: [String; 2],
    state: GameState,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<Option<String>>,
}

/// `PUT /tictactoe/{game_id}/quit`
#[derive(Debug, Serialize)]
pub struct QuitGameResponse {
    #[serde(rename = "quitGame")]
    quit_game: String,
}

/// `GET /tictactoe/{game_id}/moves`
#[derive(Debug, Serialize)]
pub struct MovesResponse {
    moves: Vec<Move>,
}

/// `POST /tictactoe/{game_id}/{player_id}`
#[derive(Debug, Serialize)]
pub struct PostMoveResponse {
    #[serde(rename = "move")]
    move_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<String>,
}

/// Parses a JSON body whatever `Content-Type` the client sent.
fn body<T: DeserializeOwned>(payload: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(payload)
        .map_err(|e| ApiError::bad_request(format!("Failed to parse request body: {e}")))
}

/// Lists ids of games still in progress.
#[instrument(skip(state))]
pub async fn list_games(State(state): State<AppState>) -> ApiResult<ListGamesResponse> {
    let games = state.service().list_in_progress_game_ids()?;
    ok(ListGamesResponse { games })
}

/// Creates a new game.
#[instrument(skip(state, payload))]
pub async fn create_game(
    State(state): State<AppState>,
    payload: Bytes,
) -> ApiResult<CreateGameResponse> {
    let new_game = body::<CreateGameRequest>(&payload)?.validate()?;
    let game_id = state
        .service()
        .create_game(new_game.players, new_game.rows, new_game.columns)?;
    info!(game_id = %game_id, "Game created via HTTP");
    ok(CreateGameResponse { game_id })
}

/// Returns players, state, and winner of a game.
#[instrument(skip(state))]
pub async fn game_summary(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> ApiResult<GameSummaryResponse> {
    let summary = state.service().get_game_summary(&game_id)?;
    let winner = (*summary.state() == GameState::Complete).then(|| summary.winner().clone());
    ok(GameSummaryResponse {
        players: summary.players().clone(),
        state: *summary.state(),
        winner,
    })
}

/// Quits a game.
#[instrument(skip(state))]
pub async fn quit_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> ApiResult<QuitGameResponse> {
    let quit_game = state.service().quit_game(&game_id)?;
    ok(QuitGameResponse { quit_game })
}

/// Lists a window of a game's moves.
#[instrument(skip(state))]
pub async fn list_moves(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Query(query): Query<MovesQuery>,
) -> ApiResult<MovesResponse> {
    let (start, until) = query.window()?;
    let moves = state.service().list_moves(&game_id, start, until)?;
    ok(MovesResponse { moves })
}

/// Returns one move.
#[instrument(skip(state))]
pub async fn get_move(
    State(state): State<AppState>,
    Path((game_id, move_number)): Path<(String, String)>,
) -> ApiResult<Move> {
    let move_number = parse_move_number(&move_number)?;
    let mv = state.service().get_move(&game_id, move_number)?;
    ok(mv)
}

/// Plays a move for `player_id`.
#[instrument(skip(state, payload))]
pub async fn post_move(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(String, String)>,
    payload: Bytes,
) -> ApiResult<PostMoveResponse> {
    let coordinates = body::<MoveRequest>(&payload)?.validate()?;
    let player = parse_player_id(&player_id)?;

    let receipt =
        state
            .service()
            .apply_player_move(&game_id, player, coordinates.row, coordinates.col)?;

    ok(PostMoveResponse {
        move_ref: receipt.move_ref().clone(),
        winner: receipt.winner().clone(),
    })
}

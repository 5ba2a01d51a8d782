use crate::errors::AppError;
use crate::grid::build_grid;
use crate::models::{
    CurrentUserResponse, EnrollRequest, EnrollResponse, GridQuery, GridResponse, MembersResponse,
    RosterSource, SelectUserRequest, SessionDetailResponse, SettingsRequest, SettingsResponse,
};
use crate::roster;
use crate::sheets;
use crate::state::{AppState, Board};
use crate::storage::{persist_store, KEY_CURRENT_USER, KEY_SHEETS_API_KEY, KEY_SHEETS_WRITE_URL};
use crate::ui;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use tracing::info;

pub async fn index() -> Html<&'static str> {
    Html(ui::page())
}

pub async fn get_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<GridResponse>, AppError> {
    let board = state.board.lock().await;
    let highlight = query
        .member
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    Ok(Json(build_grid(
        &state.docs.layout,
        &state.docs.catalog,
        &board.roster,
        highlight,
    )))
}

pub async fn get_members(State(state): State<AppState>) -> Json<MembersResponse> {
    let board = state.board.lock().await;
    Json(MembersResponse {
        source: board.source,
        members: board.roster.members.clone(),
    })
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SessionDetailResponse>, AppError> {
    let session = state
        .docs
        .catalog
        .find(&code)
        .ok_or_else(|| AppError::not_found(format!("unknown session '{code}'")))?;
    let time = state
        .docs
        .layout
        .time_slots
        .iter()
        .find(|slot| slot.id == session.time_slot)
        .map(|slot| slot.time.clone())
        .unwrap_or_default();

    let board = state.board.lock().await;
    Ok(Json(SessionDetailResponse {
        code: session.code.clone(),
        name: session.name.clone(),
        speaker: session.speaker.clone(),
        time,
        room: session.room.clone(),
        no_replay: session.no_replay,
        common: roster::is_common(&session.code),
        attendees: roster::attendees_of(&board.roster, &session.code),
    }))
}

pub async fn get_user(State(state): State<AppState>) -> Json<CurrentUserResponse> {
    let board = state.board.lock().await;
    Json(CurrentUserResponse {
        name: board.store.get(KEY_CURRENT_USER).map(str::to_string),
    })
}

pub async fn set_user(
    State(state): State<AppState>,
    Json(payload): Json<SelectUserRequest>,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("member name must not be empty"));
    }

    let mut board = state.board.lock().await;
    if board.roster.find(name).is_none() {
        return Err(AppError::bad_request(format!("unknown member '{name}'")));
    }
    board.store.set(KEY_CURRENT_USER, name);
    persist_store(&state.state_path, &board.store).await?;

    Ok(Json(CurrentUserResponse {
        name: Some(name.to_string()),
    }))
}

pub async fn clear_user(
    State(state): State<AppState>,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let mut board = state.board.lock().await;
    board.store.remove(KEY_CURRENT_USER);
    persist_store(&state.state_path, &board.store).await?;
    Ok(Json(CurrentUserResponse { name: None }))
}

pub async fn enroll(
    State(state): State<AppState>,
    Json(payload): Json<EnrollRequest>,
) -> Result<Json<EnrollResponse>, AppError> {
    apply_enrollment(&state, &payload.code, true).await.map(Json)
}

pub async fn drop_session(
    State(state): State<AppState>,
    Json(payload): Json<EnrollRequest>,
) -> Result<Json<EnrollResponse>, AppError> {
    apply_enrollment(&state, &payload.code, false)
        .await
        .map(Json)
}

/// Validate, persist, then mutate. A failed write (remote or local) leaves
/// the in-memory roster exactly as it was.
async fn apply_enrollment(
    state: &AppState,
    code: &str,
    add: bool,
) -> Result<EnrollResponse, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::bad_request("session code must not be empty"));
    }
    let session = state
        .docs
        .catalog
        .find(code)
        .ok_or_else(|| AppError::bad_request(format!("unknown session '{code}'")))?;
    if roster::is_common(code) {
        return Err(AppError::bad_request(format!(
            "'{}' is a logistics entry and is not enrollable",
            session.name
        )));
    }

    let mut board = state.board.lock().await;
    let user = board
        .store
        .get(KEY_CURRENT_USER)
        .map(str::to_string)
        .ok_or_else(|| AppError::bad_request("no member selected"))?;
    let current = board
        .roster
        .find(&user)
        .ok_or_else(|| AppError::bad_request(format!("member '{user}' is not in the roster")))?
        .sessions
        .clone();

    let planned = if add {
        roster::with_session(&current, code)
    } else {
        roster::without_session(&current, code)
    };
    let Some(next) = planned else {
        return Ok(EnrollResponse {
            member: user,
            code: code.to_string(),
            changed: false,
            sessions: current,
        });
    };

    match state.sheets.write_url(&board.store) {
        Some(write_url) => {
            sheets::push_member(&state.http, &write_url, &user, &next).await?;
            info!("wrote {} sessions for '{user}' to remote roster", next.len());
        }
        // a sheet-backed roster without a write endpoint is read-only
        None if board.source == RosterSource::Remote => {
            return Err(AppError::bad_request(
                "the member sheet is read-only: no write endpoint configured",
            ));
        }
        None => {
            let mut updated = board.roster.clone();
            if let Some(member) = updated.find_mut(&user) {
                member.sessions = next.clone();
            }
            board.store.set_roster_snapshot(&updated)?;
            persist_store(&state.state_path, &board.store).await?;
        }
    }

    if let Some(member) = board.roster.find_mut(&user) {
        member.sessions = next.clone();
    }

    Ok(EnrollResponse {
        member: user,
        code: code.to_string(),
        changed: true,
        sessions: next,
    })
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let board = state.board.lock().await;
    Json(settings_response(&state, &board))
}

pub async fn save_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let mut board = state.board.lock().await;
    let mut changed = false;

    if let Some(api_key) = payload.api_key.as_deref() {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::bad_request("credential must not be empty"));
        }
        board.store.set(KEY_SHEETS_API_KEY, api_key);
        changed = true;
    }
    if let Some(write_url) = payload.write_url.as_deref() {
        let write_url = write_url.trim();
        reqwest::Url::parse(write_url)
            .map_err(|err| AppError::bad_request(format!("invalid write endpoint: {err}")))?;
        board.store.set(KEY_SHEETS_WRITE_URL, write_url);
        changed = true;
    }
    if !changed {
        return Err(AppError::bad_request("nothing to save"));
    }

    persist_store(&state.state_path, &board.store).await?;
    reload_roster(&state, &mut board).await;

    Ok(Json(settings_response(&state, &board)))
}

pub async fn clear_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let mut board = state.board.lock().await;
    board.store.remove(KEY_SHEETS_API_KEY);
    board.store.remove(KEY_SHEETS_WRITE_URL);
    persist_store(&state.state_path, &board.store).await?;
    reload_roster(&state, &mut board).await;

    Ok(Json(settings_response(&state, &board)))
}

async fn reload_roster(state: &AppState, board: &mut Board) {
    let (roster, source) = sheets::resolve_roster(
        &state.http,
        &state.sheets,
        &board.store,
        &state.docs.roster,
    )
    .await;
    board.roster = roster;
    board.source = source;
}

fn settings_response(state: &AppState, board: &Board) -> SettingsResponse {
    SettingsResponse {
        sheets_configured: state.sheets.read_configured(&board.store),
        write_configured: state.sheets.write_url(&board.store).is_some(),
        roster_source: board.source,
    }
}

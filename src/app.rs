use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/grid", get(handlers::get_grid))
        .route("/api/members", get(handlers::get_members))
        .route("/api/sessions/:code", get(handlers::get_session))
        .route(
            "/api/user",
            get(handlers::get_user)
                .post(handlers::set_user)
                .delete(handlers::clear_user),
        )
        .route("/api/enroll", post(handlers::enroll))
        .route("/api/drop", post(handlers::drop_session))
        .route(
            "/api/settings",
            get(handlers::get_settings)
                .post(handlers::save_settings)
                .delete(handlers::clear_settings),
        )
        .with_state(state)
}

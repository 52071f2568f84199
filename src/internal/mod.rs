use axum::Router;

use crate::state::AppState;

pub(crate) mod extractors;
pub mod handlers;

pub fn router() -> Router<AppState> {
    handlers::internal_routes()
}

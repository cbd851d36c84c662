//! REST endpoint handlers organized by audience.

pub mod admin;
pub mod contact;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the public and admin routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(contact::routes())
        .merge(admin::routes())
}

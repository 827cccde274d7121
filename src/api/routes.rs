//! API route configuration.
//!
//! Every route here acts on behalf of the owner resolved by
//! [`crate::api::middleware::CurrentOwner`].

use crate::api::handlers::{
    create_redirect_handler, delete_redirect_handler, get_redirect_handler,
    list_redirects_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Owner-scoped management routes.
///
/// # Endpoints
///
/// - `GET    /redirects`          - List the owner's redirects
/// - `POST   /redirects`          - Shorten a URL
/// - `GET    /redirects/{short}`  - Fetch one redirect
/// - `DELETE /redirects/{short}`  - Delete one redirect
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/redirects",
            get(list_redirects_handler).post(create_redirect_handler),
        )
        .route(
            "/redirects/{short}",
            get(get_redirect_handler).delete(delete_redirect_handler),
        )
}

//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    auth::{AuthState, LogInState, auth_guard, get_current_user, post_log_in},
    endpoints,
    entry::{self, EntryTable},
    source, user,
};

/// Return a router with all the app's routes.
///
/// Everything except the log-in route sits behind the bearer token guard.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN, post(post_log_in))
        .with_state(LogInState::from_ref(&state));

    let protected_routes = Router::new()
        .route(endpoints::AUTH, get(get_current_user))
        .merge(entry::router(
            EntryTable::Income,
            state.db_connection.clone(),
        ))
        .merge(entry::router(
            EntryTable::Outcome,
            state.db_connection.clone(),
        ))
        .merge(source::router(state.db_connection.clone()))
        .merge(user::router(state.db_connection.clone()))
        .layer(middleware::from_fn_with_state(
            AuthState::from_ref(&state),
            auth_guard,
        ));

    protected_routes.merge(unprotected_routes)
}

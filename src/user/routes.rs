//! The API routes for managing users.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rusqlite::Connection;

use crate::{
    Error,
    database_id::DatabaseId,
    db::lock_database,
    endpoints::{self, format_endpoint},
    user::{
        db::{delete_user, get_all_users, get_user, insert_user, update_user},
        domain::{User, UserData},
    },
};

/// The state needed for the user endpoints.
#[derive(Clone)]
pub struct UserEndpointState {
    /// The database connection holding the user table.
    pub db_connection: Arc<Mutex<Connection>>,
}

/// Return a router with the user CRUD routes.
pub fn router(db_connection: Arc<Mutex<Connection>>) -> Router {
    Router::new()
        .route(
            endpoints::USERS,
            get(list_users_endpoint).post(create_user_endpoint),
        )
        .route(
            endpoints::USER,
            get(get_user_endpoint)
                .put(update_user_endpoint)
                .delete(delete_user_endpoint),
        )
        .with_state(UserEndpointState { db_connection })
}

async fn list_users_endpoint(
    State(state): State<UserEndpointState>,
) -> Result<Json<Vec<User>>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_all_users(&connection).map(Json)
}

async fn get_user_endpoint(
    State(state): State<UserEndpointState>,
    Path(id): Path<DatabaseId>,
) -> Result<Json<User>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_user(id, &connection).map(Json)
}

async fn create_user_endpoint(
    State(state): State<UserEndpointState>,
    Json(data): Json<UserData>,
) -> Result<Response, Error> {
    // Any client-supplied ID is ignored, the database assigns one.
    let new_user = data.to_new_user()?;

    let connection = lock_database(&state.db_connection)?;
    let user = insert_user(&new_user, &connection)?;

    let location = format_endpoint(endpoints::USER, user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    )
        .into_response())
}

async fn update_user_endpoint(
    State(state): State<UserEndpointState>,
    Path(id): Path<DatabaseId>,
    Json(data): Json<UserData>,
) -> Result<StatusCode, Error> {
    if data.id != id {
        return Err(Error::PathIdMismatch {
            path: id,
            body: data.id,
        });
    }

    let new_user = data.to_new_user()?;

    let connection = lock_database(&state.db_connection)?;
    update_user(id, &new_user, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_user_endpoint(
    State(state): State<UserEndpointState>,
    Path(id): Path<DatabaseId>,
) -> Result<StatusCode, Error> {
    let connection = lock_database(&state.db_connection)?;
    delete_user(id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

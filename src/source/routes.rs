//! The API routes for managing sources.

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
    source::{
        db::{create_source, delete_source, get_all_sources, get_source, update_source},
        domain::{Source, SourceData, SourceName},
    },
};

/// The state needed for the source endpoints.
#[derive(Clone)]
pub struct SourceEndpointState {
    /// The database connection holding the source table.
    pub db_connection: Arc<Mutex<Connection>>,
}

/// Return a router with the source CRUD routes.
pub fn router(db_connection: Arc<Mutex<Connection>>) -> Router {
    Router::new()
        .route(
            endpoints::SOURCES,
            get(list_sources_endpoint).post(create_source_endpoint),
        )
        .route(
            endpoints::SOURCE,
            get(get_source_endpoint)
                .put(update_source_endpoint)
                .delete(delete_source_endpoint),
        )
        .with_state(SourceEndpointState { db_connection })
}

async fn list_sources_endpoint(
    State(state): State<SourceEndpointState>,
) -> Result<Json<Vec<Source>>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_all_sources(&connection).map(Json)
}

async fn get_source_endpoint(
    State(state): State<SourceEndpointState>,
    Path(id): Path<DatabaseId>,
) -> Result<Json<Source>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_source(id, &connection).map(Json)
}

async fn create_source_endpoint(
    State(state): State<SourceEndpointState>,
    Json(data): Json<SourceData>,
) -> Result<Response, Error> {
    // Any client-supplied ID is ignored, the database assigns one.
    let name = SourceName::new(&data.name)?;

    let connection = lock_database(&state.db_connection)?;
    let source = create_source(name, &connection)?;

    let location = format_endpoint(endpoints::SOURCE, source.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(source),
    )
        .into_response())
}

async fn update_source_endpoint(
    State(state): State<SourceEndpointState>,
    Path(id): Path<DatabaseId>,
    Json(data): Json<SourceData>,
) -> Result<StatusCode, Error> {
    if data.id != id {
        return Err(Error::PathIdMismatch {
            path: id,
            body: data.id,
        });
    }

    let name = SourceName::new(&data.name)?;

    let connection = lock_database(&state.db_connection)?;
    update_source(id, name, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_source_endpoint(
    State(state): State<SourceEndpointState>,
    Path(id): Path<DatabaseId>,
) -> Result<StatusCode, Error> {
    let connection = lock_database(&state.db_connection)?;
    delete_source(id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

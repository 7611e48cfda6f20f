//! The API routes shared by the income and outcome collections.
//!
//! [router] is instantiated once per [EntryTable], so the same handlers
//! serve `/api/incomes` and `/api/outcomes`.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rusqlite::Connection;

use crate::{
    Error,
    database_id::DatabaseId,
    db::lock_database,
    endpoints::format_endpoint,
    entry::{
        db::{
            delete_entry, get_all_entry_views, get_entry_view, get_entry_views_by_source,
            get_total, get_total_in_range, insert_entry, update_entry,
        },
        domain::{DateRange, EntryData, EntryTable, EntryView},
    },
};

/// The state needed for the income and outcome endpoints.
#[derive(Clone)]
pub struct EntryEndpointState {
    /// The database connection holding the entry tables.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The table this instance of the routes operates on.
    pub table: EntryTable,
}

/// Return a router with the CRUD and aggregation routes for `table`.
pub fn router(table: EntryTable, db_connection: Arc<Mutex<Connection>>) -> Router {
    let routes = table.endpoints();

    Router::new()
        .route(
            routes.collection,
            get(list_entries_endpoint).post(create_entry_endpoint),
        )
        .route(
            routes.item,
            get(get_entry_endpoint)
                .put(update_entry_endpoint)
                .delete(delete_entry_endpoint),
        )
        .route(routes.total, get(total_endpoint))
        .route(routes.total_by_month, get(total_by_month_endpoint))
        .route(routes.total_by_year, get(total_by_year_endpoint))
        .route(routes.total_by_range, post(total_by_range_endpoint))
        .route(routes.by_source, get(entries_by_source_endpoint))
        .with_state(EntryEndpointState {
            db_connection,
            table,
        })
}

async fn list_entries_endpoint(
    State(state): State<EntryEndpointState>,
) -> Result<Json<Vec<EntryView>>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_all_entry_views(state.table, &connection).map(Json)
}

async fn get_entry_endpoint(
    State(state): State<EntryEndpointState>,
    Path(id): Path<DatabaseId>,
) -> Result<Json<EntryView>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_entry_view(state.table, id, &connection).map(Json)
}

async fn create_entry_endpoint(
    State(state): State<EntryEndpointState>,
    Json(data): Json<EntryData>,
) -> Result<Response, Error> {
    // Any client-supplied ID is ignored, the database assigns one.
    let new_entry = data.to_new_entry()?;

    let connection = lock_database(&state.db_connection)?;
    let id = insert_entry(state.table, &new_entry, &connection)?;
    let view = get_entry_view(state.table, id, &connection)?;

    let location = format_endpoint(state.table.endpoints().item, id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(view),
    )
        .into_response())
}

async fn update_entry_endpoint(
    State(state): State<EntryEndpointState>,
    Path(id): Path<DatabaseId>,
    Json(data): Json<EntryData>,
) -> Result<StatusCode, Error> {
    if data.id != id {
        return Err(Error::PathIdMismatch {
            path: id,
            body: data.id,
        });
    }

    let new_entry = data.to_new_entry()?;

    let connection = lock_database(&state.db_connection)?;
    update_entry(state.table, id, &new_entry, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_entry_endpoint(
    State(state): State<EntryEndpointState>,
    Path(id): Path<DatabaseId>,
) -> Result<StatusCode, Error> {
    let connection = lock_database(&state.db_connection)?;
    delete_entry(state.table, id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn entries_by_source_endpoint(
    State(state): State<EntryEndpointState>,
    Path(source_id): Path<DatabaseId>,
) -> Result<Json<Vec<EntryView>>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_entry_views_by_source(state.table, source_id, &connection).map(Json)
}

async fn total_endpoint(State(state): State<EntryEndpointState>) -> Result<Json<f64>, Error> {
    let connection = lock_database(&state.db_connection)?;

    get_total(state.table, &connection).map(Json)
}

async fn total_by_month_endpoint(
    State(state): State<EntryEndpointState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<f64>, Error> {
    let range = DateRange::month(year, month)?;

    let connection = lock_database(&state.db_connection)?;

    get_total_in_range(state.table, range, &connection).map(Json)
}

async fn total_by_year_endpoint(
    State(state): State<EntryEndpointState>,
    Path(year): Path<i32>,
) -> Result<Json<f64>, Error> {
    let range = DateRange::year(year)?;

    let connection = lock_database(&state.db_connection)?;

    get_total_in_range(state.table, range, &connection).map(Json)
}

async fn total_by_range_endpoint(
    State(state): State<EntryEndpointState>,
    Json(range): Json<DateRange>,
) -> Result<Json<f64>, Error> {
    // Reversed ranges are rejected before any query runs.
    range.validate()?;

    let connection = lock_database(&state.db_connection)?;

    get_total_in_range(state.table, range, &connection).map(Json)
}

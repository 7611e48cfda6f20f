//! Database operations shared by income and outcome records.
//!
//! Every function takes the [EntryTable] it should run against, the income
//! and outcome tables are structurally identical.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    entry::domain::{DateRange, EntryTable, EntryView, NewEntry},
    source::source_exists,
};

/// Initialize an entry table and its date index.
pub fn create_entry_table(
    table: EntryTable,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    connection.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY,
            source_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            date_received TEXT NOT NULL,
            FOREIGN KEY(source_id) REFERENCES source(id)
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_date_received ON {table}(date_received);",
        table = table.table_name()
    ))?;

    Ok(())
}

/// Create a record and return its generated ID.
///
/// # Errors
/// Returns [Error::InvalidForeignKey] if the referenced source does not
/// exist. The check runs before the insert so no orphan rows are written.
pub fn insert_entry(
    table: EntryTable,
    new_entry: &NewEntry,
    connection: &Connection,
) -> Result<DatabaseId, Error> {
    ensure_source_exists(new_entry.source_id, connection)?;

    connection.execute(
        &format!(
            "INSERT INTO {} (source_id, amount, date_received) VALUES (?1, ?2, ?3)",
            table.table_name()
        ),
        (
            new_entry.source_id,
            new_entry.amount.as_f64(),
            new_entry.date_received.to_string(),
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Retrieve a single record joined with its source name.
pub fn get_entry_view(
    table: EntryTable,
    id: DatabaseId,
    connection: &Connection,
) -> Result<EntryView, Error> {
    connection
        .prepare(&format!(
            "{} WHERE {}.id = :id",
            select_view_clause(table),
            table.table_name()
        ))?
        .query_row(&[(":id", &id)], map_view_row)
        .map_err(|error| error.into())
}

/// Retrieve all records joined with their source names, in ID order.
pub fn get_all_entry_views(
    table: EntryTable,
    connection: &Connection,
) -> Result<Vec<EntryView>, Error> {
    connection
        .prepare(&format!(
            "{} ORDER BY {}.id ASC",
            select_view_clause(table),
            table.table_name()
        ))?
        .query_map([], map_view_row)?
        .map(|maybe_view| maybe_view.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the records attributed to one source, in ID order.
pub fn get_entry_views_by_source(
    table: EntryTable,
    source_id: DatabaseId,
    connection: &Connection,
) -> Result<Vec<EntryView>, Error> {
    connection
        .prepare(&format!(
            "{} WHERE {table}.source_id = :source_id ORDER BY {table}.id ASC",
            select_view_clause(table),
            table = table.table_name()
        ))?
        .query_map(&[(":source_id", &source_id)], map_view_row)?
        .map(|maybe_view| maybe_view.map_err(|error| error.into()))
        .collect()
}

/// Replace a record's fields.
///
/// # Errors
/// Returns [Error::InvalidForeignKey] if the new source does not exist and
/// [Error::NotFound] if the record itself doesn't. The latter also covers a
/// record deleted between the caller's read and this write, the UPDATE
/// affecting zero rows is the re-check.
pub fn update_entry(
    table: EntryTable,
    id: DatabaseId,
    new_entry: &NewEntry,
    connection: &Connection,
) -> Result<(), Error> {
    ensure_source_exists(new_entry.source_id, connection)?;

    let rows_affected = connection.execute(
        &format!(
            "UPDATE {} SET source_id = ?1, amount = ?2, date_received = ?3 WHERE id = ?4",
            table.table_name()
        ),
        (
            new_entry.source_id,
            new_entry.amount.as_f64(),
            new_entry.date_received.to_string(),
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a record by ID. Returns an error if the record doesn't exist.
pub fn delete_entry(
    table: EntryTable,
    id: DatabaseId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        &format!("DELETE FROM {} WHERE id = ?1", table.table_name()),
        [id],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Sum the amounts over the whole table. An empty table sums to zero.
pub fn get_total(table: EntryTable, connection: &Connection) -> Result<f64, Error> {
    let total = connection
        .prepare(&format!(
            "SELECT COALESCE(SUM(amount), 0) FROM {}",
            table.table_name()
        ))?
        .query_row([], |row| row.get(0))?;

    Ok(total)
}

/// Sum the amounts over the records dated within `range`, inclusive of both
/// ends. An empty result set sums to zero.
pub fn get_total_in_range(
    table: EntryTable,
    range: DateRange,
    connection: &Connection,
) -> Result<f64, Error> {
    let total = connection
        .prepare(&format!(
            "SELECT COALESCE(SUM(amount), 0) FROM {} WHERE date_received BETWEEN ?1 AND ?2",
            table.table_name()
        ))?
        .query_row(
            [range.start.to_string(), range.end.to_string()],
            |row| row.get(0),
        )?;

    Ok(total)
}

// A 'not found' error does not make sense on a write, so the missing source
// is reported as an invalid foreign key instead.
fn ensure_source_exists(source_id: DatabaseId, connection: &Connection) -> Result<(), Error> {
    if source_exists(source_id, connection)? {
        Ok(())
    } else {
        Err(Error::InvalidForeignKey)
    }
}

fn select_view_clause(table: EntryTable) -> String {
    let table = table.table_name();

    format!(
        "SELECT {table}.id, {table}.source_id, source.name, {table}.amount, {table}.date_received \
         FROM {table} JOIN source ON {table}.source_id = source.id"
    )
}

fn map_view_row(row: &Row) -> Result<EntryView, rusqlite::Error> {
    Ok(EntryView {
        id: row.get(0)?,
        source_id: row.get(1)?,
        source_name: row.get(2)?,
        amount: row.get(3)?,
        date_received: row.get(4)?,
    })
}

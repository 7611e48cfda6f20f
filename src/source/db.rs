//! Database operations for sources.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    source::domain::{Source, SourceName},
};

/// Initialize the source table.
pub fn create_source_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS source (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

/// Create a source and return it with its generated ID.
pub fn create_source(name: SourceName, connection: &Connection) -> Result<Source, Error> {
    connection.execute("INSERT INTO source (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Source { id, name })
}

/// Retrieve a single source by ID.
pub fn get_source(id: DatabaseId, connection: &Connection) -> Result<Source, Error> {
    connection
        .prepare("SELECT id, name FROM source WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all sources ordered by ID.
pub fn get_all_sources(connection: &Connection) -> Result<Vec<Source>, Error> {
    connection
        .prepare("SELECT id, name FROM source ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_source| maybe_source.map_err(|error| error.into()))
        .collect()
}

/// Check whether a source with the given ID exists.
pub fn source_exists(id: DatabaseId, connection: &Connection) -> Result<bool, Error> {
    let exists: bool = connection
        .prepare("SELECT EXISTS(SELECT 1 FROM source WHERE id = :id);")?
        .query_row(&[(":id", &id)], |row| row.get(0))?;

    Ok(exists)
}

/// Check whether any income or outcome still references the source.
///
/// This runs as an explicit query rather than relying on a foreign key
/// trigger so the delete endpoint can answer with an informative message.
pub fn source_in_use(id: DatabaseId, connection: &Connection) -> Result<bool, Error> {
    let in_use: bool = connection
        .prepare(
            "SELECT EXISTS(SELECT 1 FROM income WHERE source_id = :id) \
             OR EXISTS(SELECT 1 FROM outcome WHERE source_id = :id);",
        )?
        .query_row(&[(":id", &id)], |row| row.get(0))?;

    Ok(in_use)
}

/// Rename a source. Returns an error if the source doesn't exist.
pub fn update_source(
    id: DatabaseId,
    new_name: SourceName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE source SET name = ?1 WHERE id = ?2",
        (new_name.as_ref(), id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a source by ID.
///
/// Returns [Error::SourceInUse] while any income or outcome references the
/// source, leaving the source and its referencing records unchanged, and
/// [Error::NotFound] if the source doesn't exist.
pub fn delete_source(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
    if source_in_use(id, connection)? {
        return Err(Error::SourceInUse);
    }

    let rows_affected = connection.execute("DELETE FROM source WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Source, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = SourceName::new_unchecked(&raw_name);

    Ok(Source { id, name })
}

#[cfg(test)]
mod source_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        entry::{Amount, EntryTable, NewEntry, insert_entry},
        source::domain::SourceName,
    };

    use super::{
        create_source, delete_source, get_all_sources, get_source, source_exists, source_in_use,
        update_source,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    #[test]
    fn create_source_succeeds() {
        let connection = get_test_db_connection();
        let name = SourceName::new("Positively a source").unwrap();

        let source = create_source(name.clone(), &connection).expect("Could not create source");

        assert!(source.id > 0);
        assert_eq!(source.name, name);
    }

    #[test]
    fn get_source_succeeds() {
        let connection = get_test_db_connection();
        let inserted_source =
            create_source(SourceName::new_unchecked("Salary"), &connection).unwrap();

        let selected_source = get_source(inserted_source.id, &connection);

        assert_eq!(Ok(inserted_source), selected_source);
    }

    #[test]
    fn get_source_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted_source =
            create_source(SourceName::new_unchecked("Salary"), &connection).unwrap();

        let selected_source = get_source(inserted_source.id + 123, &connection);

        assert_eq!(selected_source, Err(Error::NotFound));
    }

    #[test]
    fn get_all_sources_returns_every_source() {
        let connection = get_test_db_connection();
        let first = create_source(SourceName::new_unchecked("Salary"), &connection).unwrap();
        let second = create_source(SourceName::new_unchecked("Rent"), &connection).unwrap();

        let sources = get_all_sources(&connection).unwrap();

        assert_eq!(sources, vec![first, second]);
    }

    #[test]
    fn source_exists_reports_presence() {
        let connection = get_test_db_connection();
        let source = create_source(SourceName::new_unchecked("Salary"), &connection).unwrap();

        assert_eq!(source_exists(source.id, &connection), Ok(true));
        assert_eq!(source_exists(source.id + 123, &connection), Ok(false));
    }

    #[test]
    fn update_source_succeeds() {
        let connection = get_test_db_connection();
        let source = create_source(SourceName::new_unchecked("Salry"), &connection).unwrap();

        let new_name = SourceName::new_unchecked("Salary");
        let result = update_source(source.id, new_name.clone(), &connection);

        assert!(result.is_ok());

        let updated_source = get_source(source.id, &connection).unwrap();
        assert_eq!(updated_source.name, new_name);
    }

    #[test]
    fn update_source_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = update_source(999999, SourceName::new_unchecked("Salary"), &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_source_succeeds() {
        let connection = get_test_db_connection();
        let source = create_source(SourceName::new_unchecked("Salary"), &connection).unwrap();

        let result = delete_source(source.id, &connection);

        assert!(result.is_ok());
        assert_eq!(get_source(source.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_source_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = delete_source(999999, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_source_referenced_by_income_is_rejected() {
        let connection = get_test_db_connection();
        let source = create_source(SourceName::new_unchecked("Salary"), &connection).unwrap();

        insert_entry(
            EntryTable::Income,
            &NewEntry {
                source_id: source.id,
                amount: Amount::new_unchecked(1000.0),
                date_received: date!(2025 - 01 - 15),
            },
            &connection,
        )
        .unwrap();

        assert_eq!(source_in_use(source.id, &connection), Ok(true));
        assert_eq!(
            delete_source(source.id, &connection),
            Err(Error::SourceInUse)
        );
        // The source must be left untouched by the failed delete.
        assert!(get_source(source.id, &connection).is_ok());
    }

    #[test]
    fn delete_source_referenced_by_outcome_is_rejected() {
        let connection = get_test_db_connection();
        let source = create_source(SourceName::new_unchecked("Rent"), &connection).unwrap();

        insert_entry(
            EntryTable::Outcome,
            &NewEntry {
                source_id: source.id,
                amount: Amount::new_unchecked(850.0),
                date_received: date!(2025 - 07 - 15),
            },
            &connection,
        )
        .unwrap();

        assert_eq!(
            delete_source(source.id, &connection),
            Err(Error::SourceInUse)
        );
    }
}

/*! This module creates the application's database schema and seed data. */

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    entry::{EntryTable, create_entry_table},
    source::create_source_table,
    user::{create_user_table, seed_default_admin},
};

/// Create the application tables and seed the default admin user.
///
/// All statements run inside a single exclusive transaction so a partially
/// initialized schema is never left behind. Safe to call on an already
/// initialized database.
///
/// # Errors
/// Returns an error if a table could not be created or the seed insert fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_source_table(&transaction)?;
    create_entry_table(EntryTable::Income, &transaction)?;
    create_entry_table(EntryTable::Outcome, &transaction)?;
    seed_default_admin(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Acquire the shared database connection.
///
/// A poisoned lock means another request panicked while holding the
/// connection, which is logged and reported as [Error::DatabaseLockError].
pub(crate) fn lock_database(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

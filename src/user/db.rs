//! Database operations for users.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    user::domain::{NewUser, User, Username},
};

/// Initialize the user table.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            password TEXT NOT NULL,
            email_address TEXT NOT NULL,
            role TEXT NOT NULL,
            surname TEXT NOT NULL,
            given_name TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

/// Insert the default admin user when the user table is empty.
///
/// The admin is seeded exactly once so an operator can log in to a fresh
/// database and create real accounts.
pub fn seed_default_admin(connection: &Connection) -> Result<(), Error> {
    let user_count: i64 = connection
        .prepare("SELECT COUNT(id) FROM user")?
        .query_row([], |row| row.get(0))?;

    if user_count > 0 {
        return Ok(());
    }

    connection.execute(
        "INSERT INTO user (username, password, email_address, role, surname, given_name) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        ("admin", "admin1", "admin@admin", "Admin", "Admin", "Admin"),
    )?;

    Ok(())
}

/// Create a user and return it with its generated ID.
pub fn insert_user(new_user: &NewUser, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (username, password, email_address, role, surname, given_name) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            new_user.username.as_ref(),
            &new_user.password,
            &new_user.email_address,
            &new_user.role,
            &new_user.surname,
            &new_user.given_name,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(User {
        id,
        username: new_user.username.clone(),
        password: new_user.password.clone(),
        email_address: new_user.email_address.clone(),
        role: new_user.role.clone(),
        surname: new_user.surname.clone(),
        given_name: new_user.given_name.clone(),
    })
}

/// Retrieve a single user by ID.
pub fn get_user(id: DatabaseId, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, password, email_address, role, surname, given_name \
                  FROM user WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all users.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, username, password, email_address, role, surname, given_name \
                  FROM user ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_user| maybe_user.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a single user by case-insensitive username match.
///
/// Usernames are not unique in the table, the first match in ID order wins.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, username, password, email_address, role, surname, given_name \
             FROM user WHERE LOWER(username) = LOWER(:username) ORDER BY id ASC LIMIT 1;",
        )?
        .query_row(&[(":username", &username)], map_row)
        .map_err(|error| error.into())
}

/// Replace a user's fields. Returns an error if the user doesn't exist.
pub fn update_user(
    id: DatabaseId,
    new_user: &NewUser,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET username = ?1, password = ?2, email_address = ?3, role = ?4, \
         surname = ?5, given_name = ?6 WHERE id = ?7",
        (
            new_user.username.as_ref(),
            &new_user.password,
            &new_user.email_address,
            &new_user.role,
            &new_user.surname,
            &new_user.given_name,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a user by ID. Returns an error if the user doesn't exist.
pub fn delete_user(id: DatabaseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM user WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_username: String = row.get(1)?;

    Ok(User {
        id: row.get(0)?,
        username: Username::new_unchecked(&raw_username),
        password: row.get(2)?,
        email_address: row.get(3)?,
        role: row.get(4)?,
        surname: row.get(5)?,
        given_name: row.get(6)?,
    })
}

//! Users of the application and the routes for managing them.

mod db;
mod domain;
mod routes;

pub use db::{
    create_user_table, delete_user, get_all_users, get_user, get_user_by_username, insert_user,
    seed_default_admin, update_user,
};
pub use domain::{NewUser, User, UserData, Username};
pub use routes::{UserEndpointState, router};

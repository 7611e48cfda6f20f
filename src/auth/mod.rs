//! User authentication: token issuance, the log-in endpoint and the
//! middleware that guards the rest of the API.

mod current_user;
mod log_in;
mod middleware;
mod token;

pub use current_user::get_current_user;
pub use log_in::{Credentials, LogInState, post_log_in};
pub use middleware::{AuthState, auth_guard};
pub use token::{Claims, TOKEN_DURATION, decode_token, encode_token};

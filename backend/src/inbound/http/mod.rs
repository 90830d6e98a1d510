//! HTTP inbound adapter exposing the notes routes.

pub mod auth;
pub mod error;
pub mod notes;
pub mod pages;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Login page path; unauthenticated requests redirect here with `next` set.
pub const LOGIN_PATH: &str = "/auth/login/";
/// Notes list path; the default landing page after login and signup.
pub const NOTES_PATH: &str = "/notes/";
/// Landing page after a successful create, edit, or delete.
pub const SUCCESS_PATH: &str = "/notes/success/";

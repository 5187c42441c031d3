pub mod auth;
pub mod credential;
pub mod profile;
pub mod session;
pub mod transaction;

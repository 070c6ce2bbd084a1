pub mod auth;
pub mod authorization;
pub mod interface;
pub mod session_response;

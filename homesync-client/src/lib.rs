pub mod auth;
pub mod errors;
pub mod notify;
pub mod screens;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

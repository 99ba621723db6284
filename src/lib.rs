pub mod config;
pub mod error;
pub mod message;
pub mod panic_hook;
pub mod routes;
pub mod services;
pub mod state;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod testing;

pub use server::{app, AppState};

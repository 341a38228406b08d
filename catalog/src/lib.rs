// catalog/src/lib.rs

//! Product catalog HTTP backend.
//!
//! Products can be listed and read by anyone; creating, updating and deleting
//! them requires an `Authorization: Bearer <token>` header. Users register
//! through `/users` and exchange their credentials for a token at `/session`.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;

//! # RoomRent API
//!
//! HTTP surface for the password reset and email verification flows.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};

//! Middleware module
//!
//! This module contains HTTP middleware components

pub mod auth;

pub use auth::AuthMiddleware;

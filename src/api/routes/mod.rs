//! API Routes
//!
//! Route handlers organized by functionality.

pub mod app;
pub mod auth;
pub mod forms;
pub mod health;
pub mod templates;

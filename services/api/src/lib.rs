//! services/api/src/lib.rs
//!
//! The PersonaCart HTTP service: configuration, storage adapters and the
//! axum web layer, shared by the `api` and `openapi` binaries.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;

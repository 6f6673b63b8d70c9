//! Courseshelf API
//!
//! Axum surface over the ingestion services: multipart upload, course
//! listing/lookup, and static serving of extracted course content.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

//! Core data models for the cellar service.
//!
//! Bottles map to the `bottles` table via `sqlx::FromRow` and serialize
//! as JSON via `serde`. Request payloads live next to the model they modify.

pub mod bottle;

// models/src/lib.rs
//! Domain types shared across the hospital backend: entities, DTO
//! projections, create/patch/filter inputs and the error taxonomy.

pub mod errors;
pub mod medical;

pub use errors::{ApiError, ApiResult};

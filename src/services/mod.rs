//! Business logic services.

pub mod project;
pub mod stats;

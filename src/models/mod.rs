//! Database models for the portfolio domain.

pub mod project;

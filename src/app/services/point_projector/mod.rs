//! Projection of observations into sink records
//!
//! - [`projector`] - Field selection and record construction
//!
//! Only present, finite quantities become fields; a numeric zero is a
//! present value. Observations with no present quantity (or no time) produce
//! no record at all.

pub mod projector;

#[cfg(test)]
pub mod tests;

pub use projector::{project, project_all};

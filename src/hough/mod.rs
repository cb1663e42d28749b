//! Hough voting accumulators.
//!
//! - [`circles`] – gradient-directed centre voting with radius estimation and
//!   suppression of nearby centres.
//! - [`lines`] – classical `(ρ, θ)` voting without peak suppression.
//!
//! Both accumulators live only for the duration of one call.

pub mod circles;
pub mod lines;

pub use circles::CircleVoteParams;
pub use lines::LineAccumulator;

//! Scoring and prioritization engine for the ham-radio activity dashboard.
//!
//! Everything in this crate is pure: entities come in already fetched and
//! validated, and every computation takes `now` explicitly. No I/O, no
//! shared mutable state.

pub mod cards;
pub mod error;
pub mod hotness;
pub mod priority;
pub mod scoring;
pub mod snapshot;
pub mod temporal;
pub mod types;

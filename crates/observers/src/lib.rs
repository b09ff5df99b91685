//! Reusable observers for Radix root-finding runs.
//!
//! This crate provides [`Observer`] implementations and capability traits
//! for [`run_to_completion`].
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for generic observers
//!   ([`HasRecord`], [`HasStatus`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Trace`]: writes one line per event to any [`std::io::Write`]
//! - [`StopBelow`]: stops a run once the error is small enough
//!
//! [`Observer`]: radix_core::Observer
//! [`run_to_completion`]: radix_solvers::run_to_completion
//! [`HasRecord`]: traits::HasRecord
//! [`HasStatus`]: traits::HasStatus
//! [`CanStopEarly`]: traits::CanStopEarly

mod stop;
mod trace;
pub mod traits;

pub use stop::StopBelow;
pub use trace::Trace;

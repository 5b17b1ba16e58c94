//! Backend communication and view-model plumbing.
//!
//! # Services
//!
//! - [`analysis`] - `/upload` and `/analyze` over `fetch`
//! - [`state`] - Controller wiring into Leptos signals

pub mod analysis;
pub mod state;

pub use analysis::*;
pub use state::*;

//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the view state of the directory and the mutators that drive it.

pub mod state;

pub use state::*;

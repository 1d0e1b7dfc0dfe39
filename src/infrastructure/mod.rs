//! Infrastructure layer providing external service integrations.
//!
//! This module contains the data source adapter that fetches the club
//! collection from a file or over HTTP at startup.

pub mod persistence;

pub use persistence::*;

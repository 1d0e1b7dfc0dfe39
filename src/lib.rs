//! TCLUBS - Terminal University Club Directory Library
//!
//! A terminal-based directory browser for university clubs, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;

//! Shared model types for `pingrid`.
//!
//! Everything here is free of process and terminal IO so that the core engine
//! and the command line front end can agree on the same vocabulary.

pub mod catalog;
pub mod config;
pub mod dialect;
pub mod error;
pub mod host;

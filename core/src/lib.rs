//! # pingrid core
//!
//! The probe orchestration engine:
//!
//! * **[`diagnostics`]**: runs the reachability probe and path trace for one host.
//! * **[`table`]**: index-stable result slots, one per host.
//! * **[`render`]**: the seam the orchestrator draws frames through.
//! * **[`orchestrator`]**: one task per host, a single rendering task, joined at the end.

pub mod diagnostics;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod table;

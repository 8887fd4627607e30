//! Shared logic and types used by the daemon and the command line
//!
//! Centralized definitions for domain types and constants.

pub mod constants;
pub mod types;

//! # Command Handlers
//!
//! This module contains the command handlers for the herdctl CLI
//! application. There is a single resource today, so a single submodule.

pub mod livestock;

pub use livestock::handle_livestock_command;

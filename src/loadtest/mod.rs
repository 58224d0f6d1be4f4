//! Loadtest command handlers.
//!
//! This module contains handlers for the populate and generate commands.

pub mod generate;
pub mod populate;

//! Common types and utilities for loadtest populators.
//!
//! This crate provides the shared argument types used by the populator
//! crates, and resolves them against the selected record profile's defaults.

pub mod args;

pub use args::{CommonPopulateArgs, PopulatePlan};

//! Populate command handler.

mod run;

pub use run::run_populate;

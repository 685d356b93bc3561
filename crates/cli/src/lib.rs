//! Public library modules for the CLI crate
pub mod commands;
pub mod display;
pub mod logging;

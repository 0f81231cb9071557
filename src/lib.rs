// Public API
pub mod cli;
pub mod commands;
pub mod ui;

// Core domain types
mod config;
mod generator;
mod manifest;
mod pipeline;
mod process;
mod site;
mod venv;

// Re-export main types
pub use config::Config;
pub use manifest::{Manifest, Requirement};
pub use process::CommandError;
pub use site::{Site, SitePath};
pub use venv::Stamp;

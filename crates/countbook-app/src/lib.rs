// Library root: exposes the command layer so integration tests can drive it.

pub mod app;
pub mod cli;
pub mod config;

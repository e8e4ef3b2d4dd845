pub mod app;
pub mod config;
pub mod env;
pub mod runtime;
pub mod simulate;

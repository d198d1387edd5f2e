//! Terminal front end: configuration, logging, effect execution and rendering.
pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod ui;

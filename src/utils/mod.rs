//! Shared helpers: terminal logging and output minification.

pub mod log;
pub mod minify;

pub mod config;
pub mod format;

#[cfg(feature = "cli")]
pub mod logging;

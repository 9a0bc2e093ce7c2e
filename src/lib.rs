// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds the CLI and the terminal setup.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod passage;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::PacerError;

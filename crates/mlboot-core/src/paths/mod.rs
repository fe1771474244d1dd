//! Path utilities for the mlboot environment root.
//!
//! Everything mlboot writes lives under one root directory:
//! - the isolated virtual environment (`venv/`)
//! - the completion marker (`.bootstrap-complete`)
//! - the bootstrap log (`bootstrap.log`)
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod error;
mod layout;

pub use error::PathError;
pub use layout::{
    DEFAULT_ROOT_DIR_NAME, EnvLayout, LOG_FILE_NAME, MARKER_FILE_NAME, ROOT_ENV_VAR, VENV_DIR_NAME,
};

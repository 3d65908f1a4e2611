#![forbid(unsafe_code)]

//! Host layer for the Atelier presentation stack: CLI surface, module
//! wiring, and the little state the binary owns itself.

pub mod app;
pub mod cli;
pub mod error;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{AppError, Result};

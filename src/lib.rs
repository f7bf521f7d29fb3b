//! Match-3 board engine with a terminal shell.
//!
//! `core` holds the deterministic board logic; `term` and `input` make up the
//! interactive shell; `config` loads and validates the session configuration.

pub mod config;
pub mod core;
pub mod input;
pub mod term;
pub mod types;

//! Courier Shell
//!
//! Composes the tab shell from the workspace crates: one remote data
//! client, one theme coordinator and a controller per tab.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod shell;

pub use config::{Args, TabSelection};
pub use shell::Shell;

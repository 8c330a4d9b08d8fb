//! Hookcast command-line front end
//!
//! Loads configuration and a hook file, fires a trigger through
//! `hookcast-hooks`, and prints the delivery report.

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;

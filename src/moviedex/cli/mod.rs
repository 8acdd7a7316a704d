//! Terminal front end: argument parsing, the numbered menu and output
//! formatting. Nothing in here is reachable from the library crate.

mod commands;
pub mod menu;
mod print;
pub mod setup;

pub use commands::run;

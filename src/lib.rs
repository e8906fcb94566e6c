pub mod calendar;
pub mod cmds;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod term;
pub mod ui;

pub use error::{Error, ErrorKind, Result};

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod io;
pub mod log;
pub mod model;
pub mod slug;
pub mod summary;

pub use error::{Result, ToolError, UnknownSetType};

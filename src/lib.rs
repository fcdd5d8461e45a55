//! Core library for the liftlog command line application.
//!
//! The library keeps a catalog of exercise movements and an append-only log
//! of performed sets, both as CSV files. Identifier slugs live in
//! [`liftlog::tools::slug`], the two stores in [`liftlog::tools::catalog`] and
//! [`liftlog::tools::log`], the importer and the per-workout rollups in
//! [`liftlog::tools::import`] and [`liftlog::tools::summary`], and the
//! operations behind each CLI subcommand in [`liftlog::tools::commands`].

pub mod liftlog;

pub use liftlog::tools::{
    Result, ToolError, UnknownSetType, catalog, commands, config, error, import, io, log, model,
    slug, summary,
};

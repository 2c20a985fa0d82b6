//! Shared library module for the `spellquest` command-line front end.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
pub mod cli;
pub mod error;
pub mod puzzle_factory;
pub mod render;
pub mod session;
pub mod settings;
pub mod version;

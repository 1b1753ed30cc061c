//! Core library for the shelf catalog console.
//!
//! Configuration, session storage, the catalog data model, and the HTTP
//! client shared by the terminal UI and the command line.

pub mod api;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;

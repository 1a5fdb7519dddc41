// formguard/src/lib.rs
//! # formguard CLI
//!
//! Command-line front end for `formguard-core`: validates contact-form
//! payloads, previews sanitizers, and prints the effective field bindings.
//! The modules are exposed as a library so integration tests can exercise
//! the rendering code directly.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

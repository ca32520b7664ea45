//! sitekit - build driver and static blog generator
//!
//! This library provides functionality to:
//! - Clean, install, style and generate a site as one ordered build
//! - Run the Rust and web formatters independently of each other
//! - Render markdown posts and drafts into static HTML pages

pub mod build;
pub mod clean;
pub mod cli;
pub mod config;
pub mod exec;
pub mod format;
pub mod init;
pub mod logging;
pub mod site;
pub mod styles;
pub mod watch;

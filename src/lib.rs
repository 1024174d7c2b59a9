//! Closes a GitHub issue with a state reason, optionally posting a comment
//! first and replacing its labels.

#![allow(clippy::new_without_default)]

pub mod close;
pub mod config;
pub mod errors;
pub mod github;
pub mod host;
pub mod logger;

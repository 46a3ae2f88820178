//! CLI library components for colmap.

#![allow(missing_docs)]

pub mod config;
pub mod logging;
pub mod pipeline;

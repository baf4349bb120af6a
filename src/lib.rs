//! Panelsmith Library
//!
//! This library provides the panel slot assignment engine: layout descriptor
//! resolution, slot assignment, configuration-change reconciliation and
//! drag gesture mapping, plus the icon catalog, configuration, Markdown
//! export, the headless CLI and the optional web API.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;

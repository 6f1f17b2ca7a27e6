//! gpt-term - a terminal chat client that turns assistant replies into
//! reviewable shell commands
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod editor;
pub mod error;
pub mod models;
pub mod startup;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod widgets;

//! s3fs CLI library
//!
//! This module exports the shell components for use in integration tests.

pub mod app;
pub mod commands;
pub mod dispatcher;
pub mod exit_code;
pub mod indicator;
pub mod listener;
pub mod output;
pub mod session;

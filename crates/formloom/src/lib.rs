//! Formloom CLI
//!
//! Thin inspection shell over `formloom-core`: reads form definitions and
//! response maps as JSON, prints JSON reports on stdout.

pub mod cli;
pub mod commands;

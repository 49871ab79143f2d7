//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, unit file
//! persistence, host lookups, TCP probes, and fleet file loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod host;
pub mod installer;
pub mod network;
pub mod systemctl;
pub mod unit_store;

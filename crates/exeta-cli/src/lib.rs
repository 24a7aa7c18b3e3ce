//! Exeta CLI library.
//!
//! This crate provides the commands behind the `exeta` binary: batch sheet
//! extraction, single sprite lookup and catalog inspection, together with the
//! run configuration and console status output they share.

pub mod commands;
pub mod config;
pub mod status;

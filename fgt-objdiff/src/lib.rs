//! Command-line front end for FortiGate object comparison.
//!
//! Everything firewall-specific lives in `fgt-objdiff-core`; this crate adds the
//! TOML settings layer and terminal rendering used by the `fgt-objdiff` binary.
//!
//! - [`config`]: embedded and user-supplied comparison settings
//! - [`report`]: colored text rendering of comparison and inspection reports
//! - [`inspect`]: per-VDOM object counts of one file

pub mod config;
pub mod inspect;
pub mod report;

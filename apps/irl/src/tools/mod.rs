//! External tools: editors for opening projects and environment checks.
//!
//! - [`editor`] - Known editors, detection and launching
//! - [`doctor`] - Health checks for the `doctor` command

pub mod doctor;
pub mod editor;

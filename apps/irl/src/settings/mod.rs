//! Persistent user settings.
//!
//! - [`paths`] - Location of irl's own files (`~/.irl` or `IRL_HOME`)
//! - [`store`] - Config and profile JSON store

pub mod paths;
pub mod store;

pub use paths::IrlPaths;
pub use store::{Config, ConfigStore, EditorKind, Profile};

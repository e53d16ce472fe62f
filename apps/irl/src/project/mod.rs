//! Research project folders.
//!
//! ## Layout
//!
//! ```text
//! 250307-sleep-memory/
//! +-- plans/
//! |   +-- main-plan.md        # Marker file identifying a project
//! +-- 01-plans/               # Supporting plans and protocols
//! +-- 02-data/
//! |   +-- raw/
//! |   +-- derived/
//! +-- 03-outputs/
//! |   +-- figures/
//! +-- 04-logs/
//! |   +-- activity-log.md
//! +-- .gitignore
//! ```
//!
//! ## Modules
//!
//! - [`naming`] - `YYMMDD-slug` folder names
//! - [`scaffold`] - Layout creation, plan writing, git, placeholder filling
//! - [`scanner`] - Workspace discovery by marker file
//! - [`ops`] - Create and adopt, shared by the CLI and the wizard

pub mod naming;
pub mod ops;
pub mod scaffold;
pub mod scanner;

pub use naming::generate_name_today;
pub use ops::{AdoptRequest, CreateRequest, ProjectOutcome, adopt_folder, create_project};
pub use scanner::{Project, find_marker, scan};

/// Relative path of the plan file written for new projects.
pub const PLAN_PATH: &str = "plans/main-plan.md";

/// Accepted marker locations, in priority order.
pub const MARKER_PATHS: [&str; 3] = [PLAN_PATH, "main-plan.md", "01-plans/main-plan.md"];

/// Top-level directories created by the scaffold.
pub const SCAFFOLD_DIRS: [&str; 5] = ["plans", "01-plans", "02-data", "03-outputs", "04-logs"];

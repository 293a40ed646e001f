//! depkit - workspace discovery and vendor safety for Gopkg-style projects
//!
//! This crate locates the root of a project, assembles the parameters handed
//! to an external constraint solver, and backs up an existing vendor tree
//! before a solve is allowed to overwrite it.

pub mod core;
pub mod ops;
pub mod solver;
pub mod util;

pub use crate::core::{
    errors::ProjectError,
    manifest::{Lock, Manifest},
    project::{find_project_root, Project, ProjectRoot},
};

pub use ops::vendor::backup_vendor;
pub use solver::{Analyzer, SolveParameters};
pub use util::context::GlobalContext;

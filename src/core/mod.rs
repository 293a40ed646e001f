//! Core data structures for depkit.
//!
//! - Project identity and root discovery
//! - Manifest and lock state
//! - The error taxonomy shared by every operation

pub mod errors;
pub mod manifest;
pub mod project;

pub use errors::ProjectError;
pub use manifest::{Lock, LockedProject, Manifest, ProjectConstraint};
pub use project::{find_project_root, Project, ProjectRoot, LOCK_NAME, MANIFEST_NAME};

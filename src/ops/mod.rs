//! High-level operations.

pub mod vendor;

pub use vendor::backup_vendor;

//! Command implementations

pub mod backup_vendor;
pub mod params;
pub mod root;

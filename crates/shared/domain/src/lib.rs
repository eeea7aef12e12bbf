//! # Domain Models
//!
//! Pure data shared by every host crate: the settings document deserialized from
//! `appsettings.json`, the keys services are registered under, and well-known names.
//! Keep it lean: no I/O and no logic beyond field access.

pub mod constants;
pub mod registry;
pub mod settings;

//! Maintenance Management
//!
//! Equipment, maintenance requests, teams and personnel are held in an
//! in-memory [`Store`] seeded from a fixed data set. Every dashboard view is a
//! read over the store.

pub mod domain;
pub use domain::{
    Config, Equipment, EquipmentId, Health, MaintenanceRequest, MaintenanceStatus, MaintenanceType,
    Priority, RequestId, Role, Section, Store, Team, TeamId, User, UserId,
};

/// Local storage for the logged-in user and workspace configuration.
pub mod storage;
pub use storage::Session;

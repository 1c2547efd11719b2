//! Domain models for maintenance management.
//!
//! This module contains the entity types, the [`Store`] that owns them, and
//! the derived views computed from the store.

/// Derived aggregates: status counts, health buckets, workload.
pub mod aggregate;
pub use aggregate::{DashboardStats, HealthBucket, HealthBuckets, StatusCounts, TeamWorkload};

/// Month grid generation for the maintenance calendar.
pub mod calendar;
pub use calendar::{CalendarCell, CalendarError, YearMonth};

mod config;
pub use config::Config;

/// Equipment assets.
pub mod equipment;
pub use equipment::{Equipment, EquipmentStatus, Health, InvalidHealthError, NewEquipment};

/// Search and equality predicates over the collections.
pub mod filter;
pub use filter::{EquipmentFilter, RequestFilter, Selection, UserFilter};

/// Typed record identifiers.
pub mod id;
pub use id::{EquipmentId, RequestId, TeamId, UserId};

mod label;
pub use label::ParseEnumError;

/// Maintenance requests.
pub mod request;
pub use request::{MaintenanceRequest, MaintenanceStatus, MaintenanceType, NewRequest, Priority};

/// The fixed data set the store starts from.
pub mod seed;

mod store;
pub use store::{BoardColumn, NOT_AVAILABLE, Store, UNASSIGNED};

/// Maintenance teams.
pub mod team;
pub use team::{NewTeam, Team};

/// Personnel and navigation roles.
pub mod user;
pub use user::{NewUser, Role, Section, User};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{EquipmentId, HealthBucket, TeamId, UserId};

/// A maintained asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Unique identifier.
    pub id: EquipmentId,
    /// Display name.
    pub name: String,
    /// Manufacturer serial number, e.g. `CNC-88291`.
    pub serial_number: String,
    /// Free-form category, e.g. "Heavy Machinery".
    pub category: String,
    /// Owning site or business unit.
    pub company: String,
    /// Physical location within the site.
    pub location: String,
    /// Work center code, e.g. `WC-01`.
    pub work_center: String,
    /// Condition gauge. Set when the asset is registered; nothing recomputes
    /// it.
    pub health: Health,
    /// Whether the asset is in service.
    pub status: EquipmentStatus,
    /// Number of open requests, as recorded when the asset was registered.
    ///
    /// The live figure is [`Store::open_request_count`](crate::Store::open_request_count).
    pub open_request_count: u32,
    /// Technician assigned by default.
    pub technician_id: UserId,
    /// Responsible team.
    pub team_id: TeamId,
}

/// Whether an asset is in service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    /// In service.
    #[default]
    Active,
    /// Taken out of service.
    Scrapped,
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Scrapped => "scrapped",
        })
    }
}

/// Equipment condition, as a percentage from 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Health(u8);

impl Health {
    /// A newly registered asset.
    pub const FULL: Self = Self(100);

    /// Creates a health gauge.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHealthError`] if `value` is greater than 100.
    pub const fn new(value: u8) -> Result<Self, InvalidHealthError> {
        if value > 100 {
            Err(InvalidHealthError(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Creates a health gauge, capping `value` at 100.
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > 100 { Self::FULL } else { Self(value) }
    }

    /// The percentage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The fleet-health bucket this value falls into.
    #[must_use]
    pub const fn bucket(self) -> HealthBucket {
        HealthBucket::classify(self)
    }
}

impl TryFrom<u8> for Health {
    type Error = InvalidHealthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Health> for u8 {
    fn from(health: Health) -> Self {
        health.0
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Error returned when a health value is outside 0–100.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid health {0}: must be between 0 and 100")]
pub struct InvalidHealthError(u8);

/// The fields supplied when registering equipment.
///
/// Fields left as `None` take the registration defaults when the asset is
/// created by [`Store::create_equipment`](crate::Store::create_equipment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    /// Display name.
    pub name: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Category.
    pub category: String,
    /// Technician assigned by default, normally the user registering it.
    pub technician_id: UserId,
    /// Responsible team. Defaults to the first team in the store.
    pub team_id: Option<TeamId>,
    /// Defaults to "Main Site".
    pub company: Option<String>,
    /// Defaults to "Default".
    pub location: Option<String>,
    /// Defaults to `WC-01`.
    pub work_center: Option<String>,
}

impl NewEquipment {
    pub(crate) const DEFAULT_COMPANY: &'static str = "Main Site";
    pub(crate) const DEFAULT_LOCATION: &'static str = "Default";
    pub(crate) const DEFAULT_WORK_CENTER: &'static str = "WC-01";

    /// Creates the registration fields for an asset.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        serial_number: impl Into<String>,
        category: impl Into<String>,
        technician_id: UserId,
    ) -> Self {
        Self {
            name: name.into(),
            serial_number: serial_number.into(),
            category: category.into(),
            technician_id,
            team_id: None,
            company: None,
            location: None,
            work_center: None,
        }
    }

    /// Assigns the responsible team.
    #[must_use]
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Sets the site, location and work center.
    #[must_use]
    pub fn located_at(
        mut self,
        company: impl Into<String>,
        location: impl Into<String>,
        work_center: impl Into<String>,
    ) -> Self {
        self.company = Some(company.into());
        self.location = Some(location.into());
        self.work_center = Some(work_center.into());
        self
    }

    pub(crate) fn into_equipment(self, id: EquipmentId, default_team: TeamId) -> Equipment {
        Equipment {
            id,
            name: self.name,
            serial_number: self.serial_number,
            category: self.category,
            company: self
                .company
                .unwrap_or_else(|| Self::DEFAULT_COMPANY.to_string()),
            location: self
                .location
                .unwrap_or_else(|| Self::DEFAULT_LOCATION.to_string()),
            work_center: self
                .work_center
                .unwrap_or_else(|| Self::DEFAULT_WORK_CENTER.to_string()),
            health: Health::FULL,
            status: EquipmentStatus::Active,
            open_request_count: 0,
            technician_id: self.technician_id,
            team_id: self.team_id.unwrap_or(default_team),
        }
    }
}

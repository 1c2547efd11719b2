use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{EquipmentId, ParseEnumError, RequestId, TeamId, UserId, label::parse_label};

/// A maintenance request raised against a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// Short description of the problem or task.
    pub subject: String,
    /// The user who raised the request.
    pub requester_id: UserId,
    /// The equipment the request concerns. May be blank.
    pub equipment_id: EquipmentId,
    /// Category copied from the equipment when the request was raised.
    ///
    /// Not kept in sync with later changes to the equipment.
    pub category: String,
    /// The day the work is scheduled for.
    pub assigned_date: NaiveDate,
    /// Corrective or preventive.
    pub maintenance_type: MaintenanceType,
    /// The team the work is assigned to.
    pub team_id: TeamId,
    /// Urgency.
    pub priority: Priority,
    /// Current board column.
    pub status: MaintenanceStatus,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The fields supplied when raising a request.
///
/// The status of a new request is always [`MaintenanceStatus::New`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    /// Short description.
    pub subject: String,
    /// The user raising the request.
    pub requester_id: UserId,
    /// The equipment concerned.
    pub equipment_id: EquipmentId,
    /// Urgency.
    pub priority: Priority,
    /// Defaults to [`MaintenanceType::Corrective`].
    pub maintenance_type: Option<MaintenanceType>,
    /// Defaults to the day the request is raised.
    pub assigned_date: Option<NaiveDate>,
    /// Defaults to the first team in the store.
    pub team_id: Option<TeamId>,
    /// Free-form description.
    pub notes: Option<String>,
}

impl NewRequest {
    /// Creates the fields for a request, leaving every optional field to its
    /// default.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        requester_id: UserId,
        equipment_id: EquipmentId,
        priority: Priority,
    ) -> Self {
        Self {
            subject: subject.into(),
            requester_id,
            equipment_id,
            priority,
            maintenance_type: None,
            assigned_date: None,
            team_id: None,
            notes: None,
        }
    }

    /// Sets the maintenance type.
    #[must_use]
    pub const fn with_type(mut self, maintenance_type: MaintenanceType) -> Self {
        self.maintenance_type = Some(maintenance_type);
        self
    }

    /// Schedules the request for the given day.
    #[must_use]
    pub const fn on(mut self, date: NaiveDate) -> Self {
        self.assigned_date = Some(date);
        self
    }

    /// Assigns the request to a team.
    #[must_use]
    pub fn for_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Position of a request in its lifecycle.
///
/// The intended flow is `New → In Progress → Repaired`, with `Scrap` reachable
/// from any state. Variants are ordered as the board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    /// Raised, not yet picked up.
    New,
    /// Work under way.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work complete.
    Repaired,
    /// The equipment is to be scrapped.
    Scrap,
}

impl MaintenanceStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Repaired, Self::Scrap];

    /// The display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Repaired => "Repaired",
            Self::Scrap => "Scrap",
        }
    }

    /// Whether a request in this status counts towards a team's workload.
    ///
    /// Everything except `Repaired` is open, including `Scrap`.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Repaired)
    }
}

/// Whether the work repairs a fault or prevents one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    /// Repair of a reported fault.
    #[default]
    Corrective,
    /// Scheduled upkeep.
    Preventive,
}

impl MaintenanceType {
    /// Every maintenance type.
    pub const ALL: [Self; 2] = [Self::Corrective, Self::Preventive];

    /// The display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Corrective => "Corrective",
            Self::Preventive => "Preventive",
        }
    }
}

/// Urgency of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

macro_rules! label_traits {
    ($name:ident, $kind:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_label($kind, s, &Self::ALL, Self::label)
            }
        }
    };
}

label_traits!(MaintenanceStatus, "status");
label_traits!(MaintenanceType, "maintenance type");
label_traits!(Priority, "priority");

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("new" => MaintenanceStatus::New; "lowercase")]
    #[test_case("In Progress" => MaintenanceStatus::InProgress; "display label")]
    #[test_case("in-progress" => MaintenanceStatus::InProgress; "dashed")]
    #[test_case("REPAIRED" => MaintenanceStatus::Repaired; "uppercase")]
    #[test_case("scrap" => MaintenanceStatus::Scrap; "scrap")]
    fn status_labels_parse(input: &str) -> MaintenanceStatus {
        input.parse().unwrap()
    }

    #[test]
    fn only_repaired_is_closed() {
        let open: Vec<_> = MaintenanceStatus::ALL
            .into_iter()
            .filter(|status| status.is_open())
            .collect();
        assert_eq!(
            open,
            vec![
                MaintenanceStatus::New,
                MaintenanceStatus::InProgress,
                MaintenanceStatus::Scrap
            ]
        );
    }

    #[test]
    fn statuses_serialize_as_labels() {
        let json = serde_json::to_string(&MaintenanceStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn new_request_defaults_are_unset() {
        let fields = NewRequest::new(
            "Leaking Pipe",
            UserId::new("req2"),
            EquipmentId::new("2"),
            Priority::Medium,
        );
        assert_eq!(fields.maintenance_type, None);
        assert_eq!(fields.assigned_date, None);
        assert_eq!(fields.team_id, None);
    }
}

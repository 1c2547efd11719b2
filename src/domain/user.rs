use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{ParseEnumError, UserId, label::parse_label};

/// A member of staff known to the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// The role label, which decides which views are listed for the user.
    pub role: Role,
}

/// The fields supplied when onboarding a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Role label.
    pub role: Role,
}

impl NewUser {
    /// Creates the onboarding fields for a user.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub(crate) fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Role of a user.
///
/// Roles only decide which [`Section`]s are listed in navigation. They are a
/// label held by the client, not an access control mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Raises maintenance requests.
    Requester,
    /// Carries out maintenance work.
    Technician,
    /// Manages teams and workload.
    Manager,
    /// Full access to every view.
    Admin,
}

impl Role {
    /// Every role, least privileged first.
    pub const ALL: [Self; 4] = [
        Self::Requester,
        Self::Technician,
        Self::Manager,
        Self::Admin,
    ];

    /// The display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Requester => "Requester",
            Self::Technician => "Technician",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
        }
    }

    /// The sections listed in navigation for this role, in menu order.
    #[must_use]
    pub fn sections(self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| section.roles().contains(&self))
            .collect()
    }

    /// Whether the section is listed in navigation for this role.
    #[must_use]
    pub fn can_view(self, section: Section) -> bool {
        section.roles().contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("role", s, &Self::ALL, Self::label)
    }
}

/// A navigable view of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    /// KPIs and analytics charts.
    Dashboard,
    /// Maintenance request board.
    Maintenance,
    /// Maintenance calendar.
    Calendar,
    /// Equipment inventory.
    Equipment,
    /// Teams and personnel.
    Teams,
}

impl Section {
    /// Every section, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Maintenance,
        Self::Calendar,
        Self::Equipment,
        Self::Teams,
    ];

    /// The display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Maintenance => "Maintenance",
            Self::Calendar => "Calendar",
            Self::Equipment => "Equipment",
            Self::Teams => "Teams",
        }
    }

    const fn roles(self) -> &'static [Role] {
        match self {
            Self::Dashboard | Self::Maintenance | Self::Equipment => &Role::ALL,
            Self::Calendar => &[Role::Technician, Role::Manager, Role::Admin],
            Self::Teams => &[Role::Manager, Role::Admin],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Role::Requester => vec![Section::Dashboard, Section::Maintenance, Section::Equipment]; "requester")]
    #[test_case(Role::Technician => vec![Section::Dashboard, Section::Maintenance, Section::Calendar, Section::Equipment]; "technician")]
    #[test_case(Role::Manager => Section::ALL.to_vec(); "manager")]
    #[test_case(Role::Admin => Section::ALL.to_vec(); "admin")]
    fn sections_by_role(role: Role) -> Vec<Section> {
        role.sections()
    }

    #[test]
    fn teams_are_hidden_from_technicians() {
        assert!(!Role::Technician.can_view(Section::Teams));
        assert!(Role::Manager.can_view(Section::Teams));
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("admin".parse(), Ok(Role::Admin));
        assert_eq!("TECHNICIAN".parse(), Ok(Role::Technician));
        assert!("janitor".parse::<Role>().is_err());
    }
}

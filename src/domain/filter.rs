use std::{fmt, str::FromStr};

use crate::domain::{Equipment, MaintenanceRequest, MaintenanceStatus, Priority, TeamId, User};

/// An equality predicate that can be switched off.
///
/// Parses `"All"` (any case) as [`Selection::All`], which matches everything.
/// Any other input is parsed as the selected value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    /// The predicate is disabled.
    #[default]
    All,
    /// Only values equal to this one match.
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes the predicate.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn search_matches<'a>(search: Option<&str>, mut fields: impl Iterator<Item = &'a str>) -> bool {
    let Some(needle) = search else {
        return true;
    };
    fields.any(|field| contains_ignore_case(field, needle))
}

/// Filter for the equipment inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentFilter {
    /// Matched against name or serial number.
    pub search: Option<String>,
    /// Matched exactly against the category.
    pub category: Selection<String>,
}

impl EquipmentFilter {
    /// Whether the equipment passes every predicate.
    #[must_use]
    pub fn matches(&self, equipment: &Equipment) -> bool {
        search_matches(
            self.search.as_deref(),
            [equipment.name.as_str(), equipment.serial_number.as_str()].into_iter(),
        ) && self.category.matches(&equipment.category)
    }
}

/// Filter for maintenance requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Matched against the subject.
    pub search: Option<String>,
    /// Matched exactly against the priority.
    pub priority: Selection<Priority>,
    /// Matched exactly against the assigned team.
    pub team: Selection<TeamId>,
    /// Matched exactly against the status.
    pub status: Selection<MaintenanceStatus>,
}

impl RequestFilter {
    /// Whether the request passes every predicate.
    #[must_use]
    pub fn matches(&self, request: &MaintenanceRequest) -> bool {
        search_matches(
            self.search.as_deref(),
            std::iter::once(request.subject.as_str()),
        ) && self.priority.matches(&request.priority)
            && self.team.matches(&request.team_id)
            && self.status.matches(&request.status)
    }
}

/// Filter for the personnel directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Matched against name or email.
    pub search: Option<String>,
}

impl UserFilter {
    /// Whether the user passes the search.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        search_matches(
            self.search.as_deref(),
            [user.name.as_str(), user.email.as_str()].into_iter(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    #[test]
    fn all_sentinel_disables_the_predicate() {
        let selection: Selection<Priority> = "ALL".parse().unwrap();
        assert_eq!(selection, Selection::All);
        assert!(selection.matches(&Priority::Low));

        let selection: Selection<Priority> = "high".parse().unwrap();
        assert!(selection.matches(&Priority::High));
        assert!(!selection.matches(&Priority::Low));
    }

    #[test]
    fn invalid_selection_is_an_error() {
        assert!("urgent".parse::<Selection<Priority>>().is_err());
    }

    #[test]
    fn equipment_search_covers_name_and_serial() {
        let equipment = seed::equipment();
        let by_serial = EquipmentFilter {
            search: Some("cnc-88".to_string()),
            ..EquipmentFilter::default()
        };
        let by_name = EquipmentFilter {
            search: Some("FORKLIFT".to_string()),
            ..EquipmentFilter::default()
        };

        let names = |filter: &EquipmentFilter| -> Vec<String> {
            equipment
                .iter()
                .filter(|item| filter.matches(item))
                .map(|item| item.name.clone())
                .collect()
        };

        assert_eq!(names(&by_serial), vec!["CNC Milling Machine V2"]);
        assert_eq!(names(&by_name), vec!["Industrial Forklift"]);
    }

    #[test]
    fn predicates_are_anded() {
        let filter = EquipmentFilter {
            search: Some("machine".to_string()),
            category: Selection::Only("Utility".to_string()),
        };
        assert!(seed::equipment().iter().all(|item| !filter.matches(item)));
    }

    #[test]
    fn absent_search_matches_everything() {
        let filter = RequestFilter::default();
        assert!(seed::requests().iter().all(|r| filter.matches(r)));
    }

    #[test]
    fn empty_search_matches_everything() {
        let filter = UserFilter {
            search: Some(String::new()),
        };
        assert!(seed::users().iter().all(|user| filter.matches(user)));
    }

    #[test]
    fn user_search_covers_email() {
        let filter = UserFilter {
            search: Some("S.CONNOR@".to_string()),
        };
        let matched: Vec<_> = seed::users()
            .into_iter()
            .filter(|user| filter.matches(user))
            .map(|user| user.name)
            .collect();
        assert_eq!(matched, vec!["Sarah Connor"]);
    }
}

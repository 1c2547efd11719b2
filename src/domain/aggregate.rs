//! Read-only values derived from the store.
//!
//! Nothing here is cached. Every value is recomputed from the collections
//! each time it is asked for.

use std::{collections::BTreeMap, fmt};

use crate::domain::{Equipment, Health, MaintenanceRequest, MaintenanceStatus, Team};

/// Lower bound (inclusive) of the [`HealthBucket::Healthy`] band.
pub const HEALTHY_THRESHOLD: u8 = 70;

/// Lower bound (inclusive) of the [`HealthBucket::Warning`] band.
pub const WARNING_THRESHOLD: u8 = 40;

/// Fleet-health band of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HealthBucket {
    /// Health of 70 or more.
    Healthy,
    /// Health from 40 up to, but not including, 70.
    Warning,
    /// Health below 40.
    Critical,
}

impl HealthBucket {
    /// Every bucket, best first.
    pub const ALL: [Self; 3] = [Self::Healthy, Self::Warning, Self::Critical];

    /// Places a health value in its band.
    #[must_use]
    pub const fn classify(health: Health) -> Self {
        let value = health.value();
        if value >= HEALTHY_THRESHOLD {
            Self::Healthy
        } else if value >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// The display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for HealthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of equipment in each fleet-health band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthBuckets {
    /// Count of [`HealthBucket::Healthy`] equipment.
    pub healthy: usize,
    /// Count of [`HealthBucket::Warning`] equipment.
    pub warning: usize,
    /// Count of [`HealthBucket::Critical`] equipment.
    pub critical: usize,
}

impl HealthBuckets {
    /// Counts the equipment in each band.
    pub fn tally<'a>(equipment: impl IntoIterator<Item = &'a Equipment>) -> Self {
        let mut buckets = Self::default();
        for item in equipment {
            match item.health.bucket() {
                HealthBucket::Healthy => buckets.healthy += 1,
                HealthBucket::Warning => buckets.warning += 1,
                HealthBucket::Critical => buckets.critical += 1,
            }
        }
        buckets
    }

    /// The count for one band.
    #[must_use]
    pub const fn count(&self, bucket: HealthBucket) -> usize {
        match bucket {
            HealthBucket::Healthy => self.healthy,
            HealthBucket::Warning => self.warning,
            HealthBucket::Critical => self.critical,
        }
    }

    /// Each band with its count, best first.
    pub fn iter(&self) -> impl Iterator<Item = (HealthBucket, usize)> + '_ {
        HealthBucket::ALL
            .into_iter()
            .map(|bucket| (bucket, self.count(bucket)))
    }

    /// Total equipment counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.healthy + self.warning + self.critical
    }
}

/// Number of requests in each status.
///
/// Every status is present, with a count of zero when no request has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts(BTreeMap<MaintenanceStatus, usize>);

impl StatusCounts {
    /// Counts the requests in each status.
    pub fn tally<'a>(requests: impl IntoIterator<Item = &'a MaintenanceRequest>) -> Self {
        let mut counts: BTreeMap<_, _> = MaintenanceStatus::ALL
            .into_iter()
            .map(|status| (status, 0))
            .collect();
        for request in requests {
            *counts.entry(request.status).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// The count for one status.
    #[must_use]
    pub fn get(&self, status: MaintenanceStatus) -> usize {
        self.0.get(&status).copied().unwrap_or_default()
    }

    /// Each status with its count, in board column order.
    pub fn iter(&self) -> impl Iterator<Item = (MaintenanceStatus, usize)> + '_ {
        self.0.iter().map(|(status, count)| (*status, *count))
    }

    /// Total requests counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

/// Open requests assigned to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWorkload<'a> {
    /// The team.
    pub team: &'a Team,
    /// Requests for the team whose status is not `Repaired`.
    pub open: usize,
}

impl<'a> TeamWorkload<'a> {
    /// Counts the open requests assigned to `team`.
    pub fn for_team(
        team: &'a Team,
        requests: impl IntoIterator<Item = &'a MaintenanceRequest>,
    ) -> Self {
        let open = requests
            .into_iter()
            .filter(|request| request.team_id == team.id && request.status.is_open())
            .count();
        Self { team, open }
    }
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Requests with status `New`.
    pub new: usize,
    /// Requests with status `In Progress`.
    pub in_progress: usize,
    /// Requests with status `Repaired`.
    pub repaired: usize,
    /// Tickets awaiting completion: new plus in progress.
    pub pending: usize,
    /// Equipment in the fleet.
    pub total_equipment: usize,
    /// Fleet-health bands. The critical count drives the health alerts KPI.
    pub health: HealthBuckets,
}

impl DashboardStats {
    /// Computes the dashboard figures.
    #[must_use]
    pub fn compute(status: &StatusCounts, health: HealthBuckets) -> Self {
        let new = status.get(MaintenanceStatus::New);
        let in_progress = status.get(MaintenanceStatus::InProgress);
        Self {
            new,
            in_progress,
            repaired: status.get(MaintenanceStatus::Repaired),
            pending: new + in_progress,
            total_equipment: health.total(),
            health,
        }
    }

    /// Equipment in the critical band.
    #[must_use]
    pub const fn critical(&self) -> usize {
        self.health.critical
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(100 => HealthBucket::Healthy; "full")]
    #[test_case(70 => HealthBucket::Healthy; "healthy lower bound")]
    #[test_case(69 => HealthBucket::Warning; "just below healthy")]
    #[test_case(40 => HealthBucket::Warning; "warning lower bound")]
    #[test_case(39 => HealthBucket::Critical; "just below warning")]
    #[test_case(0 => HealthBucket::Critical; "empty")]
    fn health_bands(value: u8) -> HealthBucket {
        HealthBucket::classify(Health::new(value).unwrap())
    }

    #[test]
    fn every_health_value_is_in_exactly_one_band() {
        let mut buckets = HealthBuckets::default();
        for value in 0..=100 {
            match Health::new(value).unwrap().bucket() {
                HealthBucket::Healthy => buckets.healthy += 1,
                HealthBucket::Warning => buckets.warning += 1,
                HealthBucket::Critical => buckets.critical += 1,
            }
        }
        assert_eq!(buckets.healthy, 31);
        assert_eq!(buckets.warning, 30);
        assert_eq!(buckets.critical, 40);
        assert_eq!(buckets.total(), 101);
    }

    #[test]
    fn empty_status_counts_list_every_status() {
        let counts = StatusCounts::tally(Vec::<&MaintenanceRequest>::new());
        let statuses: Vec<_> = counts.iter().map(|(status, _)| status).collect();
        assert_eq!(statuses, MaintenanceStatus::ALL.to_vec());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn pending_is_new_plus_in_progress() {
        let stats = DashboardStats::compute(
            &StatusCounts(BTreeMap::from([
                (MaintenanceStatus::New, 2),
                (MaintenanceStatus::InProgress, 3),
                (MaintenanceStatus::Repaired, 4),
                (MaintenanceStatus::Scrap, 1),
            ])),
            HealthBuckets {
                healthy: 1,
                warning: 1,
                critical: 2,
            },
        );
        assert_eq!(stats.pending, 5);
        assert_eq!(stats.total_equipment, 4);
        assert_eq!(stats.critical(), 2);
    }
}

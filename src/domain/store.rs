//! In-memory record store for maintenance data.
//!
//! The [`Store`] is the single owner of the equipment, request, team and user
//! collections. Views read from it and submit changes through its operations;
//! nothing else holds the collections.
//!
//! References between records (a request's equipment, a team's members, ...)
//! are never enforced. Every lookup returns an `Option` and views substitute a
//! fallback label, so a dangling reference degrades a view instead of failing
//! it.

use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::Hash,
    ops::RangeInclusive,
};

use chrono::{NaiveDate, Utc};
use tracing::instrument;

use crate::domain::{
    Config, DashboardStats, Equipment, EquipmentFilter, EquipmentId, HealthBuckets,
    MaintenanceRequest, MaintenanceStatus, NewEquipment, NewRequest, NewTeam, NewUser,
    RequestFilter, RequestId, StatusCounts, Team, TeamId, TeamWorkload, User, UserFilter, UserId,
    id, seed,
};

/// Label shown for equipment whose team cannot be found.
pub const UNASSIGNED: &str = "Unassigned";

/// Label shown in table cells whose referenced record cannot be found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Team assigned to new records when the store holds no teams at all.
const FALLBACK_TEAM: &str = "1";

/// Records keyed by id, with a separate display order.
///
/// Lookups are O(1) through the map; iteration follows `order`.
#[derive(Debug, Clone)]
struct Collection<K, V> {
    items: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            order: VecDeque::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Collection<K, V> {
    fn contains(&self, id: &K) -> bool {
        self.items.contains_key(id)
    }

    fn get(&self, id: &K) -> Option<&V> {
        self.items.get(id)
    }

    /// Appends a record.
    ///
    /// # Panics
    ///
    /// Panics if a record with the same id already exists.
    fn push_back(&mut self, id: &K, value: V) -> &V {
        self.insert(id.clone(), value);
        self.order.push_back(id.clone());
        &self.items[id]
    }

    /// Prepends a record.
    ///
    /// # Panics
    ///
    /// Panics if a record with the same id already exists.
    fn push_front(&mut self, id: &K, value: V) -> &V {
        self.insert(id.clone(), value);
        self.order.push_front(id.clone());
        &self.items[id]
    }

    fn insert(&mut self, id: K, value: V) {
        let previous = self.items.insert(id, value);
        assert!(previous.is_none(), "duplicate record id");
    }

    /// Replaces the record with the same id, keeping its position.
    ///
    /// Returns `false`, leaving the collection unchanged, if there is no such
    /// record.
    fn replace(&mut self, id: &K, value: V) -> bool {
        self.items.get_mut(id).map(|slot| *slot = value).is_some()
    }

    fn first(&self) -> Option<&V> {
        self.order.front().and_then(|id| self.items.get(id))
    }

    fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// A column of the request board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    /// The status the column collects.
    pub status: MaintenanceStatus,
    /// Requests in that status, newest first.
    pub requests: Vec<&'a MaintenanceRequest>,
}

/// The maintenance record store.
///
/// Records are only ever added or replaced, never removed. Requests list
/// newest first; equipment, teams and users list in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Store {
    config: Config,
    equipment: Collection<EquipmentId, Equipment>,
    requests: Collection<RequestId, MaintenanceRequest>,
    teams: Collection<TeamId, Team>,
    users: Collection<UserId, User>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates a store holding the [`seed`] data set, with default
    /// configuration.
    #[must_use]
    pub fn seeded() -> Self {
        Self::seeded_with(Config::default())
    }

    /// Creates a store holding the [`seed`] data set.
    #[must_use]
    pub fn seeded_with(config: Config) -> Self {
        let mut store = Self::new(config);
        for user in seed::users() {
            store.insert_user(user);
        }
        for team in seed::teams() {
            store.insert_team(team);
        }
        for equipment in seed::equipment() {
            store.insert_equipment(equipment);
        }
        for request in seed::requests() {
            store.insert_request(request);
        }
        tracing::debug!(
            users = store.users.len(),
            teams = store.teams.len(),
            equipment = store.equipment.len(),
            requests = store.requests.len(),
            "seeded store"
        );
        store
    }

    /// The configuration the store was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Inserts an existing user at the end of the listing.
    ///
    /// # Panics
    ///
    /// Panics if a user with the same id already exists.
    pub fn insert_user(&mut self, user: User) {
        let id = user.id.clone();
        self.users.push_back(&id, user);
    }

    /// Inserts an existing team at the end of the listing.
    ///
    /// # Panics
    ///
    /// Panics if a team with the same id already exists.
    pub fn insert_team(&mut self, team: Team) {
        let id = team.id.clone();
        self.teams.push_back(&id, team);
    }

    /// Inserts existing equipment at the end of the listing.
    ///
    /// # Panics
    ///
    /// Panics if equipment with the same id already exists.
    pub fn insert_equipment(&mut self, equipment: Equipment) {
        let id = equipment.id.clone();
        self.equipment.push_back(&id, equipment);
    }

    /// Inserts an existing request at the end of the listing.
    ///
    /// Seeding uses this to keep the data set's order. New requests are
    /// raised with [`Store::create_request`], which lists them first.
    ///
    /// # Panics
    ///
    /// Panics if a request with the same id already exists.
    pub fn insert_request(&mut self, request: MaintenanceRequest) {
        let id = request.id.clone();
        self.requests.push_back(&id, request);
    }

    /// Raises a maintenance request.
    ///
    /// The request is created with status `New` and listed first. Its
    /// category is copied from the equipment, or set to the configured
    /// fallback category if the equipment cannot be found (including when the
    /// equipment id is blank).
    #[instrument(level = "debug", skip(self, draft), fields(subject = %draft.subject))]
    pub fn create_request(&mut self, draft: NewRequest) -> &MaintenanceRequest {
        let id = RequestId::new(id::generate(self.config.id_length(), |candidate| {
            self.requests.contains(&RequestId::new(candidate))
        }));

        let category = self.equipment_by_id(&draft.equipment_id).map_or_else(
            || self.config.fallback_category().to_string(),
            |equipment| equipment.category.clone(),
        );
        let team_id = draft.team_id.unwrap_or_else(|| self.default_team());

        let request = MaintenanceRequest {
            id: id.clone(),
            subject: draft.subject,
            requester_id: draft.requester_id,
            equipment_id: draft.equipment_id,
            category,
            assigned_date: draft
                .assigned_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            maintenance_type: draft.maintenance_type.unwrap_or_default(),
            team_id,
            priority: draft.priority,
            status: MaintenanceStatus::New,
            notes: draft.notes,
        };

        tracing::debug!(%id, category = %request.category, "created request");
        self.requests.push_front(&id, request)
    }

    /// Registers equipment at the end of the inventory.
    ///
    /// New equipment has full health, is active and has no open requests.
    #[instrument(level = "debug", skip(self, draft), fields(name = %draft.name))]
    pub fn create_equipment(&mut self, draft: NewEquipment) -> &Equipment {
        let id = EquipmentId::new(id::generate(self.config.id_length(), |candidate| {
            self.equipment.contains(&EquipmentId::new(candidate))
        }));
        let equipment = draft.into_equipment(id.clone(), self.default_team());

        tracing::debug!(%id, "registered equipment");
        self.equipment.push_back(&id, equipment)
    }

    /// Creates a team with no members.
    #[instrument(level = "debug", skip(self, draft), fields(name = %draft.name))]
    pub fn create_team(&mut self, draft: NewTeam) -> &Team {
        let id = TeamId::new(id::generate(self.config.id_length(), |candidate| {
            self.teams.contains(&TeamId::new(candidate))
        }));

        let team = draft.into_team(id.clone());

        tracing::debug!(%id, "created team");
        self.teams.push_back(&id, team)
    }

    /// Replaces the team with the same id.
    ///
    /// Returns `false`, leaving the store unchanged, if no team has that id.
    #[instrument(level = "debug", skip(self, team), fields(id = %team.id))]
    pub fn update_team(&mut self, team: Team) -> bool {
        let id = team.id.clone();
        let replaced = self.teams.replace(&id, team);
        if !replaced {
            tracing::debug!(%id, "no team to update");
        }
        replaced
    }

    /// Adds a user to a team.
    ///
    /// Returns `true` if the team changed. Adding a member who is already in
    /// the team, or adding to an unknown team, changes nothing.
    pub fn add_team_member(&mut self, team: &TeamId, user: UserId) -> bool {
        let Some(mut updated) = self.team_by_id(team).cloned() else {
            return false;
        };
        updated.add_member(user) && self.update_team(updated)
    }

    /// Removes a user from a team.
    ///
    /// Returns `true` if the team changed. Removing someone who is not a
    /// member, or removing from an unknown team, changes nothing.
    pub fn remove_team_member(&mut self, team: &TeamId, user: &UserId) -> bool {
        let Some(mut updated) = self.team_by_id(team).cloned() else {
            return false;
        };
        updated.remove_member(user) && self.update_team(updated)
    }

    /// Onboards a user at the end of the directory.
    #[instrument(level = "debug", skip(self, draft), fields(email = %draft.email))]
    pub fn create_user(&mut self, draft: NewUser) -> &User {
        let id = UserId::new(id::generate(self.config.id_length(), |candidate| {
            self.users.contains(&UserId::new(candidate))
        }));

        let user = draft.into_user(id.clone());

        tracing::debug!(%id, "created user");
        self.users.push_back(&id, user)
    }

    fn default_team(&self) -> TeamId {
        self.teams
            .first()
            .map_or_else(|| TeamId::new(FALLBACK_TEAM), |team| team.id.clone())
    }
}

/// Listings and lookups.
impl Store {
    /// All equipment, in registration order.
    pub fn equipment(&self) -> impl Iterator<Item = &Equipment> + '_ {
        self.equipment.iter()
    }

    /// All requests, newest first.
    pub fn requests(&self) -> impl Iterator<Item = &MaintenanceRequest> + '_ {
        self.requests.iter()
    }

    /// All teams, in creation order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> + '_ {
        self.teams.iter()
    }

    /// All users, in onboarding order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.iter()
    }

    /// Looks up equipment by id.
    #[must_use]
    pub fn equipment_by_id(&self, id: &EquipmentId) -> Option<&Equipment> {
        self.equipment.get(id)
    }

    /// Looks up equipment by id, or failing that by serial number (ignoring
    /// case).
    #[must_use]
    pub fn find_equipment(&self, key: &str) -> Option<&Equipment> {
        self.equipment_by_id(&EquipmentId::new(key)).or_else(|| {
            self.equipment()
                .find(|equipment| equipment.serial_number.eq_ignore_ascii_case(key))
        })
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn request_by_id(&self, id: &RequestId) -> Option<&MaintenanceRequest> {
        self.requests.get(id)
    }

    /// Looks up a team by id.
    #[must_use]
    pub fn team_by_id(&self, id: &TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    /// Looks up a team by id, or failing that by name (ignoring case).
    #[must_use]
    pub fn find_team(&self, key: &str) -> Option<&Team> {
        self.team_by_id(&TeamId::new(key)).or_else(|| {
            self.teams()
                .find(|team| team.name.eq_ignore_ascii_case(key))
        })
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn user_by_id(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Looks up a user by id, or failing that by email address.
    #[must_use]
    pub fn find_user(&self, key: &str) -> Option<&User> {
        self.user_by_id(&UserId::new(key))
            .or_else(|| self.user_by_email(key))
    }

    /// Looks up a user by email address (ignoring case).
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()))
    }

    /// The team responsible for the equipment, if it exists.
    #[must_use]
    pub fn team_of(&self, equipment: &Equipment) -> Option<&Team> {
        self.team_by_id(&equipment.team_id)
    }

    /// The team a request is assigned to, if it exists.
    #[must_use]
    pub fn team_of_request(&self, request: &MaintenanceRequest) -> Option<&Team> {
        self.team_by_id(&request.team_id)
    }

    /// The equipment a request concerns, if it exists.
    #[must_use]
    pub fn equipment_of(&self, request: &MaintenanceRequest) -> Option<&Equipment> {
        self.equipment_by_id(&request.equipment_id)
    }

    /// The team's members that exist, in join order.
    ///
    /// Member ids that do not resolve to a user are skipped.
    pub fn members_of<'a>(&'a self, team: &'a Team) -> impl Iterator<Item = &'a User> + 'a {
        team.members().iter().filter_map(|id| self.user_by_id(id))
    }

    /// Users who could join the team: everyone not already a member.
    ///
    /// An unknown team has no candidates.
    #[must_use]
    pub fn member_candidates(&self, team: &TeamId) -> Vec<&User> {
        let Some(team) = self.team_by_id(team) else {
            return Vec::new();
        };
        self.users()
            .filter(|user| !team.has_member(&user.id))
            .collect()
    }
}

/// Derived views. Each call recomputes from the current collections.
impl Store {
    /// Equipment matching the filter, in registration order.
    #[must_use]
    pub fn search_equipment(&self, filter: &EquipmentFilter) -> Vec<&Equipment> {
        self.equipment()
            .filter(|equipment| filter.matches(equipment))
            .collect()
    }

    /// Requests matching the filter, newest first.
    #[must_use]
    pub fn search_requests(&self, filter: &RequestFilter) -> Vec<&MaintenanceRequest> {
        self.requests()
            .filter(|request| filter.matches(request))
            .collect()
    }

    /// Users matching the filter, in onboarding order.
    #[must_use]
    pub fn search_users(&self, filter: &UserFilter) -> Vec<&User> {
        self.users().filter(|user| filter.matches(user)).collect()
    }

    /// Distinct equipment categories, in order of first appearance.
    #[must_use]
    pub fn equipment_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for equipment in self.equipment() {
            if !categories.contains(&equipment.category.as_str()) {
                categories.push(&equipment.category);
            }
        }
        categories
    }

    /// Number of requests in each status.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::tally(self.requests())
    }

    /// Number of equipment in each fleet-health band.
    #[must_use]
    pub fn health_buckets(&self) -> HealthBuckets {
        HealthBuckets::tally(self.equipment())
    }

    /// Open requests per team, in team order.
    ///
    /// A request is open unless it is `Repaired`; scrapped requests count.
    #[must_use]
    pub fn team_workload(&self) -> Vec<TeamWorkload<'_>> {
        self.teams()
            .map(|team| TeamWorkload::for_team(team, self.requests()))
            .collect()
    }

    /// Open requests referencing the equipment.
    ///
    /// This is the live counterpart of [`Equipment::open_request_count`],
    /// which only records the figure at registration.
    #[must_use]
    pub fn open_request_count(&self, equipment: &EquipmentId) -> usize {
        self.requests()
            .filter(|request| &request.equipment_id == equipment && request.status.is_open())
            .count()
    }

    /// The request board: one column per status, in status order, each
    /// holding the matching requests newest first.
    #[must_use]
    pub fn board(&self, filter: &RequestFilter) -> Vec<BoardColumn<'_>> {
        let matching = self.search_requests(filter);
        MaintenanceStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                requests: matching
                    .iter()
                    .copied()
                    .filter(|request| request.status == status)
                    .collect(),
            })
            .collect()
    }

    /// Requests assigned to the given day, newest first.
    #[must_use]
    pub fn requests_on(&self, date: NaiveDate) -> Vec<&MaintenanceRequest> {
        self.requests()
            .filter(|request| request.assigned_date == date)
            .collect()
    }

    /// Requests grouped by assigned day, for days within `range` that have at
    /// least one request.
    #[must_use]
    pub fn calendar_buckets(
        &self,
        range: RangeInclusive<NaiveDate>,
    ) -> BTreeMap<NaiveDate, Vec<&MaintenanceRequest>> {
        let mut buckets: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for request in self.requests() {
            if range.contains(&request.assigned_date) {
                buckets
                    .entry(request.assigned_date)
                    .or_default()
                    .push(request);
            }
        }
        buckets
    }

    /// Headline figures for the dashboard.
    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(&self.status_counts(), self.health_buckets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EquipmentStatus, Health, MaintenanceType, Priority, Role, Selection};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn raise(store: &mut Store, subject: &str, equipment: &str) -> RequestId {
        store
            .create_request(NewRequest::new(
                subject,
                UserId::new("admin1"),
                EquipmentId::new(equipment),
                Priority::Medium,
            ))
            .id
            .clone()
    }

    fn request_with_status(
        store: &mut Store,
        team: &str,
        status: MaintenanceStatus,
    ) -> MaintenanceRequest {
        let id = format!("{team}-{status}-{}", store.requests.len());
        let request = MaintenanceRequest {
            id: RequestId::new(id),
            subject: "Inspection".to_string(),
            requester_id: UserId::new("admin1"),
            equipment_id: EquipmentId::new("1"),
            category: "Heavy Machinery".to_string(),
            assigned_date: date(2025, 10, 20),
            maintenance_type: MaintenanceType::Preventive,
            team_id: TeamId::new(team),
            priority: Priority::Low,
            status,
            notes: None,
        };
        store.insert_request(request.clone());
        request
    }

    fn workload(store: &Store, team: &str) -> usize {
        store
            .team_workload()
            .into_iter()
            .find(|workload| workload.team.id == TeamId::new(team))
            .map(|workload| workload.open)
            .unwrap()
    }

    #[test]
    fn category_is_copied_from_equipment() {
        let mut store = Store::seeded();
        let plumbing = NewEquipment::new("Sump Pump", "SP-1", "Plumbing", UserId::new("tech1"))
            .with_team(TeamId::new("2"));
        let pump = store.create_equipment(plumbing).id.clone();

        let id = raise(&mut store, "Pump cavitation", pump.as_str());
        assert_eq!(store.request_by_id(&id).unwrap().category, "Plumbing");
    }

    #[test]
    fn unknown_equipment_falls_back_to_general() {
        let mut store = Store::seeded();
        let id = raise(&mut store, "Mystery noise", "does-not-exist");
        assert_eq!(store.request_by_id(&id).unwrap().category, "General");
    }

    #[test]
    fn blank_equipment_is_accepted() {
        let mut store = Store::seeded();
        let id = raise(&mut store, "Unspecified fault", "");
        let request = store.request_by_id(&id).unwrap();
        assert!(request.equipment_id.is_blank());
        assert_eq!(request.category, "General");
        assert!(store.equipment_of(request).is_none());
    }

    #[test]
    fn fallback_category_is_configurable() {
        let mut config = Config::default();
        config.set_fallback_category("Facilities");
        let mut store = Store::seeded_with(config);
        let id = raise(&mut store, "Door sticks", "nope");
        assert_eq!(store.request_by_id(&id).unwrap().category, "Facilities");
    }

    #[test]
    fn new_requests_are_listed_first() {
        let mut store = Store::seeded();
        let first = raise(&mut store, "First", "1");
        let second = raise(&mut store, "Second", "1");

        let ids: Vec<_> = store.requests().map(|r| r.id.clone()).collect();
        assert_eq!(ids[0], second);
        assert_eq!(ids[1], first);
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn request_defaults() {
        let mut store = Store::seeded();
        let before = Utc::now().date_naive();
        let id = raise(&mut store, "Belt slipping", "5");
        let after = Utc::now().date_naive();

        let request = store.request_by_id(&id).unwrap();
        assert_eq!(request.status, MaintenanceStatus::New);
        assert_eq!(request.maintenance_type, MaintenanceType::Corrective);
        assert!(request.assigned_date >= before && request.assigned_date <= after);
        assert_eq!(request.team_id, TeamId::new("1"));
        assert_eq!(request.id.as_str().len(), 9);
    }

    #[test]
    fn explicit_request_fields_are_kept() {
        let mut store = Store::seeded();
        let request = store.create_request(
            NewRequest::new(
                "Quarterly lubrication",
                UserId::new("tech1"),
                EquipmentId::new("3"),
                Priority::Low,
            )
            .with_type(MaintenanceType::Preventive)
            .on(date(2025, 11, 3))
            .for_team(TeamId::new("2"))
            .with_notes("Use food-grade grease"),
        );

        assert_eq!(request.maintenance_type, MaintenanceType::Preventive);
        assert_eq!(request.assigned_date, date(2025, 11, 3));
        assert_eq!(request.team_id, TeamId::new("2"));
        assert_eq!(request.category, "Utility");
        assert_eq!(request.notes.as_deref(), Some("Use food-grade grease"));
    }

    #[test]
    fn default_team_without_any_teams() {
        let mut store = Store::default();
        let request = store.create_request(NewRequest::new(
            "Orphan",
            UserId::new("u"),
            EquipmentId::new("e"),
            Priority::High,
        ));
        assert_eq!(request.team_id, TeamId::new("1"));
    }

    #[test]
    fn equipment_is_appended_with_defaults() {
        let mut store = Store::seeded();
        let created = store
            .create_equipment(NewEquipment::new(
                "Industrial Lathe X1",
                "SN-8821-X",
                "Heavy Machinery",
                UserId::new("admin1"),
            ))
            .clone();

        assert_eq!(created.health, Health::FULL);
        assert_eq!(created.status, EquipmentStatus::Active);
        assert_eq!(created.open_request_count, 0);
        assert_eq!(created.team_id, TeamId::new("1"));
        assert_eq!(store.equipment().last(), Some(&created));
    }

    #[test]
    fn teams_and_users_are_appended() {
        let mut store = Store::seeded();
        let team = store
            .create_team(NewTeam::new("Facility Ops", "HVAC & Plumbing"))
            .clone();
        let user = store
            .create_user(NewUser::new(
                "Jane Smith",
                "j.smith@gearguard.io",
                Role::Manager,
            ))
            .clone();

        assert!(team.members().is_empty());
        assert_eq!(store.teams().last(), Some(&team));
        assert_eq!(store.users().last(), Some(&user));
        assert_eq!(store.user_by_email("J.SMITH@gearguard.io"), Some(&user));
    }

    #[test]
    fn update_team_replaces_in_place() {
        let mut store = Store::seeded();
        let mut team = store.team_by_id(&TeamId::new("1")).unwrap().clone();
        team.specialization = "Pneumatics".to_string();

        assert!(store.update_team(team));
        let names: Vec<_> = store.teams().map(|t| t.specialization.as_str()).collect();
        assert_eq!(names, vec!["Pneumatics", "Wiring & Controls"]);
    }

    #[test]
    fn update_unknown_team_is_a_no_op() {
        let mut store = Store::seeded();
        let ghost = Team::new(
            TeamId::new("99"),
            "Ghosts",
            "None",
            std::iter::empty::<UserId>(),
        );
        assert!(!store.update_team(ghost));
        assert_eq!(store.teams().count(), 2);
        assert!(store.team_by_id(&TeamId::new("99")).is_none());
    }

    #[test]
    fn adding_a_member_twice_keeps_one_entry() {
        let mut store = Store::seeded();
        let team = TeamId::new("2");

        assert!(store.add_team_member(&team, UserId::new("tech1")));
        assert!(!store.add_team_member(&team, UserId::new("tech1")));

        let members = store.team_by_id(&team).unwrap().members().to_vec();
        assert_eq!(members, vec![UserId::new("tech3"), UserId::new("tech1")]);
    }

    #[test]
    fn removing_an_absent_member_changes_nothing() {
        let mut store = Store::seeded();
        let team = TeamId::new("1");
        let before = store.team_by_id(&team).unwrap().clone();

        assert!(!store.remove_team_member(&team, &UserId::new("tech3")));
        assert_eq!(store.team_by_id(&team), Some(&before));

        assert!(store.remove_team_member(&team, &UserId::new("tech1")));
        assert_eq!(
            store.team_by_id(&team).unwrap().members(),
            &[UserId::new("tech2")]
        );
    }

    #[test]
    fn membership_changes_on_unknown_team_are_ignored() {
        let mut store = Store::seeded();
        assert!(!store.add_team_member(&TeamId::new("404"), UserId::new("tech1")));
        assert!(!store.remove_team_member(&TeamId::new("404"), &UserId::new("tech1")));
    }

    #[test]
    fn dangling_members_are_omitted() {
        let mut store = Store::seeded();
        let team = TeamId::new("1");
        store.add_team_member(&team, UserId::new("departed"));

        let team = store.team_by_id(&team).unwrap();
        let names: Vec<_> = store.members_of(team).map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Marcus Sterling", "Sarah Connor"]);
    }

    #[test]
    fn member_candidates_exclude_members() {
        let store = Store::seeded();
        let candidates: Vec<_> = store
            .member_candidates(&TeamId::new("1"))
            .into_iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(candidates, vec!["admin1", "tech3"]);
        assert!(store.member_candidates(&TeamId::new("9")).is_empty());
    }

    #[test]
    fn workload_counts_everything_but_repaired() {
        let mut store = Store::seeded();
        assert_eq!(workload(&store, "2"), 0);

        request_with_status(&mut store, "2", MaintenanceStatus::New);
        request_with_status(&mut store, "2", MaintenanceStatus::InProgress);
        assert_eq!(workload(&store, "2"), 2);

        request_with_status(&mut store, "2", MaintenanceStatus::Repaired);
        assert_eq!(workload(&store, "2"), 2);

        request_with_status(&mut store, "2", MaintenanceStatus::Scrap);
        assert_eq!(workload(&store, "2"), 3);
    }

    #[test]
    fn workload_follows_team_order() {
        let store = Store::seeded();
        let rows: Vec<_> = store
            .team_workload()
            .into_iter()
            .map(|w| (w.team.name.as_str(), w.open))
            .collect();
        // Request 2 belongs to team 3, which does not exist, so it counts nowhere.
        assert_eq!(rows, vec![("Mechanical Squad", 1), ("Electrical Force", 0)]);
    }

    #[test]
    fn requests_sharing_a_date_share_a_bucket() {
        let mut store = Store::seeded();
        let extra = store
            .create_request(
                NewRequest::new(
                    "Filter change",
                    UserId::new("tech2"),
                    EquipmentId::new("3"),
                    Priority::Low,
                )
                .on(date(2025, 10, 12)),
            )
            .id
            .clone();

        let day: Vec<_> = store
            .requests_on(date(2025, 10, 12))
            .into_iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(day, vec![extra, RequestId::new("1")]);

        let buckets = store.calendar_buckets(date(2025, 10, 1)..=date(2025, 10, 31));
        assert_eq!(buckets[&date(2025, 10, 12)].len(), 2);
        assert_eq!(buckets[&date(2025, 10, 15)].len(), 1);
        assert!(!buckets.contains_key(&date(2025, 10, 13)));
    }

    #[test]
    fn calendar_buckets_respect_the_range() {
        let store = Store::seeded();
        let buckets = store.calendar_buckets(date(2025, 10, 13)..=date(2025, 10, 16));
        assert_eq!(
            buckets.keys().copied().collect::<Vec<_>>(),
            vec![date(2025, 10, 15)]
        );
    }

    #[test]
    fn seeded_health_buckets() {
        let store = Store::seeded();
        assert_eq!(
            store.health_buckets(),
            HealthBuckets {
                healthy: 2,
                warning: 1,
                critical: 2,
            }
        );
    }

    #[test]
    fn seeded_dashboard() {
        let stats = Store::seeded().dashboard();
        assert_eq!(stats.new, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.repaired, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.total_equipment, 5);
        assert_eq!(stats.critical(), 2);
    }

    #[test]
    fn board_groups_by_status_in_column_order() {
        let mut store = Store::seeded();
        let raised = raise(&mut store, "Coolant leak", "1");
        let board = store.board(&RequestFilter::default());

        let columns: Vec<_> = board
            .iter()
            .map(|column| (column.status, column.requests.len()))
            .collect();
        assert_eq!(
            columns,
            vec![
                (MaintenanceStatus::New, 2),
                (MaintenanceStatus::InProgress, 1),
                (MaintenanceStatus::Repaired, 1),
                (MaintenanceStatus::Scrap, 0),
            ]
        );
        assert_eq!(board[0].requests[0].id, raised);
    }

    #[test]
    fn request_search_combines_predicates() {
        let store = Store::seeded();
        let filter = RequestFilter {
            search: Some("room".to_string()),
            priority: Selection::Only(Priority::High),
            team: Selection::Only(TeamId::new("1")),
            status: Selection::All,
        };
        let found: Vec<_> = store
            .search_requests(&filter)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(found, vec!["1"]);

        let filter = RequestFilter {
            priority: Selection::Only(Priority::Low),
            ..filter
        };
        assert!(store.search_requests(&filter).is_empty());
    }

    #[test]
    fn equipment_search_by_category() {
        let store = Store::seeded();
        let filter = EquipmentFilter {
            search: None,
            category: Selection::Only("Heavy Machinery".to_string()),
        };
        let found: Vec<_> = store
            .search_equipment(&filter)
            .into_iter()
            .map(|e| e.serial_number.as_str())
            .collect();
        assert_eq!(found, vec!["CNC-88291", "HYD-552"]);
    }

    #[test]
    fn categories_in_first_appearance_order() {
        let store = Store::seeded();
        assert_eq!(
            store.equipment_categories(),
            vec!["Heavy Machinery", "Vehicles", "Utility", "IT"]
        );
    }

    #[test]
    fn dangling_team_references_resolve_to_none() {
        let store = Store::seeded();
        let server = store.equipment_by_id(&EquipmentId::new("4")).unwrap();
        assert!(store.team_of(server).is_none());

        let pipe = store.request_by_id(&RequestId::new("2")).unwrap();
        assert!(store.team_of_request(pipe).is_none());
        assert_eq!(
            store.equipment_of(pipe).unwrap().name,
            "Industrial Forklift"
        );
    }

    #[test]
    fn lookups_by_natural_keys() {
        let store = Store::seeded();
        assert_eq!(
            store.find_equipment("cnc-88291").unwrap().id,
            EquipmentId::new("1")
        );
        assert_eq!(
            store.find_equipment("3").unwrap().name,
            "Air Compressor Unit"
        );
        assert!(store.find_equipment("XYZ").is_none());
        assert_eq!(
            store.find_team("electrical force").unwrap().id,
            TeamId::new("2")
        );
        assert_eq!(store.find_user("tech3").unwrap().name, "Elena Rodriguez");
        assert_eq!(
            store.find_user("M.Sterling@gearguard.io").unwrap().id,
            UserId::new("tech1")
        );
    }

    #[test]
    fn open_request_count_is_derived() {
        let mut store = Store::seeded();
        let cnc = EquipmentId::new("1");
        // Request 1 is new, request 3 is repaired.
        assert_eq!(store.open_request_count(&cnc), 1);
        raise(&mut store, "Spindle vibration", "1");
        assert_eq!(store.open_request_count(&cnc), 2);
        assert_eq!(store.equipment_by_id(&cnc).unwrap().open_request_count, 0);
    }

    #[test]
    fn generated_ids_do_not_collide_with_existing_ones() {
        let mut config = Config::default();
        config.set_id_length(4);
        let mut store = Store::seeded_with(config);
        for i in 0..200 {
            raise(&mut store, &format!("Request {i}"), "1");
        }
        assert_eq!(store.requests().count(), 203);
    }

    #[test]
    fn raising_a_request_end_to_end() {
        let mut store = Store::seeded();
        let cnc = store.find_equipment("CNC-88291").unwrap();
        assert_eq!(cnc.health.value(), 85);
        let cnc = cnc.id.clone();

        let health_before = store.health_buckets();
        let new_before = store.status_counts().get(MaintenanceStatus::New);
        let workload_before = workload(&store, "1");

        let request = store
            .create_request(NewRequest::new(
                "Spindle overheating",
                UserId::new("tech1"),
                cnc,
                Priority::High,
            ))
            .clone();

        assert_eq!(request.team_id, TeamId::new("1"));
        assert_eq!(request.category, "Heavy Machinery");

        let board = store.board(&RequestFilter::default());
        assert!(board[0].requests.iter().any(|r| r.id == request.id));
        assert_eq!(
            store.status_counts().get(MaintenanceStatus::New),
            new_before + 1
        );
        assert_eq!(workload(&store, "1"), workload_before + 1);
        assert_eq!(store.health_buckets(), health_before);
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::{TeamId, UserId};

/// A maintenance team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: TeamId,
    /// Display name, e.g. "Mechanical Squad".
    pub name: String,
    /// Area of expertise, e.g. "Hydraulics & Engines".
    pub specialization: String,
    /// Member user ids in the order they joined.
    ///
    /// Treated as a set: see [`Team::add_member`] and [`Team::remove_member`].
    members: Vec<UserId>,
}

impl Team {
    /// Creates a team with the given members.
    ///
    /// Repeated ids are dropped, keeping the first occurrence.
    #[must_use]
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        specialization: impl Into<String>,
        members: impl IntoIterator<Item = UserId>,
    ) -> Self {
        let mut team = Self {
            id,
            name: name.into(),
            specialization: specialization.into(),
            members: Vec::new(),
        };
        for member in members {
            team.add_member(member);
        }
        team
    }

    /// The member ids, in the order they joined.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Whether the user is a member of this team.
    #[must_use]
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Appends a member.
    ///
    /// Returns `true` if the member was added, or `false` if they were
    /// already in the team.
    pub fn add_member(&mut self, user: UserId) -> bool {
        if self.has_member(&user) {
            false
        } else {
            self.members.push(user);
            true
        }
    }

    /// Removes a member.
    ///
    /// Returns `true` if the member was removed, or `false` if they were not
    /// in the team.
    pub fn remove_member(&mut self, user: &UserId) -> bool {
        if let Some(pos) = self.members.iter().position(|member| member == user) {
            self.members.remove(pos);
            true
        } else {
            false
        }
    }
}

/// The fields supplied when creating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    /// Display name.
    pub name: String,
    /// Area of expertise.
    pub specialization: String,
}

impl NewTeam {
    /// Creates the fields for a team with no members.
    #[must_use]
    pub fn new(name: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialization: specialization.into(),
        }
    }

    pub(crate) fn into_team(self, id: TeamId) -> Team {
        Team::new(id, self.name, self.specialization, [])
    }
}

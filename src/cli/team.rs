use std::path::Path;

use clap::{Parser, Subcommand};
use gearguard::{
    Store, Team,
    domain::{NewTeam, TeamWorkload},
};
use serde_json::json;
use tracing::instrument;

use super::{
    OutputFormat, open_store, print_json,
    terminal::{Colorize, heading, print_table},
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List teams with their members and open tasks
    List(List),

    /// Create a team with no members
    Create(Create),

    /// Add a user to a team
    AddMember(Membership),

    /// Remove a user from a team
    RemoveMember(Membership),

    /// List users who could join a team
    Candidates(Candidates),
}

impl Command {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root),
            Self::Create(command) => {
                command.run(root);
                Ok(())
            }
            Self::AddMember(command) => command.add(root),
            Self::RemoveMember(command) => command.remove(root),
            Self::Candidates(command) => command.run(root),
        }
    }
}

#[derive(Debug, Parser)]
pub struct List {
    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        match self.output {
            OutputFormat::Json => {
                let teams: Vec<_> = store
                    .team_workload()
                    .into_iter()
                    .map(|workload| team_json(&store, &workload))
                    .collect();
                print_json(&json!(teams))
            }
            OutputFormat::Table => {
                let rows: Vec<_> = store
                    .team_workload()
                    .into_iter()
                    .map(|workload| {
                        vec![
                            workload.team.id.to_string(),
                            workload.team.name.clone(),
                            workload.team.specialization.clone(),
                            member_names(&store, workload.team),
                            workload.open.to_string(),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Team", "Specialization", "Members", "Open"],
                    &rows,
                    "No teams yet.",
                );
                Ok(())
            }
        }
    }
}

fn team_json(store: &Store, workload: &TeamWorkload<'_>) -> serde_json::Value {
    let members: Vec<_> = store.members_of(workload.team).collect();
    json!({
        "id": workload.team.id,
        "name": workload.team.name,
        "specialization": workload.team.specialization,
        "members": members,
        "open": workload.open,
    })
}

/// Member names joined with commas. Members that do not resolve are skipped.
fn member_names(store: &Store, team: &Team) -> String {
    store
        .members_of(team)
        .map(|user| user.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn show_team(store: &Store, team: &Team) {
    heading(&team.name);
    println!("Specialization: {}", team.specialization);
    let members: Vec<_> = store
        .members_of(team)
        .map(|user| {
            vec![
                user.id.to_string(),
                user.name.clone(),
                user.role.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "Name", "Role"], &members, "No members yet.");
}

#[derive(Debug, Parser)]
pub struct Create {
    /// Team name
    #[arg(long, short)]
    name: String,

    /// What the team specializes in
    #[arg(long, short, default_value = "Hydraulics & Engines")]
    specialization: String,
}

impl Create {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) {
        let mut store = open_store(root);
        let team = store
            .create_team(NewTeam::new(self.name, self.specialization))
            .clone();

        println!("Created team {} ({})", team.name.success(), team.id);
        println!(
            "{}",
            format!("{} teams in total.", store.teams().count()).dim()
        );
    }
}

#[derive(Debug, Parser)]
pub struct Membership {
    /// Team id or name
    team: String,

    /// User id or email
    user: String,
}

impl Membership {
    #[instrument(level = "debug", skip(self))]
    pub fn add(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root);
        let team = self.apply(&mut store, true)?;
        show_team(&store, &team);
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root);
        let team = self.apply(&mut store, false)?;
        show_team(&store, &team);
        Ok(())
    }

    /// Adds or removes the member, returning the team as it now stands.
    ///
    /// Unknown teams and users are errors here even though the store ignores
    /// them, so a typo is reported instead of silently doing nothing.
    fn apply(&self, store: &mut Store, join: bool) -> anyhow::Result<Team> {
        let Some(team) = store.find_team(&self.team).map(|team| team.id.clone()) else {
            anyhow::bail!("Unknown team '{}'", self.team);
        };
        let Some(user) = store.find_user(&self.user).map(|user| user.id.clone()) else {
            anyhow::bail!("Unknown user '{}'", self.user);
        };

        let changed = if join {
            store.add_team_member(&team, user.clone())
        } else {
            store.remove_team_member(&team, &user)
        };
        if !changed {
            let state = if join { "already" } else { "not" };
            println!("{}", format!("{user} is {state} a member.").dim());
        }

        store
            .team_by_id(&team)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Team '{team}' disappeared"))
    }
}

#[derive(Debug, Parser)]
pub struct Candidates {
    /// Team id or name
    team: String,
}

impl Candidates {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let Some(team) = store.find_team(&self.team) else {
            anyhow::bail!("Unknown team '{}'", self.team);
        };

        let rows: Vec<_> = store
            .member_candidates(&team.id)
            .into_iter()
            .map(|user| vec![user.id.to_string(), user.name.clone(), user.email.clone()])
            .collect();
        print_table(
            &["ID", "Name", "Email"],
            &rows,
            "Everyone is already a member.",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gearguard::{TeamId, UserId};

    use super::*;

    fn membership(team: &str, user: &str) -> Membership {
        Membership {
            team: team.to_string(),
            user: user.to_string(),
        }
    }

    #[test]
    fn add_member_by_name_and_email() {
        let mut store = Store::seeded();
        let team = membership("Electrical Force", "m.sterling@gearguard.io")
            .apply(&mut store, true)
            .unwrap();

        assert_eq!(
            team.members(),
            &[UserId::new("tech3"), UserId::new("tech1")]
        );
        assert_eq!(
            member_names(&store, &team),
            "Elena Rodriguez, Marcus Sterling"
        );
    }

    #[test]
    fn adding_an_existing_member_is_not_an_error() {
        let mut store = Store::seeded();
        let team = membership("1", "tech1").apply(&mut store, true).unwrap();
        assert_eq!(team.members().len(), 2);
    }

    #[test]
    fn remove_member() {
        let mut store = Store::seeded();
        let team = membership("1", "tech2").apply(&mut store, false).unwrap();
        assert_eq!(team.members(), &[UserId::new("tech1")]);
    }

    #[test]
    fn unknown_team_or_user_is_reported() {
        let mut store = Store::seeded();
        let error = membership("9", "tech1")
            .apply(&mut store, true)
            .unwrap_err();
        assert_eq!(error.to_string(), "Unknown team '9'");

        let error = membership("1", "nobody")
            .apply(&mut store, true)
            .unwrap_err();
        assert_eq!(error.to_string(), "Unknown user 'nobody'");
        assert_eq!(
            store.team_by_id(&TeamId::new("1")).unwrap().members().len(),
            2
        );
    }

    #[test]
    fn team_json_lists_resolved_members() {
        let store = Store::seeded();
        let workload = store.team_workload();
        let value = team_json(&store, &workload[0]);

        assert_eq!(value["name"], "Mechanical Squad");
        assert_eq!(value["members"][1]["name"], "Sarah Connor");
        assert_eq!(value["open"], 1);
    }
}

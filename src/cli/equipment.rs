use std::path::Path;

use clap::{Parser, Subcommand};
use gearguard::{
    Equipment, Store, UserId,
    domain::{EquipmentFilter, NOT_AVAILABLE, NewEquipment, Selection, UNASSIGNED},
};
use serde_json::json;
use tracing::instrument;

use super::{
    OutputFormat, open_store, print_json, require_session,
    terminal::{Colorize, print_table},
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List equipment, optionally filtered
    List(List),

    /// Register new equipment
    Add(Add),
}

impl Command {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root),
            Self::Add(command) => command.run(root),
        }
    }
}

#[derive(Debug, Parser)]
pub struct List {
    /// Case-insensitive match against name or serial number
    #[arg(long, short)]
    search: Option<String>,

    /// Category to show, or "All"
    #[arg(long, short, default_value = "All")]
    category: Selection<String>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let filter = EquipmentFilter {
            search: self.search,
            category: self.category,
        };
        let found = store.search_equipment(&filter);

        match self.output {
            OutputFormat::Json => print_json(&json!(found)),
            OutputFormat::Table => {
                let mut categories = vec!["All"];
                categories.extend(store.equipment_categories());
                println!("{}", format!("Categories: {}", categories.join(", ")).dim());
                println!();
                print_table(
                    &[
                        "ID", "Name", "Serial", "Category", "Team", "Health", "Tasks",
                    ],
                    &rows(&store, &found),
                    "No equipment matches the filter.",
                );
                Ok(())
            }
        }
    }
}

fn rows(store: &Store, equipment: &[&Equipment]) -> Vec<Vec<String>> {
    equipment
        .iter()
        .map(|item| {
            vec![
                item.id.to_string(),
                item.name.clone(),
                item.serial_number.clone(),
                item.category.clone(),
                store
                    .team_of(item)
                    .map_or(UNASSIGNED, |team| team.name.as_str())
                    .to_string(),
                format!("{}% ({})", item.health.value(), item.health.bucket()),
                item.open_request_count.to_string(),
            ]
        })
        .collect()
}

#[derive(Debug, Parser)]
pub struct Add {
    /// Asset name
    #[arg(long, short)]
    name: String,

    /// Serial number
    #[arg(long, short)]
    serial: String,

    /// Category
    #[arg(long, short, default_value = "Heavy Machinery")]
    category: String,

    /// Responsible team id or name (defaults to the first team)
    #[arg(long, short)]
    team: Option<String>,

    /// Company the asset belongs to
    #[arg(long)]
    company: Option<String>,

    /// Physical location
    #[arg(long)]
    location: Option<String>,

    /// Work center code
    #[arg(long)]
    work_center: Option<String>,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = require_session(root)?;
        let mut store = open_store(root);
        let created = self.apply(&mut store, session.user.id)?.clone();

        println!("Registered {} ({})", created.name.success(), created.id);
        println!("  Serial:      {}", created.serial_number);
        println!("  Category:    {}", created.category);
        println!(
            "  Location:    {} / {} / {}",
            created.company, created.location, created.work_center
        );
        println!(
            "  Team:        {}",
            store
                .team_of(&created)
                .map_or(NOT_AVAILABLE, |team| team.name.as_str())
        );
        println!("  Health:      {}%", created.health.value());
        Ok(())
    }

    fn apply(self, store: &mut Store, technician: UserId) -> anyhow::Result<&Equipment> {
        let mut fields = NewEquipment::new(self.name, self.serial, self.category, technician);
        if let Some(team) = self.team {
            let Some(team) = store.find_team(&team) else {
                anyhow::bail!("Unknown team '{team}'");
            };
            fields = fields.with_team(team.id.clone());
        }
        fields.company = self.company;
        fields.location = self.location;
        fields.work_center = self.work_center;
        Ok(store.create_equipment(fields))
    }
}

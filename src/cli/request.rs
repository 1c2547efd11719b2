use std::path::Path;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gearguard::{
    EquipmentId, MaintenanceRequest, MaintenanceStatus, MaintenanceType, Priority, Store, TeamId,
    UserId,
    domain::{NOT_AVAILABLE, NewRequest, RequestFilter, Selection},
};
use serde_json::json;
use tracing::instrument;

use super::{
    OutputFormat, open_store, print_json, require_session,
    terminal::{Colorize, heading, print_table},
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List requests, newest first
    List(List),

    /// Show requests in one column per status
    Board(Board),

    /// Raise a maintenance request
    Add(Add),
}

impl Command {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root),
            Self::Board(command) => command.run(root),
            Self::Add(command) => command.run(root),
        }
    }
}

/// Filters shared by the listing commands.
#[derive(Debug, Args)]
pub struct Filters {
    /// Case-insensitive match against the subject
    #[arg(long, short)]
    search: Option<String>,

    /// Priority to show (low, medium, high), or "All"
    #[arg(long, short, default_value = "All")]
    priority: Selection<Priority>,

    /// Team id to show, or "All"
    #[arg(long, short, default_value = "All")]
    team: Selection<TeamId>,
}

impl Filters {
    fn into_filter(self, status: Selection<MaintenanceStatus>) -> RequestFilter {
        RequestFilter {
            search: self.search,
            priority: self.priority,
            team: self.team,
            status,
        }
    }
}

#[derive(Debug, Parser)]
pub struct List {
    #[command(flatten)]
    filters: Filters,

    /// Status to show (new, in-progress, repaired, scrap), or "All"
    #[arg(long, default_value = "All")]
    status: Selection<MaintenanceStatus>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let filter = self.filters.into_filter(self.status);
        let found = store.search_requests(&filter);

        match self.output {
            OutputFormat::Json => print_json(&json!(found)),
            OutputFormat::Table => {
                println!("Managing {} requests.", found.len());
                println!();
                print_table(
                    &[
                        "ID",
                        "Subject",
                        "Equipment",
                        "Team",
                        "Date",
                        "Type",
                        "Priority",
                        "Status",
                    ],
                    &rows(&store, &found),
                    "No requests match the filter.",
                );
                Ok(())
            }
        }
    }
}

fn rows(store: &Store, requests: &[&MaintenanceRequest]) -> Vec<Vec<String>> {
    requests
        .iter()
        .map(|request| {
            vec![
                request.id.to_string(),
                request.subject.clone(),
                store
                    .equipment_of(request)
                    .map_or(NOT_AVAILABLE, |equipment| equipment.name.as_str())
                    .to_string(),
                store
                    .team_of_request(request)
                    .map_or(NOT_AVAILABLE, |team| team.name.as_str())
                    .to_string(),
                request.assigned_date.to_string(),
                request.maintenance_type.to_string(),
                request.priority.to_string(),
                request.status.to_string(),
            ]
        })
        .collect()
}

#[derive(Debug, Parser)]
pub struct Board {
    #[command(flatten)]
    filters: Filters,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Board {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let board = store.board(&self.filters.into_filter(Selection::All));

        if self.output == OutputFormat::Json {
            let columns: Vec<_> = board
                .iter()
                .map(|column| {
                    json!({
                        "status": column.status,
                        "count": column.requests.len(),
                        "requests": column.requests,
                    })
                })
                .collect();
            return print_json(&json!(columns));
        }

        for column in &board {
            heading(&format!("{} ({})", column.status, column.requests.len()));
            if column.requests.is_empty() {
                println!("{}", "(empty)".dim());
            }
            for request in &column.requests {
                println!(
                    "  [{}] {} {}",
                    request.priority,
                    request.subject,
                    format!("#{} {}", request.id, request.assigned_date).dim()
                );
            }
            println!();
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Add {
    /// What is the issue?
    #[arg(long)]
    subject: String,

    /// Equipment id or serial number
    #[arg(long, short, default_value = "")]
    equipment: String,

    /// Priority (low, medium, high)
    #[arg(long, short, default_value = "medium")]
    priority: Priority,

    /// Maintenance type (corrective, preventive)
    #[arg(long = "type")]
    maintenance_type: Option<MaintenanceType>,

    /// Assigned date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Team id or name (defaults to the first team)
    #[arg(long, short)]
    team: Option<String>,

    /// Further details
    #[arg(long, short)]
    notes: Option<String>,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = require_session(root)?;
        let mut store = open_store(root);
        let request = self.apply(&mut store, session.user.id)?.clone();

        println!("Raised request {}", request.id.to_string().success());
        println!("  Subject:   {}", request.subject);
        println!(
            "  Equipment: {}",
            store
                .equipment_of(&request)
                .map_or(NOT_AVAILABLE, |equipment| equipment.name.as_str())
        );
        println!("  Category:  {}", request.category);
        println!("  Date:      {}", request.assigned_date);
        println!("  Priority:  {}", request.priority);
        println!("  Status:    {}", request.status.to_string().info());
        println!();

        let new = store.status_counts().get(MaintenanceStatus::New);
        println!("New requests: {new}");
        if let Some(workload) = store
            .team_workload()
            .into_iter()
            .find(|workload| workload.team.id == request.team_id)
        {
            println!("{} open tasks: {}", workload.team.name, workload.open);
        }
        if store.equipment_of(&request).is_some() {
            println!(
                "Open requests on this equipment: {}",
                store.open_request_count(&request.equipment_id)
            );
        }
        Ok(())
    }

    fn apply(self, store: &mut Store, requester: UserId) -> anyhow::Result<&MaintenanceRequest> {
        let equipment = store
            .find_equipment(&self.equipment)
            .map_or_else(|| EquipmentId::new(self.equipment.trim()), |e| e.id.clone());
        if !equipment.is_blank() && store.equipment_by_id(&equipment).is_none() {
            tracing::info!(%equipment, "equipment not found, using the fallback category");
        }

        let mut fields = NewRequest::new(self.subject, requester, equipment, self.priority);
        fields.maintenance_type = self.maintenance_type;
        fields.assigned_date = self.date;
        fields.notes = self.notes;
        if let Some(team) = self.team {
            let Some(team) = store.find_team(&team) else {
                anyhow::bail!("Unknown team '{team}'");
            };
            fields = fields.for_team(team.id.clone());
        }
        Ok(store.create_request(fields))
    }
}

use std::path::Path;

use clap::Parser;
use gearguard::{Store, domain::HealthBucket};
use serde_json::{Value, json};
use tracing::instrument;

use super::{
    OutputFormat, open_store, print_json,
    terminal::{Colorize, heading, is_narrow, print_table},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show KPIs, fleet health and team workload")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    output: OutputFormat,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        match self.output {
            OutputFormat::Json => print_json(&summary(&store)),
            OutputFormat::Table => {
                output_table(&store);
                Ok(())
            }
        }
    }
}

fn summary(store: &Store) -> Value {
    let stats = store.dashboard();
    let status: Vec<_> = store
        .status_counts()
        .iter()
        .map(|(status, count)| json!({ "status": status, "count": count }))
        .collect();
    let health: Vec<_> = stats
        .health
        .iter()
        .map(|(bucket, count)| json!({ "band": bucket.label(), "count": count }))
        .collect();
    let workload: Vec<_> = store
        .team_workload()
        .into_iter()
        .map(|workload| {
            json!({
                "team": workload.team.id,
                "name": workload.team.name,
                "open": workload.open,
            })
        })
        .collect();

    json!({
        "pending": stats.pending,
        "new": stats.new,
        "in_progress": stats.in_progress,
        "repaired": stats.repaired,
        "total_equipment": stats.total_equipment,
        "health_alerts": stats.critical(),
        "requests_by_status": status,
        "fleet_health": health,
        "team_workload": workload,
    })
}

fn output_table(store: &Store) {
    let stats = store.dashboard();

    heading("System Analytics");
    let alerts = stats.critical().to_string();
    let alerts = if stats.critical() == 0 {
        alerts.success()
    } else {
        alerts.critical()
    };
    println!("Pending tickets: {}", stats.pending.to_string().warning());
    println!("Active fleet:    {}", stats.total_equipment);
    println!("Health alerts:   {alerts}");
    println!();

    heading("Requests by status");
    for (status, count) in store.status_counts().iter() {
        println!("{:<12} {count}", status.label());
    }
    println!();

    heading("Fleet health");
    let total = stats.health.total();
    for (bucket, count) in stats.health.iter() {
        let label = match bucket {
            HealthBucket::Healthy => bucket.label().success(),
            HealthBucket::Warning => bucket.label().warning(),
            HealthBucket::Critical => bucket.label().critical(),
        };
        if is_narrow() {
            println!("{label}: {count}");
        } else {
            let padding = " ".repeat(10usize.saturating_sub(bucket.label().len()));
            println!("{label}{padding}{count:>3}  {}", share(count, total).dim());
        }
    }
    println!();

    heading("Open tasks by team");
    let rows: Vec<Vec<String>> = store
        .team_workload()
        .into_iter()
        .map(|workload| {
            vec![
                workload.team.name.clone(),
                workload.team.specialization.clone(),
                workload.open.to_string(),
            ]
        })
        .collect();
    print_table(&["Team", "Specialization", "Open"], &rows, "No teams yet.");
}

/// `count` as a whole-number percentage of `total`.
fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{}%", (count * 100 + total / 2) / total)
}

use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;
use gearguard::{
    Store,
    domain::{
        NOT_AVAILABLE,
        calendar::{CalendarCell, YearMonth, month_grid},
    },
};
use serde_json::json;
use tracing::instrument;

use super::{
    OutputFormat, open_store, print_json,
    terminal::{Colorize, heading},
};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 6;

#[derive(Debug, Parser)]
#[command(about = "Show requests on the calendar")]
pub struct Command {
    /// Month to show (YYYY-MM), defaults to the configured month
    #[arg(long, short, conflicts_with = "date")]
    month: Option<YearMonth>,

    /// Show only the requests assigned to this day (YYYY-MM-DD)
    #[arg(long, short)]
    date: Option<NaiveDate>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);

        if let Some(date) = self.date {
            return self.show_day(&store, date);
        }

        let default_month = store.config().default_month;
        let month = self.month.unwrap_or(default_month);
        let grid = month_grid(&store, month);
        match self.output {
            OutputFormat::Json => {
                let days: Vec<_> = grid
                    .iter()
                    .filter_map(|cell| match cell {
                        CalendarCell::Day { date, requests } if !requests.is_empty() => {
                            Some(json!({ "date": date, "requests": requests }))
                        }
                        _ => None,
                    })
                    .collect();
                print_json(&json!({ "month": month, "days": days }))
            }
            OutputFormat::Table => {
                heading(&format!("{} {}", month.month_name(), month.year()));
                for line in grid_lines(&grid) {
                    println!("{line}");
                }
                println!();
                print_agenda(&store, &grid);
                Ok(())
            }
        }
    }

    fn show_day(&self, store: &Store, date: NaiveDate) -> anyhow::Result<()> {
        let requests = store.requests_on(date);
        if self.output == OutputFormat::Json {
            return print_json(&json!({ "date": date, "requests": requests }));
        }

        heading(&date.format("%A, %B %-d, %Y").to_string());
        if requests.is_empty() {
            println!("{}", "No maintenance scheduled.".dim());
        }
        for request in requests {
            let team = store
                .team_of_request(request)
                .map_or(NOT_AVAILABLE, |team| team.name.as_str());
            println!(
                "  {} [{}] {}",
                request.subject,
                request.status,
                format!("{} · {team}", request.maintenance_type).dim()
            );
        }
        Ok(())
    }
}

/// Renders the grid one week per line. Days with requests carry a `*`.
fn grid_lines(grid: &[CalendarCell<'_>]) -> Vec<String> {
    let header = WEEKDAYS
        .iter()
        .map(|day| format!("{day:>width$}", width = CELL_WIDTH))
        .collect::<String>();

    let mut lines = vec![header];
    for week in grid.chunks(7) {
        let line = week
            .iter()
            .map(|cell| {
                let text = match cell {
                    CalendarCell::Blank => String::new(),
                    CalendarCell::Day { date, requests } if requests.is_empty() => {
                        date.format("%-d").to_string()
                    }
                    CalendarCell::Day { date, .. } => format!("{}*", date.format("%-d")),
                };
                format!("{text:>width$}", width = CELL_WIDTH)
            })
            .collect::<String>();
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn print_agenda(store: &Store, grid: &[CalendarCell<'_>]) {
    let mut any = false;
    for cell in grid {
        let CalendarCell::Day { date, requests } = cell else {
            continue;
        };
        for request in requests {
            any = true;
            let equipment = store
                .equipment_of(request)
                .map_or(NOT_AVAILABLE, |equipment| equipment.name.as_str());
            println!(
                "{}  {} {}",
                date.format("%b %d").to_string().info(),
                request.subject,
                format!("({equipment})").dim()
            );
        }
    }
    if !any {
        println!("{}", "No maintenance scheduled this month.".dim());
    }
}

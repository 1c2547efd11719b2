use std::path::Path;

use clap::{Parser, Subcommand};
use gearguard::{
    Role, Section,
    domain::{NewUser, UserFilter},
};
use serde_json::json;
use tracing::instrument;

use super::{
    OutputFormat, open_store, print_json,
    terminal::{Colorize, print_table},
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List personnel
    List(List),

    /// Onboard a user
    Add(Add),
}

impl Command {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root),
            Self::Add(command) => {
                command.run(root);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
pub struct List {
    /// Case-insensitive match against name or email
    #[arg(long, short)]
    search: Option<String>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let users = store.search_users(&UserFilter {
            search: self.search,
        });

        match self.output {
            OutputFormat::Json => print_json(&json!(users)),
            OutputFormat::Table => {
                let rows: Vec<_> = users
                    .into_iter()
                    .map(|user| {
                        vec![
                            user.id.to_string(),
                            user.name.clone(),
                            user.email.clone(),
                            user.role.to_string(),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Name", "Email", "Role"],
                    &rows,
                    "No users match the search.",
                );
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
pub struct Add {
    /// Full name
    #[arg(long, short)]
    name: String,

    /// Email address
    #[arg(long, short)]
    email: String,

    /// Role (requester, technician, manager, admin)
    #[arg(long, default_value = "technician")]
    role: Role,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) {
        let mut store = open_store(root);
        if store.user_by_email(&self.email).is_some() {
            tracing::warn!(email = %self.email, "another user already has this email");
        }
        let user = store
            .create_user(NewUser::new(self.name, self.email, self.role))
            .clone();

        println!("Onboarded {} ({})", user.name.success(), user.id);
        let sections: Vec<_> = user.role.sections().into_iter().map(Section::label).collect();
        println!("{}", format!("Can view: {}", sections.join(", ")).dim());
    }
}

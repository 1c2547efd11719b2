use std::path::Path;

use gearguard::{Section, Session, storage};
use tracing::instrument;

use super::{open_store, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Login {
    /// Email address to log in with
    #[arg(long, short)]
    email: String,
}

impl Login {
    #[instrument(level = "debug")]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let session = Session::login(&store, &self.email);
        session.save(root)?;

        println!(
            "Logged in as {} ({})",
            session.user.name.success(),
            session.user.role
        );
        Ok(())
    }
}

#[instrument(level = "debug")]
pub fn logout(root: &Path) -> anyhow::Result<()> {
    if Session::clear(root)? {
        println!("Logged out.");
    } else {
        println!("{}", "Not logged in.".dim());
    }
    Ok(())
}

#[instrument(level = "debug")]
pub fn whoami(root: &Path) -> anyhow::Result<()> {
    let Some(session) = Session::load(root)? else {
        println!("{}", "Not logged in.".dim());
        return Ok(());
    };
    let user = &session.user;

    println!("{} <{}>", user.name, user.email);
    println!("Role: {}", user.role.to_string().info());
    let sections: Vec<_> = user.role.sections().into_iter().map(Section::label).collect();
    println!("Sections: {}", sections.join(", "));
    tracing::debug!("session file: {}", Session::path(root).display());
    println!(
        "{}",
        format!("Workspace: {}", storage::workspace_dir(root).display()).dim()
    );
    Ok(())
}

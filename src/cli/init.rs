use std::{fs, path::Path};

use gearguard::{Config, storage};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Length of generated record ids
    #[arg(long, value_name = "N")]
    id_length: Option<usize>,

    /// Category given to requests whose equipment is unknown
    #[arg(long, value_name = "CATEGORY")]
    fallback_category: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let dir = storage::workspace_dir(root);
        if dir.exists() {
            anyhow::bail!(
                "Workspace already initialized (found existing {} directory)",
                storage::WORKSPACE_DIR
            );
        }

        fs::create_dir_all(&dir).map_err(|e| {
            anyhow::anyhow!("Failed to create {} directory: {e}", storage::WORKSPACE_DIR)
        })?;

        let mut config = Config::default();
        if let Some(length) = self.id_length {
            config.set_id_length(length);
        }
        if let Some(category) = self.fallback_category {
            config.set_fallback_category(category);
        }
        config
            .save(&storage::config_path(root))
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!("Initialized maintenance workspace in {}", root.display());
        println!("  Created: {}/config.toml", storage::WORKSPACE_DIR);
        println!();
        println!("Next steps:");
        println!("  gear login --email admin@gearguard.io");
        println!("  gear dashboard");

        Ok(())
    }
}

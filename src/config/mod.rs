pub mod cli;
pub mod layout;

use crate::domain::model::MatchMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gallery-edit")]
#[command(about = "Bulk-update gallery cards in a static HTML page from a JSON mapping")]
pub struct CliConfig {
    #[arg(help = "JSON mapping file describing updates")]
    pub mapping: String,

    #[arg(long, default_value = "index.html", help = "HTML file to edit")]
    pub file: String,

    #[arg(long, value_enum, default_value_t = MatchMode::Position, help = "Match cards by position or by current title")]
    pub mode: MatchMode,

    #[arg(long, help = "Do not create a backup copy")]
    pub no_backup: bool,

    #[arg(long, help = "TOML file overriding the gallery layout names")]
    pub layout: Option<String>,

    #[arg(long, help = "Apply in memory and report, without writing any file")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn mapping_path(&self) -> &str {
        &self.mapping
    }

    fn target_path(&self) -> &str {
        &self.file
    }

    fn match_mode(&self) -> MatchMode {
        self.mode
    }

    fn backup_enabled(&self) -> bool {
        !self.no_backup
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("mapping", &self.mapping)?;
        validate_path("file", &self.file)?;
        if let Some(layout) = &self.layout {
            validate_path("layout", layout)?;
        }
        Ok(())
    }
}

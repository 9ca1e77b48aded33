use crate::core::provisioner::WiringGuard;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "provision")]
#[command(about = "Deploy the masterchef balance adapter and wire it into the treasury tracker")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "provision.toml")]
    pub config: String,

    /// Network identifier, must have a [networks.<id>] table in the config
    #[arg(short, long, env = "PROVISION_NETWORK")]
    pub network: String,

    /// Run only when one of these tags matches the unit's tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Override the wiring guard from config
    #[arg(long, value_enum)]
    pub guard: Option<WiringGuard>,

    /// Resolve addresses and print the wiring plan without submitting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        validate_non_empty_string("network", &self.network)
    }
}

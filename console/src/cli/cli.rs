// console/src/cli/cli.rs

// Argument parsing and command dispatch for `medicare`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lib::config::{load_client_config, ClientConfig};
use lib::router::Route;
use lib::AppContext;
use log::{debug, info};

use crate::cli::commands::{
    AdmissionCommand, AppointmentCommand, BillingCommand, ConfigCommand, ErArgs, FeedbackCommand, InventoryCommand,
    MaintenanceCommand, PatientCommand, PrescriptionCommand, StaffCommand,
};
use crate::cli::handlers as handlers_mod;
use crate::cli::handlers_admin;
use crate::cli::handlers_clinical;

#[derive(Parser, Debug)]
#[clap(author, version, about = "MediCare hospital console", long_about = None)]
#[clap(propagate_version = true)]
pub struct CliArgs {
    /// Path to the YAML config file (default ~/.medicare/config.yaml)
    #[clap(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Backend base URL, overriding the config file and MEDICARE_API_URL
    #[clap(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// End the session on this machine
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the navigation menu for your role
    Menu {
        /// Preview the menu for a role name instead
        #[arg(long)]
        role: Option<String>,
    },
    /// Open a route (e.g. /dashboard, /dashboard/er, billing) and render its view
    Open { route: Route },
    /// Emergency room board
    Er(ErArgs),
    Appointments {
        #[command(subcommand)]
        action: Option<AppointmentCommand>,
    },
    /// Facility maintenance tickets
    Maintenance {
        #[command(subcommand)]
        action: Option<MaintenanceCommand>,
    },
    /// Pharmacy inventory
    Inventory {
        #[command(subcommand)]
        action: Option<InventoryCommand>,
    },
    /// Wards, beds and inpatient admissions
    Admissions {
        #[command(subcommand)]
        action: Option<AdmissionCommand>,
    },
    Billing {
        #[command(subcommand)]
        action: Option<BillingCommand>,
    },
    Feedback {
        #[command(subcommand)]
        action: Option<FeedbackCommand>,
    },
    Prescriptions {
        #[command(subcommand)]
        action: Option<PrescriptionCommand>,
    },
    /// Doctor directory (HR)
    Staff {
        #[command(subcommand)]
        action: Option<StaffCommand>,
    },
    /// Registered patient accounts
    Patients {
        #[command(subcommand)]
        action: Option<PatientCommand>,
    },
    /// Show or save the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Effective configuration: file (or defaults), then environment, then flags.
pub fn resolve_config(args: &CliArgs) -> Result<ClientConfig> {
    let mut config = load_client_config(args.config.as_deref()).context("Failed to load client configuration")?;
    if let Some(url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        debug!("--api-url overrides api_base_url with {}", url);
        config.api_base_url = url.trim().to_string();
    }
    Ok(config)
}

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    let config = resolve_config(&args)?;
    let ctx = AppContext::new(config).context("Failed to set up the backend client")?;

    let snapshot = ctx.start();
    info!("Session restored: {}", snapshot.is_authenticated());

    run_command(&ctx, args.command, args.config.as_deref()).await
}

pub async fn run_command(ctx: &AppContext, command: Commands, config_path: Option<&std::path::Path>) -> Result<()> {
    match command {
        Commands::Login { email, password } => handlers_mod::handle_login(ctx, &email, password).await,
        Commands::Logout => {
            handlers_mod::handle_logout(ctx);
            Ok(())
        }
        Commands::Whoami => {
            handlers_mod::handle_whoami(ctx);
            Ok(())
        }
        Commands::Menu { role } => {
            handlers_mod::handle_menu(ctx, role.as_deref());
            Ok(())
        }
        Commands::Open { route } => handlers_mod::open_route(ctx, route).await,
        Commands::Er(args) => handlers_clinical::handle_er_command(ctx, args).await,
        Commands::Appointments { action } => handlers_clinical::handle_appointment_command(ctx, action).await,
        Commands::Admissions { action } => handlers_clinical::handle_admission_command(ctx, action).await,
        Commands::Prescriptions { action } => handlers_clinical::handle_prescription_command(ctx, action).await,
        Commands::Maintenance { action } => handlers_admin::handle_maintenance_command(ctx, action).await,
        Commands::Inventory { action } => handlers_admin::handle_inventory_command(ctx, action).await,
        Commands::Billing { action } => handlers_admin::handle_billing_command(ctx, action).await,
        Commands::Feedback { action } => handlers_admin::handle_feedback_command(ctx, action).await,
        Commands::Staff { action } => handlers_admin::handle_staff_command(ctx, action).await,
        Commands::Patients { action } => handlers_admin::handle_patient_command(ctx, action).await,
        Commands::Config { action } => handlers_mod::handle_config_command(ctx, action, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{ErCommand, StockDirection};
    use clap::CommandFactory;
    use models::medical::ErStatus;

    #[test]
    fn command_tree_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn routes_parse_from_paths_and_names() {
        let args = CliArgs::try_parse_from(["medicare", "open", "/dashboard/er"]).unwrap();
        assert!(matches!(args.command, Commands::Open { route: Route::Emergency }));
        let args = CliArgs::try_parse_from(["medicare", "open", "billing"]).unwrap();
        assert!(matches!(args.command, Commands::Open { route: Route::Billing }));
        assert!(CliArgs::try_parse_from(["medicare", "open", "/nowhere"]).is_err());
    }

    #[test]
    fn er_status_accepts_spaced_names() {
        let args = CliArgs::try_parse_from(["medicare", "er", "status", "c1", "In Treatment"]).unwrap();
        match args.command {
            Commands::Er(ErArgs { watch: false, action: Some(ErCommand::Status { id, status }) }) => {
                assert_eq!(id, "c1");
                assert_eq!(status, ErStatus::InTreatment);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn stock_adjustment_defaults_to_add() {
        let args = CliArgs::try_parse_from(["medicare", "inventory", "adjust", "i1", "5"]).unwrap();
        match args.command {
            Commands::Inventory { action: Some(InventoryCommand::Adjust { amount, direction, .. }) } => {
                assert_eq!(amount, 5);
                assert_eq!(direction, StockDirection::Add);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn api_url_flag_wins_over_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let args = CliArgs::try_parse_from([
            "medicare",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "https://hospital.example/api",
            "whoami",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.api_base_url, "https://hospital.example/api");
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use subusers::config::Config;
use subusers::constants::{ERROR_SUBUSER_NOT_FOUND, SUCCESS_SUBUSER_GRANTED, SUCCESS_SUBUSER_REVOKED};
use subusers::logger;
use subusers::service::SubuserService;
use subusers::storage::Storage;
use subusers::RepositoryError;

/// Manage subuser access to servers.
#[derive(Parser, Debug)]
#[command(name = "subusers", about = "Manage subuser access to servers")]
struct Cli {
    /// Write a default configuration file (to the user config dir when no path is given).
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List the subusers of a server as JSON.
    List { server_id: i32 },

    /// Show one subuser with its permissions as JSON.
    Show { user_id: i32, server_id: i32 },

    /// Give a user access to a server.
    Grant {
        server_id: i32,
        user_id: i32,
        permissions: Vec<String>,
    },

    /// Replace the permissions of an existing subuser.
    Permissions {
        user_id: i32,
        server_id: i32,
        permissions: Vec<String>,
    },

    /// Remove a user's access to a server.
    Revoke { user_id: i32, server_id: i32 },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(path) = cli.generate_config {
        let path = match path {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let Some(command) = cli.command else {
        eprintln!("Nothing to do; see `subusers --help`");
        return Ok(());
    };

    let config = Config::load()?;
    logger::init(&config.logging)?;

    let storage = Storage::connect(&config.database).await?;
    let service = SubuserService::new(&storage.conn, &config.permissions);

    println!("{}", execute(&command, &service).await?);
    Ok(())
}

/// Run one command and return what should be printed on success.
async fn execute(command: &Command, service: &SubuserService<'_>) -> Result<String> {
    let output = match command {
        Command::List { server_id } => serde_json::to_string_pretty(&service.list(*server_id).await?)?,
        Command::Show { user_id, server_id } => {
            serde_json::to_string_pretty(&service.get(*user_id, *server_id).await?)?
        }
        Command::Grant {
            server_id,
            user_id,
            permissions,
        } => {
            let subuser = service.grant(*server_id, *user_id, permissions).await?;
            format!("{} (#{})", SUCCESS_SUBUSER_GRANTED, subuser.id())
        }
        Command::Permissions {
            user_id,
            server_id,
            permissions,
        } => serde_json::to_string_pretty(&service.update_permissions(*user_id, *server_id, permissions).await?)?,
        Command::Revoke { user_id, server_id } => {
            service.revoke(*user_id, *server_id).await?;
            SUCCESS_SUBUSER_REVOKED.to_string()
        }
    };
    Ok(output)
}

fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<RepositoryError>() {
        Some(RepositoryError::RecordNotFound) => ERROR_SUBUSER_NOT_FOUND.to_string(),
        _ => format!("❌ {:#}", error),
    }
}

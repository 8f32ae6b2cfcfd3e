//! Container Peer CLI
//!
//! Runs contract invocations against a journal-backed development ledger.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use containerledger::config::{Config, WalSyncStrategy};
use containerledger::protocol::{Function, Invocation, Response, Status};
use containerledger::{Dispatcher, FileLedger};
use tracing_subscriber::{fmt, EnvFilter};

/// Container Peer
#[derive(Parser, Debug)]
#[command(name = "container-peer")]
#[command(about = "Invoke the container contract against a local development ledger")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./containerledger_data")]
    data_dir: String,

    /// fsync the journal every N writes instead of on every write
    #[arg(long)]
    sync_every: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the contract's instantiation hook
    Init,

    /// Create or update a container
    Put {
        /// Container UID
        uid: String,

        /// Content identifier
        cid: String,
    },

    /// Read a container
    Get {
        /// Container UID
        uid: String,
    },

    /// Delete a container
    Delete {
        /// Container UID
        uid: String,
    },

    /// Check whether a container exists
    Exists {
        /// Container UID
        uid: String,
    },

    /// Show every recorded version of a container
    History {
        /// Container UID
        uid: String,
    },

    /// List all containers
    List,

    /// List the history of every container
    ListHistory,

    /// Invoke a contract function by name
    Invoke {
        /// Function name, e.g. ReadContainer
        function: String,

        /// Function arguments
        args: Vec<String>,
    },
}

impl Commands {
    fn into_call(self) -> (String, Vec<String>) {
        let call = |function: Function, args: Vec<String>| (function.name().to_string(), args);
        match self {
            Commands::Init => call(Function::Init, vec![]),
            Commands::Put { uid, cid } => call(Function::CreateOrUpdateContainer, vec![uid, cid]),
            Commands::Get { uid } => call(Function::ReadContainer, vec![uid]),
            Commands::Delete { uid } => call(Function::DeleteContainer, vec![uid]),
            Commands::Exists { uid } => call(Function::ContainerExists, vec![uid]),
            Commands::History { uid } => call(Function::ReadContainerHistory, vec![uid]),
            Commands::List => call(Function::GetAllContainers, vec![]),
            Commands::ListHistory => call(Function::GetAllContainersHistory, vec![]),
            Commands::Invoke { function, args } => (function, args),
        }
    }
}

impl Args {
    fn config(&self) -> Config {
        let sync_strategy = match self.sync_every {
            Some(count) => WalSyncStrategy::EveryNEntries { count },
            None => WalSyncStrategy::EveryWrite,
        };
        Config::builder()
            .data_dir(&self.data_dir)
            .wal_sync_strategy(sync_strategy)
            .build()
    }
}

/// Run one subcommand as a transaction against `ledger`
fn execute(ledger: &FileLedger, command: Commands) -> Response {
    let (function, call_args) = command.into_call();
    match Invocation::parse(&function, &call_args) {
        Ok(invocation) => Dispatcher::new(ledger).execute(invocation),
        Err(e) => Response::error(&e.to_string()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();

    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Container Peer v{}", containerledger::VERSION);
    tracing::debug!("Data directory: {}", args.data_dir);

    let ledger = match FileLedger::open(config) {
        Ok(ledger) => ledger,
        Err(e) => {
            tracing::error!("Failed to open ledger: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let response = execute(&ledger, args.command);

    if let Err(e) = ledger.close() {
        tracing::error!("Failed to sync ledger: {}", e);
        return ExitCode::FAILURE;
    }

    report(&response)
}

/// Print the response payload and pick the exit code
fn report(response: &Response) -> ExitCode {
    let payload = String::from_utf8_lossy(response.payload_bytes());
    match response.status {
        Status::Ok => {
            if !payload.is_empty() {
                println!("{}", payload);
            }
            ExitCode::SUCCESS
        }
        Status::NotFound => {
            eprintln!("not found: {}", payload);
            ExitCode::from(2)
        }
        Status::Error => {
            eprintln!("error: {}", payload);
            ExitCode::FAILURE
        }
    }
}

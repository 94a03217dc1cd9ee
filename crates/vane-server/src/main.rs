//! `vane` administrative command line.
//!
//! Connects to the configured database and runs a single operation, printing
//! the result as JSON on stdout.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use vane_persistence::{CreateNamespaceRequest, UpdateNamespaceRequest};
use vane_server::{
    Server,
    model::config::{ConfigArgs, Configuration},
    model::request::{DeleteNamespaceRequest, GetNamespaceRequest, ListRequest},
    startup,
};

#[derive(Debug, Parser)]
#[command(name = "vane", version, about = "Vane feature flag storage administration")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Delete all namespaces, flags, and segments, then recreate the default namespace
    Reset {
        /// Required to confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Manage namespaces
    #[command(subcommand)]
    Namespaces(NamespaceCommand),
    /// List flags
    Flags(ListArgs),
    /// List segments
    Segments(ListArgs),
}

#[derive(Debug, Subcommand)]
enum NamespaceCommand {
    List(ListArgs),
    Get {
        key: String,
    },
    Create {
        key: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        key: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        key: String,
    },
}

#[derive(Debug, clap::Args)]
struct ListArgs {
    /// Namespace to list from; `*` lists every namespace
    #[arg(short = 'n', long = "namespace", default_value = "")]
    namespace: String,
    #[arg(long, default_value_t = 0)]
    limit: i64,
    #[arg(long, default_value_t = 0)]
    offset: i64,
    #[arg(long = "page-token", default_value = "")]
    page_token: String,
    /// `asc` or `desc`
    #[arg(long, default_value = "")]
    order: String,
}

impl From<ListArgs> for ListRequest {
    fn from(args: ListArgs) -> Self {
        ListRequest {
            namespace_key: args.namespace,
            limit: args.limit,
            offset: args.offset,
            page_token: args.page_token,
            order: args.order,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let configuration = Configuration::new(&cli.config)?;

    let _logging_guard = startup::init_logging(&configuration.logging_config())
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let store = startup::open_store(&configuration).await?;
    let server = Server::new(Arc::new(store));

    match cli.command {
        Command::Reset { yes } => {
            if !yes {
                anyhow::bail!("refusing to reset without --yes");
            }
            server.delete_all_contents().await?;
            info!("All contents deleted");
        }
        Command::Namespaces(NamespaceCommand::List(args)) => {
            print_json(&server.list_namespaces(&args.into()).await?)?;
        }
        Command::Namespaces(NamespaceCommand::Get { key }) => {
            print_json(&server.get_namespace(&GetNamespaceRequest { key }).await?)?;
        }
        Command::Namespaces(NamespaceCommand::Create {
            key,
            name,
            description,
        }) => {
            let request = CreateNamespaceRequest {
                key,
                name,
                description,
            };
            print_json(&server.create_namespace(&request).await?)?;
        }
        Command::Namespaces(NamespaceCommand::Update {
            key,
            name,
            description,
        }) => {
            let request = UpdateNamespaceRequest {
                key,
                name,
                description,
            };
            print_json(&server.update_namespace(&request).await?)?;
        }
        Command::Namespaces(NamespaceCommand::Delete { key }) => {
            server
                .delete_namespace(&DeleteNamespaceRequest { key })
                .await?;
        }
        Command::Flags(args) => {
            print_json(&server.list_flags(&args.into()).await?)?;
        }
        Command::Segments(args) => {
            print_json(&server.list_segments(&args.into()).await?)?;
        }
    }

    Ok(())
}

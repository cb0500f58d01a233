use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod migrate;
mod token;

#[derive(Parser)]
#[command(about = "job tracking api")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen {
        /// keep jobs in process memory instead of postgres
        #[arg(long)]
        in_memory: bool,
    },
    Migrate,
    /// mint a bearer token for local use
    Token {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
    },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen { in_memory }) => {
            listen(in_memory).await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Token { user_id, name }) => {
            token::mint(&user_id, &name)?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}

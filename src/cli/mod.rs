pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "casting-agency")]
#[command(about = "Casting agency API - actors, movies and castings behind role-based JWT permissions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the database tables and exit")]
    InitDb,

    #[command(about = "Print the permissions granted to each role")]
    Roles,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
        Some(Commands::InitDb) => commands::init::handle().await,
        Some(Commands::Roles) => {
            commands::roles::handle();
            Ok(())
        }
    }
}

use clap::{Parser, Subcommand};

mod company;
mod db;
mod report;
mod session;

#[derive(Debug, Parser)]
#[command(name = "pcm-app", about = "PCM maintenance CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Company(company::CompanyCommand),
    Session(session::SessionCommand),
    Report(report::ReportCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Company(command) => company::run(command).await,
            Commands::Session(command) => session::run(command).await,
            Commands::Report(command) => report::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

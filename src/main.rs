use backoffice_users::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Register(args) => cli::register::run(args).await,
        Command::Show(args) => cli::show::run(args).await,
        Command::List => cli::list::run().await,
        Command::Migrate => cli::migrate::run().await,
    }
}

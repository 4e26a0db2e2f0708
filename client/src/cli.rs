use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "mcts-client")]
#[clap(about = "Runs a tree search over the line world", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Run(RunCommand),
}

#[derive(Args)]
pub struct RunCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,

    /// Print the outcome as a single line of JSON instead of plain text.
    #[clap(long)]
    pub json: bool,
}

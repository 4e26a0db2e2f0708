mod cli;
mod options;
mod runner;
mod world;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use common::{ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use mcts::MCTSOptions;
use options::ClientOptions;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(run_args) => {
            let config_path = run_args.config.existing_file()?;
            let config = ConfigLoader::new(&config_path, "search")?;

            let mcts_options: MCTSOptions = config.load()?;
            let options: ClientOptions = config.load()?;

            info!("Loaded {:?}: {:?} {:?}", config_path, mcts_options, options);

            let report = runner::run(&options, mcts_options)?;

            if run_args.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

use clap::Parser;
use std::process;

use taskboard::cli::commands::{Cli, Commands};
use taskboard::{cli, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli_args = Cli::parse();
    logging::init_subscriber(if cli_args.verbose { "debug" } else { "warn" });

    let json_output = cli_args.json;
    let project_flag = cli_args.project;

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Project(cmd) => cli::project::run(cmd, json_output).await,
        Commands::Board => cli::board::run(json_output, project_flag).await,
        Commands::Task(cmd) => cli::task::run(cmd, json_output, project_flag).await,
        Commands::Team(cmd) => cli::team::run(cmd, json_output).await,
        Commands::Profile(cmd) => cli::profile::run(cmd, json_output),
    };

    process::exit(exit_code);
}

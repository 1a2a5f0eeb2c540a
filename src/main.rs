//! `hello_world`: load config, build the agent, run one prompt, print the result.

use std::process::ExitCode;

use agentrun::agent::Agent;
use agentrun::cli::Cli;
use agentrun::runner::Runner;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    agentrun::telemetry::init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> agentrun::error::Result<String> {
    let runner = Runner::from_env()?;
    let agent = Agent::new(cli.name.clone(), cli.instructions.clone());
    let result = runner.run_sync_with_config(&agent, cli.prompt.clone(), &cli.run_config())?;
    Ok(result.final_output)
}

use anyhow::Result;
use basma::cli::{Cli, Commands};
use basma::cli_ext::{distractors_cmd, group_cmd, pipeline_cmd, score_cmd, targets_cmd};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    basma::infra::logging::init(cli.quiet, cli.verbose, cli.no_color);

    // Build a context once, pass everywhere
    let ctx = cli.context();

    match cli.command {
        Commands::Score(args) => score_cmd::run(args, &ctx),
        Commands::Targets(args) => targets_cmd::run(args, &ctx),
        Commands::TargetsAll(args) => targets_cmd::run_all(args, &ctx),
        Commands::Group(args) => group_cmd::run(args, &ctx),
        Commands::Distractors(args) => distractors_cmd::run(args, &ctx),
        Commands::Pipeline(args) => pipeline_cmd::run(args, &ctx),
        Commands::Init(args) => basma::infra::config::init(args, &ctx),
        Commands::Completions(args) => basma::completion::run(args, &ctx),
    }
}

use super::args::{Cli, Commands, ConfigCommand};
use super::context::ExecutionContext;
use super::handlers;
use super::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(cli.root, cli.format)?;

    match cli.command {
        Commands::Reset => handlers::reset::handle(&ctx),

        Commands::Index => handlers::index::handle(&ctx),

        Commands::History { target, function } => {
            handlers::history::handle(&ctx, &target, &function)
        }

        Commands::Targets => handlers::targets::handle(&ctx),

        Commands::Output {
            target,
            function,
            run_id,
        } => handlers::artifact::handle(&ctx, &target, &function, run_id),

        Commands::RunId { args } => handlers::run_id::handle(&ctx, &args),

        Commands::Config { command } => match command {
            ConfigCommand::Init => handlers::config::init(&ctx),
            ConfigCommand::Show => handlers::config::show(&ctx),
        },
    }
}

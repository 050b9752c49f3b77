use creditlens::cli::commands::{CliArgs, Commands};
use creditlens::cli::handlers::{handle_assess, handle_render};
use creditlens::util::{init_logging, LoggingConfig};
use creditlens::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_cli_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("creditlens v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Assess(assess_args) => handle_assess(assess_args, args.quiet).await,
        Commands::Render(render_args) => handle_render(render_args),
    };

    std::process::exit(exit_code);
}

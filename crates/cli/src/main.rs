use clap::Parser;
use wab_cli::{cli::Cli, logging, output, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run::execute(cli).await {
        output::print_error(&err);
        std::process::exit(1);
    }
}

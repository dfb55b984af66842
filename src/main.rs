use advisor::api::{Cli, Command, run_http_server, run_plan_command};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Plan(args) => match run_plan_command(&args) {
            Ok(output) => print!("{output}"),
            Err(msg) => {
                tracing::error!(error = %msg, "plan failed");
                std::process::exit(1);
            }
        },
    }
}

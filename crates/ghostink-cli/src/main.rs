// GhostInk demo entry point

mod demo;

use clap::Parser;

/// Replay a scripted typing session through the suggestion engine
#[derive(Parser, Debug)]
#[command(name = "ghostink", version, about)]
struct Args {
    /// Render the interactive tooltip instead of inline ghost text
    #[arg(long)]
    tooltip: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if let Err(err) = demo::run(!args.tooltip).await {
        eprintln!("ghostink demo failed: {err}");
        std::process::exit(1);
    }
}

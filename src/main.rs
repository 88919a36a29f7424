use clap::Parser;
use toolshelf::cli::commands::{Cli, Commands};
use toolshelf::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let shelf_dir = cli.shelf_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = toolshelf::tui::run(shelf_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before shelf discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

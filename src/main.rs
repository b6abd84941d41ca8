mod cli;

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::args::{Cli, Commands, ConfigAction};
use pannypal_chat::config::settings::Settings;
use pannypal_chat::utils::format::error;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{}", error(&format!("{:#}", err)));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let explicit = cli.runtime.config.as_deref().map(Path::new);
    let mut settings = Settings::load_with(None, explicit)?;
    if cli.runtime.no_color || !settings.color {
        console::set_colors_enabled(false);
    }

    match &cli.command {
        Some(Commands::Render { file }) => {
            cli::commands::handle_render(&settings, file.as_deref(), &cli.io)?
        }
        Some(Commands::Chart { file, pretty }) => {
            cli::commands::handle_chart(&settings, file.as_deref(), *pretty, &cli.io)?
        }
        Some(Commands::Visualize { r#type, file }) => {
            cli::commands::handle_visualize(&settings, r#type.as_deref(), file.as_deref(), &cli.io)?
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force, scope } => {
                cli::commands::handle_config_init(*force, scope.as_deref())?
            }
            ConfigAction::List => cli::commands::handle_config_list(&settings)?,
            ConfigAction::Set { key, value } => {
                cli::commands::handle_config_set(&mut settings, key, value, explicit)?
            }
        },
        None => {
            // No command: show help
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

use clap::{Args, Parser, Subcommand};
use pannypal_chat::config::settings::InputKind;

#[derive(Parser, Debug)]
#[command(name = "pannypal", version, about = "Reads finance-assistant replies as text and charts", propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub io: IoArgs,

    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct IoArgs {
    /// How the input is encoded (defaults to the configured kind)
    #[arg(long = "input-kind", value_enum, global = true)]
    pub input_kind: Option<InputKind>,

    /// Output file path
    #[arg(short = 'o', long = "output", global = true)]
    pub output_file: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RuntimeArgs {
    /// Explicit config file path
    #[arg(long = "config", global = true)]
    pub config: Option<String>,

    /// Disable coloured output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a reply as text sections and its chart (file or stdin)
    Render { file: Option<String> },

    /// Print the chart chosen for a reply as JSON
    Chart {
        file: Option<String>,
        #[arg(long)]
        pretty: bool,
    },

    /// Build a chart from raw analytics data
    Visualize {
        /// bar, column, line, pie, donut or table; omit to read the
        /// reply's own `visualization_type`
        #[arg(long = "type")]
        r#type: Option<String>,
        file: Option<String>,
    },

    /// Config management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default config file (~/.pannypal/config.toml)
    Init {
        /// Overwrite if exists
        #[arg(long)]
        force: bool,
        /// Scope to create config: user or project (default: user)
        #[arg(long, value_parser = ["user", "project"])]
        scope: Option<String>,
    },
    Set { key: String, value: String },
    List,
}

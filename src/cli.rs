use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "openmoji", about = "Convert emoji in HTML using the OpenMoji dataset")]
pub struct Cli {
    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Load options from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Dataset location (path or URL); defaults to `json_url` from the config
    #[arg(short = 'd', long = "dataset", value_name = "LOCATION", global = true)]
    pub dataset: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render emoji in the readonly and editable regions of an HTML document
    Render {
        /// HTML file, or `-` for stdin
        input: PathBuf,
        /// Treat the input as a fragment and convert all of it
        #[arg(long)]
        fragment: bool,
        /// Inject the configured stylesheet into the document
        #[arg(long)]
        styles: bool,
    },
    /// Replace rendered emoji in an HTML fragment by their text form
    Plain {
        /// HTML file, or `-` for stdin
        input: PathBuf,
    },
    /// List picker categories with their icon and size
    Groups,
    /// Replace emoticons and glyphs in plain text by shorthands
    Shorthand {
        text: Vec<String>,
    },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn rustc/cargo JSON diagnostics into location-anchored problem messages.", long_about = None)]
pub struct Cli {
    /// Files holding JSON diagnostics; `-` or nothing reads stdin.
    pub inputs: Vec<PathBuf>,

    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Number of inputs parsed at once.
    #[arg(long = "jobs", short = 'j', default_value_t = 4)]
    pub jobs: usize,

    /// Report and skip inputs that fail to parse instead of failing.
    #[arg(long)]
    pub skip_invalid: bool,

    /// Print the parsed message tree instead of the flattened messages.
    #[arg(long)]
    pub tree: bool,

    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: severity: text`
    Plain,
    /// One JSON object per line.
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Cli {
    /// The inputs to read, with stdin spelled as `-`.
    pub fn input_paths(&self) -> Vec<PathBuf> {
        if self.inputs.is_empty() {
            vec![PathBuf::from("-")]
        } else {
            self.inputs.clone()
        }
    }
}

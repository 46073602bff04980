//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use subfont_subsetter::{encode_suffix, subset_family_name};

use crate::{
    io::{expand_inputs, read_text},
    parallel::run_parallel,
    subset::{SubsetJob, subset_file},
};

#[derive(Parser)]
#[command(name = "subfont")]
#[command(about = "Subset TrueType fonts down to the glyphs a fixed string needs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct TextSource {
    /// Text to retain glyphs for
    #[arg(short, long)]
    pub text: Option<String>,
    /// File whose contents are the text to retain glyphs for
    #[arg(long)]
    pub text_file: Option<PathBuf>,
}

impl TextSource {
    pub fn load(&self) -> Result<String> {
        match (&self.text, &self.text_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => read_text(path),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Subset font files or collections; one output per contained font
    Subset {
        /// Font files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,
        #[command(flatten)]
        text: TextSource,
        /// Suffix appended to family names and output file names
        #[arg(short, long)]
        suffix: Option<String>,
        /// Do not retain printable ASCII beyond the text
        #[arg(long)]
        no_ascii: bool,
        #[arg(short, long, default_value = "subset")]
        output_dir: PathBuf,
    },
    /// Print the family name a subset would be published under
    FamilyName {
        name: String,
        #[arg(short, long)]
        suffix: Option<String>,
    },
    /// Print the percent-encoded form of a suffix
    EncodeSuffix { suffix: String },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Subset { inputs, text, suffix, no_ascii, output_dir } => {
                let inputs = expand_inputs(&inputs)?;
                let job = SubsetJob {
                    text: text.load()?,
                    suffix,
                    include_ascii_printable: !no_ascii,
                    output_dir,
                };
                let written = run_parallel("Subset", &inputs, |input| subset_file(&job, input))
                    .ok_or_bail("Subset")?;
                for path in written.iter().flatten() {
                    println!("{}", path.display());
                }
            }
            Commands::FamilyName { name, suffix } => {
                println!("{}", subset_family_name(&name, suffix.as_deref()));
            }
            Commands::EncodeSuffix { suffix } => {
                println!("{}", encode_suffix(&suffix));
            }
        }
        Ok(())
    }
}

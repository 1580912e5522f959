// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for stepgraph

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stepgraph")]
#[command(about = "Validate and walk branching multi-step form templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a template for integrity problems
    Validate {
        #[arg(help = "Path to template YAML or JSON file")]
        template: PathBuf,

        #[arg(long, help = "Treat multiple last steps as an error")]
        strict: bool,
    },

    /// Print every step with its outgoing transitions
    Graph {
        #[arg(help = "Path to template YAML or JSON file")]
        template: PathBuf,
    },

    /// Walk a template with a set of answers
    Walk {
        #[arg(help = "Path to template YAML or JSON file")]
        template: PathBuf,

        #[arg(short = 'a', long = "answer", help = "Answer a field (field_id=value)")]
        answers: Vec<String>,

        #[arg(long, help = "Submit when a last step is reached")]
        submit: bool,

        #[arg(long, help = "Directory submissions are written to")]
        submissions_dir: Option<PathBuf>,
    },

    /// Write the bundled template to a new file
    Init {
        #[arg(help = "Name of the template file to create")]
        name: String,

        #[arg(short, long, help = "Output directory", default_value = ".")]
        output_dir: PathBuf,

        #[arg(long, help = "File format (yaml or json)", default_value = "yaml")]
        format: String,
    },

    /// List the bundled template categories
    Categories,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse answers from field_id=value format
    pub fn parse_answers(answers: &[String]) -> anyhow::Result<Vec<(String, String)>> {
        let mut parsed = Vec::with_capacity(answers.len());

        for answer in answers {
            if let Some((field_id, value)) = answer.split_once('=') {
                if field_id.trim().is_empty() {
                    return Err(anyhow::anyhow!("Answer '{}' has an empty field id", answer));
                }
                parsed.push((field_id.trim().to_string(), value.to_string()));
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid answer format '{}'. Expected 'field_id=value'",
                    answer
                ));
            }
        }

        Ok(parsed)
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use critique_core::ScanId;

/// Top-level CLI parser for the `critique` binary.
#[derive(Debug, Parser)]
#[command(name = "critique", version, about = "Resume critique client with scan history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (RON). Missing file means defaults.
    #[arg(short, long, global = true, default_value = "critique.ron")]
    pub config: PathBuf,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a resume for analysis and show the critique.
    Analyze {
        /// Resume document (PDF, DOCX, ...)
        document: Option<PathBuf>,
        /// Job description to match the resume against
        #[arg(short, long)]
        job_description: Option<String>,
    },
    /// List recent scans.
    History,
    /// Show the current scan, or make a past scan current.
    Show {
        /// Scan id from `history`
        id: Option<ScanId>,
    },
    /// Toggle between the light and dark theme.
    Theme,
    /// Show the raw text extracted from the current scan.
    Debug,
    /// Export the current scan as a standalone document.
    Export {
        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_takes_document_and_job_description() {
        let cli = Cli::try_parse_from([
            "critique",
            "analyze",
            "cv.pdf",
            "--job-description",
            "Rust engineer",
        ])
        .expect("cli should parse");

        let Commands::Analyze {
            document,
            job_description,
        } = cli.command
        else {
            panic!("expected analyze");
        };
        assert_eq!(document, Some(PathBuf::from("cv.pdf")));
        assert_eq!(job_description.as_deref(), Some("Rust engineer"));
        assert_eq!(cli.config, PathBuf::from("critique.ron"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["critique", "show", "42", "-v", "-c", "alt.ron"])
            .expect("cli should parse");

        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("alt.ron"));
        assert!(matches!(cli.command, Commands::Show { id: Some(42) }));
    }
}

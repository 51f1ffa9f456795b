//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory (project config lookup)
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Groundwork - content schema, rich-text renderer and page views for the
/// company website
#[derive(Parser, Debug)]
#[command(name = "groundwork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if groundwork was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a page to HTML
    #[command(
        name = "render",
        long_about = "Render a page of the site to HTML.\n\n\
            Content is read from the configured content store, or from a local \
            content export when --fixture is given (a JSON array of documents or \
            one document per line). Failed reads render the page's failure view.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Render the services page from the live dataset
    groundwork render services

    # Render from a local export
    groundwork render /projects --fixture export.ndjson > projects.html

    # Inspect the render tree
    groundwork render about --fixture export.json --json"
    )]
    Render {
        /// Route to render (name or path, e.g. `about` or `/about`)
        route: String,

        /// Read content from this export instead of the content store
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Print the render tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Show the queries a page issues
    #[command(
        name = "query",
        long_about = "Print the GROQ queries a page issues when it is activated.",
        after_help = "\
WORKFLOW EXAMPLES:
    # What does the home page read?
    groundwork query home"
    )]
    Query {
        /// Route (name or path)
        route: String,
    },

    /// Describe the content schema
    #[command(
        name = "schema",
        long_about = "List the document types of the content schema with their fields \
            and constraints.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Human-readable summary
    groundwork schema

    # Machine-readable declarations
    groundwork schema --json"
    )]
    Schema {
        /// Print the declarations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate documents against the schema
    #[command(
        name = "validate",
        long_about = "Validate every document in a content export against the schema.\n\n\
            References are resolved against the other documents in the same file. \
            Exits with an error when any document fails.",
        after_help = "\
WORKFLOW EXAMPLES:
    groundwork validate export.ndjson"
    )]
    Validate {
        /// Content export (JSON array or NDJSON)
        file: PathBuf,
    },

    /// Send a consultation request
    #[command(
        name = "contact",
        long_about = "Validate a consultation request and send it through the configured \
            email relay.\n\n\
            Missing required fields are reported one per line and nothing is sent.",
        after_help = "\
WORKFLOW EXAMPLES:
    groundwork contact --first-name Ada --last-name Byron --address '1 Main St' \\
        --phone 555-0100 --service-type flooring --preferred-time 2025-03-01T10:00

    # Check the form without sending
    groundwork contact --phone 555-0100 --dry-run"
    )]
    Contact {
        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// One of: bathroom_renovation, interior_remodeling, flooring,
        /// painting, venetian, other
        #[arg(long, default_value = "")]
        service_type: String,

        /// Local date and time, e.g. 2025-03-01T10:00
        #[arg(long, default_value = "")]
        preferred_time: String,

        #[arg(long, default_value = "")]
        special_notes: String,

        /// Validate only; do not send
        #[arg(long)]
        dry_run: bool,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "Read and write project configuration (groundwork.toml).\n\n\
            Values from the project file override the global config.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Point at a different dataset
    groundwork config set store.dataset staging

    # Show the effective configuration
    groundwork config list"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for groundwork commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    groundwork completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    groundwork completion zsh >> ~/.zshrc

    # Fish
    groundwork completion fish > ~/.config/fish/completions/groundwork.fish

    # PowerShell
    groundwork completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key, e.g. `store.dataset`
        key: String,
    },
    /// Set a configuration value in the project file
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List effective configuration values
    List,
}

/// Shell types for completion generation
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

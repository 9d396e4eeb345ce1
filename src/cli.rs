//! CLI definitions for Grammar Fixer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use grammarfix_config::Preset;
use grammarfix_protocols::endpoint::WireFormatKind;

/// Grammar Fixer CLI.
#[derive(Parser)]
#[command(name = "grammarfix")]
#[command(about = "Fix the grammar of selected text with an LLM")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file path (default: <config dir>/grammarfix/settings.toml)
    #[arg(short, long, env = "GRAMMARFIX_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Endpoint settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Send a short probe sentence to the configured endpoint
    Test,

    /// Run one correction cycle on a page holding TEXT
    Fix {
        /// Text to select and correct
        text: String,

        /// Address of the simulated page
        #[arg(long, default_value = "https://example.com/")]
        page_url: String,

        /// Put the text in a textarea instead of a paragraph
        #[arg(long)]
        textarea: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the current settings with the key masked
    Show,

    /// Update one or more settings
    Set {
        /// Endpoint URL
        #[arg(long)]
        api_url: Option<String>,

        /// API key
        #[arg(long)]
        api_key: Option<String>,

        /// Model name (empty for the vendor default)
        #[arg(long)]
        model: Option<String>,

        /// Wire format (openai, anthropic); inferred from the URL when unset
        #[arg(long)]
        format: Option<WireFormatKind>,
    },

    /// Fill in a vendor's URL and model, keeping the key
    Preset {
        /// openai, anthropic or local
        preset: Preset,
    },
}

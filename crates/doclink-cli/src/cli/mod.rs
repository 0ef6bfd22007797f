//! CLI for the doclink resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use doclink_core::config;
use std::path::PathBuf;

use commands::{
    run_append_token, run_blob_path, run_clean, run_decode, run_links, run_probe, run_resolve,
    run_sanitize_token,
};

/// Top-level CLI for doclink.
#[derive(Debug, Parser)]
#[command(name = "doclink")]
#[command(about = "doclink: recover document links from citation references", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/doclink/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a reference into a tokenized document link (JSON result).
    Resolve {
        /// Base64-encoded document reference.
        reference: String,
        /// Include raw and cleaned values in failure notices.
        #[arg(long)]
        diagnostics: bool,
        /// Print only the rendered HTML fragment.
        #[arg(long)]
        html: bool,
    },

    /// Decode a reference with the tolerant decoder and print the raw text.
    Decode {
        /// Base64-encoded document reference.
        reference: String,
    },

    /// Decode a reference and print the extracted document URL.
    Clean {
        /// Base64-encoded document reference.
        reference: String,
    },

    /// Print the server-proxied view and download links for a reference.
    Links {
        /// Base64-encoded document reference.
        reference: String,
        /// Document title used in the rendered actions.
        #[arg(long, default_value = "document")]
        title: String,
        /// Print only the rendered HTML fragment.
        #[arg(long)]
        html: bool,
    },

    /// Normalize an access token (quotes, whitespace, HTML entities).
    SanitizeToken {
        /// Raw token value.
        token: String,
    },

    /// Append an access token to a URL.
    AppendToken {
        /// Document URL.
        url: String,
        /// Token, with or without a leading `?`.
        token: String,
    },

    /// Show the storage container and blob name behind a reference.
    BlobPath {
        /// Base64-encoded document reference.
        reference: String,
    },

    /// Resolve a reference and send a HEAD request to the resulting link.
    Probe {
        /// Base64-encoded document reference.
        reference: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?
                .with_token_overrides(|name| std::env::var(name).ok()),
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let resolver_cfg = cfg.resolver_config();

        match cli.command {
            CliCommand::Resolve {
                reference,
                diagnostics,
                html,
            } => run_resolve(&resolver_cfg, &reference, diagnostics, html)?,
            CliCommand::Decode { reference } => run_decode(&resolver_cfg, &reference),
            CliCommand::Clean { reference } => run_clean(&resolver_cfg, &reference)?,
            CliCommand::Links {
                reference,
                title,
                html,
            } => run_links(&resolver_cfg, &reference, &title, html)?,
            CliCommand::SanitizeToken { token } => run_sanitize_token(&token),
            CliCommand::AppendToken { url, token } => run_append_token(&url, &token),
            CliCommand::BlobPath { reference } => run_blob_path(&resolver_cfg, &reference)?,
            CliCommand::Probe { reference } => run_probe(&resolver_cfg, &reference).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

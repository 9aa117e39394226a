//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the sccapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Security and Compliance Center command-line interface.
#[derive(Parser, Debug)]
#[command(name = "sccapi", about = "Security and Compliance Center API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and retries to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Address resources through a service instance instead of the account.
    #[arg(long, global = true, env = "SCC_INSTANCE_ID")]
    pub instance: Option<String>,

    /// Correlation id sent with every request.
    #[arg(long, global = true)]
    pub correlation_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: String,

        /// Profile ID (required for attachments).
        #[arg(long)]
        profile: Option<String>,
    },

    /// List entities with optional pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Number of items per page.
        #[arg(long)]
        limit: Option<i64>,

        /// Page token from a previous listing.
        #[arg(long)]
        start: Option<String>,

        /// Profile ID (limits attachments to one profile).
        #[arg(long)]
        profile: Option<String>,
    },

    /// Delete a custom control library, custom profile or attachment.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The entity ID.
        id: String,

        /// Profile ID (required for attachments).
        #[arg(long)]
        profile: Option<String>,
    },

    /// Start an on-demand scan of an attachment.
    Scan {
        /// The attachment to scan.
        attachment_id: String,
    },

    /// Show the event notification and object storage settings.
    Settings,
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A library of compliance controls.
    #[value(alias = "control-libraries", alias = "library")]
    ControlLibrary,
    /// A profile selecting controls from libraries.
    #[value(alias = "profiles")]
    Profile,
    /// A profile attached to a scope.
    #[value(alias = "attachments")]
    Attachment,
}

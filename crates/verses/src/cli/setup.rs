use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "verses",
    bin_name = "verses",
    version,
    disable_help_subcommand = true,
    after_help = "Data directory: --data-root, else VERSES_DATA_ROOT or data_root in verses.toml, else ./App_Data"
)]
#[command(about = "Administer retreat groups, verses and registrations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage directory (overrides config and environment)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_root: Option<PathBuf>,

    /// Config file to load instead of the default verses.toml
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage groups
    #[command(alias = "g", display_order = 1)]
    Groups {
        #[command(subcommand)]
        action: GroupCommands,
    },

    /// Manage verses
    #[command(alias = "v", display_order = 2)]
    Verses {
        #[command(subcommand)]
        action: VerseCommands,
    },

    /// Manage verse purposes
    #[command(alias = "p", display_order = 3)]
    Purposes {
        #[command(subcommand)]
        action: PurposeCommands,
    },

    /// Register verses to groups and track their status
    #[command(alias = "r", display_order = 4)]
    Registrations {
        #[command(subcommand)]
        action: RegistrationCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups
    #[command(alias = "ls")]
    List,

    /// Add a group
    Add {
        name: String,

        /// Group password
        #[arg(long, short = 'p')]
        password: String,
    },

    /// Rename a group, optionally changing its password
    Update {
        id: Uuid,

        name: String,

        /// New password (kept unchanged when omitted)
        #[arg(long, short = 'p')]
        password: Option<String>,
    },

    /// Check a group password
    Verify { id: Uuid, password: String },

    /// Delete one or more groups and their registrations
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<Uuid>,
    },

    /// Delete every group and every registration
    DeleteAll,
}

#[derive(Subcommand, Debug)]
pub enum VerseCommands {
    /// List verses
    #[command(alias = "ls")]
    List,

    /// Add a verse
    Add {
        text: String,

        /// Purpose label (see `verses purposes list`)
        #[arg(long, short = 'p')]
        purpose: String,
    },

    /// Replace a verse's text and purpose
    Update {
        id: Uuid,

        text: String,

        #[arg(long, short = 'p')]
        purpose: String,
    },

    /// Delete one or more verses and their registrations
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<Uuid>,
    },

    /// Delete every verse and every registration
    DeleteAll,
}

#[derive(Subcommand, Debug)]
pub enum PurposeCommands {
    /// List purposes, seeding the defaults on first use
    #[command(alias = "ls")]
    List,

    /// Add a purpose (case-insensitively unique)
    Add { name: String },
}

#[derive(Subcommand, Debug)]
pub enum RegistrationCommands {
    /// List registrations
    #[command(alias = "ls")]
    List {
        /// Only registrations of this group
        #[arg(long, short = 'g')]
        group: Option<Uuid>,
    },

    /// Register a verse to a group
    Register { group: Uuid, verse: Uuid },

    /// Remove a registration whatever its status
    Unregister { group: Uuid, verse: Uuid },

    /// Mark a registered verse as used
    Use { group: Uuid, verse: Uuid },

    /// Mark a registered verse as recited
    Recite { group: Uuid, verse: Uuid },

    /// Return a used or recited verse to registered
    Reset { group: Uuid, verse: Uuid },
}

//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Chooses process exit codes
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Logging, configuration, data directory, the API
//! 3. **Dispatch**: Route each subcommand to the matching API call
//! 4. **Output Formatting**: Delegate to `render`
//! 5. **Exit Codes**: Refused changes exit with `2`, errors bubble up to `main`

use super::render::{self, OutputMode};
use super::setup::{
    Cli, Commands, GroupCommands, PurposeCommands, RegistrationCommands, VerseCommands,
};
use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use versesapp::api::VersesApi;
use versesapp::config::VersesConfig;
use versesapp::model::OperationResult;
use versesapp::store::fs_backend::FsBackend;

const CONFIG_FILE_NAME: &str = "verses.toml";

/// Exit code for a change the store declined (not found, duplicate, rule).
const REFUSED: u8 = 2;

type Api = VersesApi<FsBackend>;

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_root = resolve_data_root(&cli)?;
    tracing::debug!(root = %data_root.display(), "using data directory");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        let api = VersesApi::open(&data_root)
            .await
            .with_context(|| format!("cannot open store at {}", data_root.display()))?;
        let state = AppState {
            api,
            mode: OutputMode::from_flag(cli.json),
        };
        state.dispatch(cli.command).await
    })
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("org", "verses", "verses").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn resolve_data_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.data_root {
        return Ok(root.clone());
    }

    let config_file = cli.config.clone().or_else(default_config_file);
    let config = VersesConfig::load(config_file.as_deref())?;
    let content_root = std::env::current_dir().context("cannot read current directory")?;
    Ok(config.data_root(&content_root))
}

/// Outcome of a mutation the store may decline.
fn exit_code(applied: bool) -> ExitCode {
    if applied {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(REFUSED)
    }
}

struct AppState {
    api: Api,
    mode: OutputMode,
}

impl AppState {
    async fn dispatch(&self, command: Commands) -> Result<ExitCode> {
        match command {
            Commands::Groups { action } => self.groups(action).await,
            Commands::Verses { action } => self.verses(action).await,
            Commands::Purposes { action } => self.purposes(action).await,
            Commands::Registrations { action } => self.registrations(action).await,
        }
    }

    fn emit(&self, rendered: serde_json::Result<String>, code: ExitCode) -> Result<ExitCode> {
        println!("{}", rendered?);
        Ok(code)
    }

    fn flag(&self, applied: bool, yes: &str, no: &str) -> Result<ExitCode> {
        let message = if applied { yes } else { no };
        self.emit(render::applied(applied, message, self.mode), exit_code(applied))
    }

    fn outcome(&self, result: OperationResult) -> Result<ExitCode> {
        self.emit(render::outcome(&result, self.mode), exit_code(result.success))
    }

    async fn groups(&self, action: GroupCommands) -> Result<ExitCode> {
        let api = &self.api;
        match action {
            GroupCommands::List => {
                let groups = api.groups().await?;
                self.emit(render::groups(&groups, self.mode), ExitCode::SUCCESS)
            }
            GroupCommands::Add { name, password } => {
                let group = api.add_group(&name, &password).await?;
                self.emit(render::group_created(&group, self.mode), ExitCode::SUCCESS)
            }
            GroupCommands::Update { id, name, password } => {
                let updated = api.update_group(id, &name, password.as_deref()).await?;
                self.flag(updated, "Group updated.", "No group updated.")
            }
            GroupCommands::Verify { id, password } => {
                let accepted = api.verify_group_password(id, &password).await?;
                self.flag(accepted, "Password accepted.", "Password rejected.")
            }
            GroupCommands::Delete { ids } => {
                if let [id] = ids.as_slice() {
                    let deleted = api.delete_group(*id).await?;
                    self.flag(deleted, "Group deleted.", "Group not found.")
                } else {
                    let count = api.delete_groups(&ids).await?;
                    self.emit(render::deleted(count, "group", self.mode), exit_code(count > 0))
                }
            }
            GroupCommands::DeleteAll => {
                let count = api.delete_all_groups().await?;
                self.emit(render::deleted(count, "group", self.mode), ExitCode::SUCCESS)
            }
        }
    }

    async fn verses(&self, action: VerseCommands) -> Result<ExitCode> {
        let api = &self.api;
        match action {
            VerseCommands::List => {
                let verses = api.verses().await?;
                self.emit(render::verses(&verses, self.mode), ExitCode::SUCCESS)
            }
            VerseCommands::Add { text, purpose } => {
                let verse = api.add_verse(&text, &purpose).await?;
                self.emit(render::verse_created(&verse, self.mode), ExitCode::SUCCESS)
            }
            VerseCommands::Update { id, text, purpose } => {
                let updated = api.update_verse(id, &text, &purpose).await?;
                self.flag(updated, "Verse updated.", "No verse updated.")
            }
            VerseCommands::Delete { ids } => {
                if let [id] = ids.as_slice() {
                    let deleted = api.delete_verse(*id).await?;
                    self.flag(deleted, "Verse deleted.", "Verse not found.")
                } else {
                    let count = api.delete_verses(&ids).await?;
                    self.emit(render::deleted(count, "verse", self.mode), exit_code(count > 0))
                }
            }
            VerseCommands::DeleteAll => {
                let count = api.delete_all_verses().await?;
                self.emit(render::deleted(count, "verse", self.mode), ExitCode::SUCCESS)
            }
        }
    }

    async fn purposes(&self, action: PurposeCommands) -> Result<ExitCode> {
        match action {
            PurposeCommands::List => {
                let purposes = self.api.purposes().await?;
                self.emit(render::purposes(&purposes, self.mode), ExitCode::SUCCESS)
            }
            PurposeCommands::Add { name } => {
                let added = self.api.add_purpose(&name).await?;
                self.flag(added, "Purpose added.", "Purpose already exists.")
            }
        }
    }

    async fn registrations(&self, action: RegistrationCommands) -> Result<ExitCode> {
        let api = &self.api;
        let result = match action {
            RegistrationCommands::List { group } => {
                let registrations = match group {
                    Some(group) => api.registrations_for_group(group).await?,
                    None => api.registrations().await?,
                };
                return self.emit(
                    render::registrations(&registrations, self.mode),
                    ExitCode::SUCCESS,
                );
            }
            RegistrationCommands::Register { group, verse } => {
                api.register_verse(group, verse).await?
            }
            RegistrationCommands::Unregister { group, verse } => {
                api.unregister_verse(group, verse).await?
            }
            RegistrationCommands::Use { group, verse } => api.use_verse(group, verse).await?,
            RegistrationCommands::Recite { group, verse } => {
                api.recite_verse(group, verse).await?
            }
            RegistrationCommands::Reset { group, verse } => {
                api.reset_verse_status(group, verse).await?
            }
        };
        self.outcome(result)
    }
}

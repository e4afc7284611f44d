//! Shell context, command dispatch, and error reporting.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::commands::{self, CommandDefinition, CommandRegistry};
use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::core::{LedgerEvent, LedgerObserver, LedgerStore, SystemClock};
use crate::errors::LedgerError;
use crate::storage::{JsonFileStore, MemoryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

/// Failures of a single command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) store: LedgerStore,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Loads configuration and opens the ledger file from the app data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                output::warning(format!("{err}. Using default settings."));
                Config::default()
            }
        };

        let ledger_path = config_manager.ledger_path(&config);
        let observers: Vec<Box<dyn LedgerObserver>> = vec![Box::new(print_event)];
        let store = match JsonFileStore::open(&ledger_path) {
            Ok(file) => LedgerStore::open_with_observers(file, SystemClock, observers),
            Err(err) => {
                output::warning(format!(
                    "{err}. Changes in this session will not be saved."
                ));
                LedgerStore::open_with_observers(MemoryStore::new(), SystemClock, observers)
            }
        };

        let context = Self::with_store(mode, store, config, config_manager);
        if context.store.initial_balance() == 0.0 {
            output::hint("Initial balance is not set. Use `balance set <amount>` to set it.");
        }
        Ok(context)
    }

    pub(crate) fn with_store(
        mode: CliMode,
        store: LedgerStore,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub(crate) fn prompt(&self) -> String {
        "ledger> ".to_string()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|def| def.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    /// Asks for confirmation in interactive mode; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(LedgerError::Persistence(message)) => {
                output::error(format!("Failed to save data: {message}"));
                output::hint("The change is kept for this session only.");
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        self.config.format_amount(amount)
    }
}

/// Observer registered with the store for the whole session.
fn print_event(event: &LedgerEvent) {
    match event {
        LedgerEvent::TransactionAdded(txn) => output::success(format!(
            "Transaction #{} added: {} {:.2} ({}).",
            txn.id(),
            txn.kind(),
            txn.amount(),
            txn.category()
        )),
        LedgerEvent::TransactionUpdated(txn) => {
            output::success(format!("Transaction #{} updated.", txn.id()))
        }
        LedgerEvent::TransactionDeleted(txn) => {
            output::success(format!("Transaction #{} deleted.", txn.id()))
        }
        LedgerEvent::BalanceChanged { initial_balance } => {
            output::success(format!("Initial balance set to {initial_balance:.2}."))
        }
        LedgerEvent::StorageError(message) => output::warning(message),
    }
}

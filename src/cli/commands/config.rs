use crate::cli::commands::{usage_error, CommandDefinition};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Config;

const CONFIG_USAGE: &str = "config [show|set <currency|sort|ledger-file> <value>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change shell preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(usage_error(CONFIG_USAGE));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated.set_value(key, value.trim())?;
            let ledger_moved = updated.ledger_file != context.config.ledger_file;
            context.config = updated;
            context.persist_config()?;
            output::success(format!("Updated `{}`.", key.to_ascii_lowercase()));
            if ledger_moved {
                output::hint("Restart the shell to open the new ledger file.");
            }
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  currency    : {}", config.currency_symbol));
    output::info(format!("  sort        : {}", config.default_sort));
    output::info(format!(
        "  ledger-file : {}",
        context.config_manager.ledger_path(config).display()
    ));
    output::info(format!("  Keys: {}", Config::KEYS.join(", ")));
}

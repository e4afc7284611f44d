use crate::cli::commands::{parse_kind, usage_error, CommandDefinition};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output::{self, Alignment, Table};
use crate::core::LedgerStore;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "balance",
            "Show the balance summary or set the initial balance",
            "balance [set <amount>]",
            cmd_balance,
        ),
        CommandDefinition::new(
            "categories",
            "List the categories allowed for a type",
            "categories <income|expense>",
            cmd_categories,
        ),
        CommandDefinition::new(
            "breakdown",
            "Show each category's share of a type's total",
            "breakdown <income|expense>",
            cmd_breakdown,
        ),
    ]
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let summary = context.store.balance_summary();
            output::section("Balance");
            output::info(format!(
                "  Initial  : {}",
                context.format_amount(summary.initial_balance)
            ));
            output::info(format!("  Income   : {}", context.format_amount(summary.income)));
            output::info(format!("  Expenses : {}", context.format_amount(summary.expenses)));
            output::info(format!(
                "  Current  : {}",
                context.format_amount(summary.total_balance)
            ));
            Ok(())
        }
        [action, amount] if action.eq_ignore_ascii_case("set") => {
            context.store.set_initial_balance(amount)?;
            Ok(())
        }
        _ => Err(usage_error("balance [set <amount>]")),
    }
}

fn cmd_categories(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind] = args else {
        return Err(usage_error("categories <income|expense>"));
    };
    let kind = parse_kind(kind)?;
    output::section(format!("Categories ({kind})"));
    for category in LedgerStore::categories(kind) {
        output::info(format!("  {category}"));
    }
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind] = args else {
        return Err(usage_error("breakdown <income|expense>"));
    };
    let kind = parse_kind(kind)?;
    let shares = context.store.category_proportions(kind);
    if shares.is_empty() {
        output::info(format!("No {kind} transactions to break down."));
        return Ok(());
    }
    let mut table = Table::new(&[
        ("Category", Alignment::Left),
        ("Amount", Alignment::Right),
        ("Share", Alignment::Right),
    ]);
    for share in &shares {
        table.push(vec![
            share.category.clone(),
            context.format_amount(share.amount),
            format!("{:.1}%", share.percentage),
        ]);
    }
    output::section(format!("Breakdown ({kind})"));
    output::plain(table.render());
    Ok(())
}

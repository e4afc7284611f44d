use crate::cli::commands::{parse_id, usage_error, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, Alignment, Table};
use crate::core::SortOrder;
use crate::ledger::{Transaction, TransactionDraft, TransactionPatch};

const ADD_USAGE: &str = "add <income|expense> <title> <amount> <category> [YYYY-MM-DD]";
const EDIT_USAGE: &str = "edit <id> <field>=<value>... (fields: title, amount, category, type, date)";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandDefinition::new("edit", "Change fields of a transaction", EDIT_USAGE, cmd_edit),
        CommandDefinition::new("delete", "Remove a transaction", "delete <id>", cmd_delete),
        CommandDefinition::new("show", "Show one transaction", "show <id>", cmd_show),
        CommandDefinition::new(
            "list",
            "List transactions by date",
            "list [asc|desc]",
            cmd_list,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, title, amount, category, date) = match args {
        [kind, title, amount, category] => (kind, title, amount, category, None),
        [kind, title, amount, category, date] => (kind, title, amount, category, Some(date)),
        _ => return Err(usage_error(ADD_USAGE)),
    };
    let mut draft =
        TransactionDraft::new(kind.to_ascii_lowercase(), *title, *amount, *category);
    if let Some(date) = date {
        draft = draft.on(*date);
    }
    context.store.add_transaction(&draft)?;
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, assignments)) = args.split_first() else {
        return Err(usage_error(EDIT_USAGE));
    };
    let id = parse_id(id)?;
    let patch = parse_patch(assignments)?;
    if patch.is_empty() {
        return Err(usage_error(EDIT_USAGE));
    }
    context.store.edit_transaction(id, &patch)?;
    Ok(())
}

pub(crate) fn parse_patch(assignments: &[&str]) -> Result<TransactionPatch, CommandError> {
    let mut patch = TransactionPatch::default();
    for assignment in assignments {
        let Some((field, value)) = assignment.split_once('=') else {
            return Err(CommandError::InvalidArguments(format!(
                "expected <field>=<value>, got `{assignment}`"
            )));
        };
        patch = match field.trim().to_ascii_lowercase().as_str() {
            "title" => patch.with_title(value),
            "amount" => patch.with_amount(value),
            "category" => patch.with_category(value),
            "type" | "kind" => patch.with_kind(value.to_ascii_lowercase()),
            "date" => patch.with_date(value),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{other}`"
                )))
            }
        };
    }
    Ok(patch)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage_error("delete <id>"));
    };
    let id = parse_id(id)?;
    let existing = context.store.transaction(id)?;
    let prompt = format!(
        "Delete transaction #{} \"{}\" ({})?",
        existing.id(),
        existing.title(),
        context.format_amount(existing.amount())
    );
    if !context.confirm(&prompt)? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    context.store.delete_transaction(id)?;
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage_error("show <id>"));
    };
    let txn = context.store.transaction(parse_id(id)?)?;
    output::section(format!("Transaction #{}", txn.id()));
    output::info(format!("  Title    : {}", txn.title()));
    output::info(format!("  Type     : {}", txn.kind()));
    output::info(format!("  Amount   : {}", context.format_amount(txn.amount())));
    output::info(format!("  Category : {}", txn.category()));
    output::info(format!("  Date     : {}", txn.date()));
    output::info(format!("  Created  : {}", txn.created_at().to_rfc3339()));
    output::info(format!("  Updated  : {}", txn.updated_at().to_rfc3339()));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let order = match args {
        [] => context.config.default_sort,
        [order] => order.parse::<SortOrder>()?,
        _ => return Err(usage_error("list [asc|desc]")),
    };
    let transactions = context.store.sorted_transactions(order);
    if transactions.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    output::plain(transaction_table(context, &transactions).render());
    Ok(())
}

pub(crate) fn transaction_table(context: &ShellContext, transactions: &[Transaction]) -> Table {
    let mut table = Table::new(&[
        ("ID", Alignment::Right),
        ("Date", Alignment::Left),
        ("Type", Alignment::Left),
        ("Category", Alignment::Left),
        ("Title", Alignment::Left),
        ("Amount", Alignment::Right),
    ]);
    for txn in transactions {
        table.push(vec![
            txn.id().to_string(),
            txn.date().to_string(),
            txn.kind().to_string(),
            txn.category().to_string(),
            txn.title().to_string(),
            context.format_amount(txn.amount()),
        ]);
    }
    table
}

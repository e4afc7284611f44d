use tempfile::TempDir;

use super::transaction::parse_patch;
use super::{parse_id, parse_kind};
use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::config::{Config, ConfigManager};
use crate::core::{FixedClock, LedgerStore, SortOrder};
use crate::errors::LedgerError;
use crate::ledger::TransactionKind;
use crate::storage::MemoryStore;

fn context() -> (ShellContext, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let store = LedgerStore::open(MemoryStore::new(), FixedClock::at(2024, 1, 20, 9, 0));
    let context = ShellContext::with_store(CliMode::Script, store, Config::default(), manager);
    (context, dir)
}

#[test]
fn add_records_transaction_with_explicit_date() {
    let (mut ctx, _dir) = context();
    ctx.process_line(r#"add expense "Team lunch" 12.50 Food 2024-01-10"#)
        .unwrap();
    let txn = ctx.store.transaction(1).unwrap();
    assert_eq!(txn.title(), "Team lunch");
    assert_eq!(txn.amount(), 12.5);
    assert_eq!(txn.date().to_string(), "2024-01-10");
}

#[test]
fn add_rejects_invalid_input_without_consuming_id() {
    let (mut ctx, _dir) = context();
    let err = ctx
        .process_line("add expense Lunch 12.50 Salary")
        .unwrap_err();
    assert!(matches!(err, CommandError::Core(LedgerError::Validation(_))));
    assert!(ctx.store.is_empty());
    assert_eq!(ctx.store.next_id(), 1);

    assert!(matches!(
        ctx.process_line("add expense Lunch"),
        Err(CommandError::InvalidArguments(_))
    ));
}

#[test]
fn edit_and_delete_round_trip() {
    let (mut ctx, _dir) = context();
    ctx.process_line("add income Paycheck 500 Salary 2024-01-15")
        .unwrap();
    ctx.process_line("edit 1 amount=650 category=Bonus").unwrap();
    let txn = ctx.store.transaction(1).unwrap();
    assert_eq!(txn.amount(), 650.0);
    assert_eq!(txn.category(), "Bonus");

    ctx.process_line("delete #1").unwrap();
    assert!(ctx.store.is_empty());
    assert!(matches!(
        ctx.process_line("delete 1"),
        Err(CommandError::Core(LedgerError::NotFound(1)))
    ));
}

#[test]
fn balance_set_updates_summary() {
    let (mut ctx, _dir) = context();
    ctx.process_line("balance set 1000").unwrap();
    ctx.process_line("add expense Lunch 12.50 Food 2024-01-10")
        .unwrap();
    ctx.process_line("add income Paycheck 500 Salary 2024-01-15")
        .unwrap();
    ctx.process_line("balance").unwrap();
    assert_eq!(ctx.store.current_balance(), 1487.5);
}

#[test]
fn report_range_rejects_future_end() {
    let (mut ctx, _dir) = context();
    assert!(matches!(
        ctx.process_line("report range 2024-01-01 2024-02-01"),
        Err(CommandError::InvalidArguments(_))
    ));
    ctx.process_line("report range 2024-01-01 2024-01-20 --json")
        .unwrap();
    ctx.process_line("report month 2024 1").unwrap();
    assert!(matches!(
        ctx.process_line("report month 2024 13"),
        Err(CommandError::Core(LedgerError::Validation(_)))
    ));
}

#[test]
fn config_set_persists_preferences() {
    let (mut ctx, dir) = context();
    ctx.process_line("config set sort asc").unwrap();
    ctx.process_line("config set currency €").unwrap();
    assert_eq!(ctx.config.default_sort, SortOrder::Asc);

    let reloaded = ConfigManager::with_base_dir(dir.path().to_path_buf())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(reloaded.currency_symbol, "€");
    assert!(matches!(
        ctx.process_line("config set theme dark"),
        Err(CommandError::Core(LedgerError::Config(_)))
    ));
}

#[test]
fn unknown_commands_continue_and_exit_stops() {
    let (mut ctx, _dir) = context();
    assert_eq!(ctx.process_line("lst").unwrap(), LoopControl::Continue);
    assert_eq!(ctx.process_line("exit").unwrap(), LoopControl::Exit);
}

#[test]
fn argument_parsers() {
    assert_eq!(parse_id("#42").unwrap(), 42);
    assert!(parse_id("abc").is_err());
    assert_eq!(parse_kind("Income").unwrap(), TransactionKind::Income);
    assert!(parse_kind("transfer").is_err());

    let patch = parse_patch(&["title=Dinner out", "type=Expense"]).unwrap();
    assert_eq!(patch.title.as_deref(), Some("Dinner out"));
    assert_eq!(patch.kind.as_deref(), Some("expense"));
    assert!(parse_patch(&["colour=red"]).is_err());
    assert!(parse_patch(&["title"]).is_err());
}

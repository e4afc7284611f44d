use crate::cli::commands::{usage_error, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, Alignment, Table};
use crate::core::services::{DateRange, KindBreakdown, PeriodReport};
use crate::ledger::{parse_date, TransactionKind};

const REPORT_USAGE: &str =
    "report month <year> <month> [--json] | report range <YYYY-MM-DD> <YYYY-MM-DD> [--json]";
const JSON_FLAG: &str = "--json";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "report",
            "Summarize a month or a custom date range",
            REPORT_USAGE,
            cmd_report,
        ),
        CommandDefinition::new(
            "years",
            "List years available for reports",
            "years",
            cmd_years,
        ),
    ]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let json = args.iter().any(|arg| arg.eq_ignore_ascii_case(JSON_FLAG));
    let positional: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| !arg.eq_ignore_ascii_case(JSON_FLAG))
        .collect();

    let report = match positional.as_slice() {
        [scope, year, month] if scope.eq_ignore_ascii_case("month") => {
            let year: i32 = year
                .parse()
                .map_err(|_| CommandError::InvalidArguments(format!("`{year}` is not a year")))?;
            let month: u32 = month.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("`{month}` is not a month number"))
            })?;
            context.store.monthly_report(year, month)?
        }
        [scope, start, end] if scope.eq_ignore_ascii_case("range") => {
            let range = DateRange::new(parse_date(start)?, parse_date(end)?)?;
            if range.end > context.store.clock().today() {
                return Err(CommandError::InvalidArguments(
                    "End date cannot be in the future".into(),
                ));
            }
            context.store.date_range_report(range)
        }
        _ => return Err(usage_error(REPORT_USAGE)),
    };

    if json {
        output::plain(serde_json::to_string_pretty(&report)?);
    } else {
        print_report(context, &report);
    }
    Ok(())
}

fn print_report(context: &ShellContext, report: &PeriodReport) {
    let summary = &report.period_summary;
    output::section(format!(
        "Report {} to {} ({} days)",
        summary.start_date, summary.end_date, summary.day_count
    ));
    output::info(format!(
        "  Income   : {} (avg {}/day)",
        context.format_amount(summary.total_income),
        context.format_amount(summary.daily_avg_income)
    ));
    output::info(format!(
        "  Expenses : {} (avg {}/day)",
        context.format_amount(summary.total_expense),
        context.format_amount(summary.daily_avg_expense)
    ));
    output::info(format!("  Net      : {}", context.format_amount(summary.net_income)));

    for kind in TransactionKind::ALL {
        print_breakdown(context, kind, report.breakdown(kind));
    }
}

fn print_breakdown(context: &ShellContext, kind: TransactionKind, breakdown: &KindBreakdown) {
    if breakdown.categories.is_empty() {
        return;
    }
    let mut table = Table::new(&[
        ("Category", Alignment::Left),
        ("Count", Alignment::Right),
        ("Amount", Alignment::Right),
        ("Average", Alignment::Right),
        ("Share", Alignment::Right),
    ]);
    for stats in &breakdown.categories {
        table.push(vec![
            stats.category.clone(),
            stats.count.to_string(),
            context.format_amount(stats.amount),
            context.format_amount(stats.avg_amount),
            format!("{:.1}%", stats.percentage),
        ]);
    }
    output::section(format!("{kind} by category"));
    output::plain(table.render());
}

fn cmd_years(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("years"));
    }
    let years: Vec<String> = context
        .store
        .available_years()
        .iter()
        .map(i32::to_string)
        .collect();
    output::info(format!("Available years: {}", years.join(", ")));
    Ok(())
}

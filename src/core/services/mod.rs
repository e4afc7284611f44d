//! Aggregation engine: pure functions over a transaction list and initial balance.

pub mod report_service;
pub mod summary_service;

pub use report_service::{
    CategoryStats, DateRange, KindBreakdown, PeriodReport, PeriodSummary, ReportService,
};
pub use summary_service::{BalanceSummary, CategoryShare, SummaryService};

#[cfg(test)]
mod tests;

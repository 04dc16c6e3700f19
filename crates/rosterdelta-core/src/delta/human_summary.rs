//! Human-readable summary renderer for delta reports.

use crate::config::{JoinMode, OutputPolicy};
use crate::delta::model::{ChangeKind, DeltaReport};

/// Entries listed individually before the summary collapses the rest.
const MAX_LISTED_ENTRIES: usize = 50;

/// Render a human-readable Markdown summary of a [`DeltaReport`].
///
/// Informational only; it lists keys and column names, never cell values.
pub fn render_human_summary(report: &DeltaReport) -> String {
    let mut out = String::new();

    out.push_str("## Snapshot Delta\n\n");

    let policy_label = match report.output_policy {
        OutputPolicy::Simple => "Simple",
        OutputPolicy::Strict => "Strict",
    };
    let join_label = match report.join_mode {
        JoinMode::NewAndChangedOnly => "New and changed only",
        JoinMode::IncludeRemoved => "Include removed",
    };
    out.push_str(&format!(
        "**Key column**: `{}`  \n**Output policy**: {policy_label}  \n**Join mode**: {join_label}\n\n",
        report.key_column
    ));

    let c = &report.counts;
    out.push_str(&format!(
        "| Prior rows | Latest rows | New | Changed | Removed | Unchanged | Filtered |\n\
         |---|---|---|---|---|---|---|\n\
         | {} | {} | {} | {} | {} | {} | {} |\n\n",
        c.prior_rows, c.latest_rows, c.new, c.changed, c.removed, c.unchanged, c.filtered
    ));

    if !report.ignored_exempt_columns.is_empty() {
        out.push_str(&format!(
            "_Exempt columns not in latest (ignored)_: {}\n\n",
            backticked(&report.ignored_exempt_columns)
        ));
    }

    if report.is_empty() {
        out.push_str("_No new or changed records._\n");
        return out;
    }

    let touched: Vec<(&String, &usize)> = report
        .column_change_counts
        .iter()
        .filter(|(_, n)| **n > 0)
        .collect();
    if !touched.is_empty() {
        out.push_str("### Column Changes\n\n");
        for (column, n) in touched {
            out.push_str(&format!("- `{}`: {}\n", column, n));
        }
        out.push('\n');
    }

    out.push_str("### Records\n\n");
    for entry in report.entries.iter().take(MAX_LISTED_ENTRIES) {
        match entry.kind {
            ChangeKind::New => out.push_str(&format!("- `{}` new\n", entry.key)),
            ChangeKind::Changed => out.push_str(&format!(
                "- `{}` changed: {}\n",
                entry.key,
                backticked(&entry.changed_columns)
            )),
            ChangeKind::Removed => out.push_str(&format!("- `{}` removed\n", entry.key)),
        }
    }
    if report.entries.len() > MAX_LISTED_ENTRIES {
        out.push_str(&format!(
            "- _... and {} more_\n",
            report.entries.len() - MAX_LISTED_ENTRIES
        ));
    }

    out
}

fn backticked(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("`{}`", n))
        .collect::<Vec<_>>()
        .join(", ")
}

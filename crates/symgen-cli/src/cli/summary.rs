//! Console progress and end-of-run summary.

use symgen_core::{FamilyProgress, RunReport};
use tokio::sync::mpsc::Receiver;

/// Prints one line when a family starts and one when it finishes.
pub async fn print_progress(mut rx: Receiver<FamilyProgress>) {
    while let Some(event) = rx.recv().await {
        println!("{}", progress_line(&event));
    }
}

pub fn progress_line(event: &FamilyProgress) -> String {
    match event {
        FamilyProgress::Started { family, requested } => {
            format!("Fetching {} items of {} family...", requested, family)
        }
        FamilyProgress::Finished {
            fetched, requested, ..
        } => format!("{}/{} complete", fetched, requested),
    }
}

/// Written files, skipped families, failed icons, and a closing count.
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    for family in &report.families {
        match &family.written {
            Some(path) => lines.push(format!(
                "Wrote {} ({} icons)",
                path.display(),
                family.fetched
            )),
            None if family.requested == 0 => {
                lines.push(format!("Skipped {}: no icons in this family", family.short_name))
            }
            None => lines.push(format!(
                "Skipped {}: all {} icons failed",
                family.short_name, family.requested
            )),
        }
        for failure in &family.failures {
            lines.push(format!("  failed {}: {}", failure.name, failure.reason));
        }
    }

    if report.is_clean() {
        lines.push(format!("All {} icons fetched.", report.total_fetched()));
    } else {
        lines.push(format!(
            "{} icons failed across {} families",
            report.total_failed(),
            report.families_with_failures()
        ));
    }
    lines
}

use anyhow::Result;

use crate::config::Config;
use crate::constants::NOTHING_SELECTED;
use crate::context::export::ExportOutcome;
use crate::session::Session;

/// Applies the selection flags from the command line and exports without a
/// terminal UI. The configured output name stands in for the prompt.
pub fn run(
    session: &mut Session,
    config: &Config,
) -> Result<ExportOutcome> {
    if config.select_all {
        session.set_all(true);
    }
    for rel in &config.select {
        session.toggle_path(rel);
    }

    let name = config.output_name.clone().unwrap_or_default();
    let outcome = session.export(move |default| {
        Some(if name.trim().is_empty() {
            default.to_string()
        } else {
            name
        })
    })?;
    match &outcome {
        ExportOutcome::Written(report) => {
            eprintln!(
                "Saved {} ({} files, {} unreadable)",
                report.path.display(),
                report.files,
                report.unreadable
            );
            eprintln!("Token count: {}", report.tokens);
        }
        ExportOutcome::NothingSelected => eprintln!("{NOTHING_SELECTED}"),
        ExportOutcome::Cancelled => {}
    }
    Ok(outcome)
}

//! Pass report rendering.

use anyhow::Result;
use console::Style;
use css_directives::PassReport;

/// How the pass report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary, styled when standard error is a terminal.
    Text,
    /// The reports as a JSON array.
    Json,
}

/// Renders the reports of every pass.
pub fn render(reports: &[PassReport], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(reports)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
    }
}

fn render_text(reports: &[PassReport]) -> String {
    let heading = Style::new().for_stderr().bold();
    let dim = Style::new().for_stderr().dim();
    let warn = Style::new().for_stderr().yellow();

    if reports.is_empty() {
        return dim.apply_to("no pass ran").to_string();
    }

    let mut lines = Vec::new();
    for (index, report) in reports.iter().enumerate() {
        lines.push(format!(
            "{} {} elements, {} markers, {} properties set",
            heading.apply_to(format!("pass {}:", index + 1)),
            report.elements_scanned,
            report.markers,
            report.properties_set,
        ));
        lines.push(
            dim.apply_to(format!(
                "  {} literal, {} named, {} attach",
                report.literal, report.named, report.attached
            ))
            .to_string(),
        );
        for unresolved in &report.unresolved {
            lines.push(format!(
                "  {} \"{}\" in {}",
                warn.apply_to("unresolved"),
                unresolved.name,
                unresolved.attribute
            ));
        }
    }
    lines.join("\n")
}

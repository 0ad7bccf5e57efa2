// Colored terminal output for analysis reports.
//
// This module handles all terminal-specific formatting: colors, bars, the
// findings table. main.rs renders views by delegating here.

use colored::Colorize;

use crate::analyzer::error::AnalysisError;
use crate::controller::{Phase, ViewState};
use crate::report::models::{AnalysisReport, Impact, Violation};
use crate::report::score::{derive_score_band, ScoreBand};
use crate::report::severity::aggregate_severity_counts;
use crate::report::sort::{SortDir, SortKey, SortState};

const SCORE_BAR_WIDTH: usize = 20;
const CHART_BAR_WIDTH: usize = 30;

/// Render whatever the view state currently holds.
pub fn display_view(state: &ViewState) {
    match &state.phase {
        Phase::Idle => {}
        Phase::Submitting { url } => {
            println!("{}", format!("Analyzing {url}...").dimmed());
        }
        Phase::Success(report) => display_report(report, &state.sort),
        Phase::Failed(err) => display_error(err),
    }
}

/// Display a full report: header, score, severity chart, findings table.
pub fn display_report(report: &AnalysisReport, sort: &SortState) {
    println!(
        "\n{}",
        format!("=== Accessibility Report: {} ===", report.url).bold()
    );
    if let Some(generated_at) = report.generated_at {
        println!("  {}", format!("Generated {}", generated_at.to_rfc2822()).dimmed());
    }
    println!();

    display_score(report.score);
    println!();
    display_severity_chart(report);
    println!();
    display_violations(&sort.apply(&report.violations), sort);
}

/// Score line: raw score, band label, and a bar clamped to 0-100.
pub fn display_score(score: f64) {
    let display = derive_score_band(score);
    let filled = ((display.bar_percent / 100.0) * SCORE_BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(SCORE_BAR_WIDTH - filled)
    );

    println!(
        "  Score: {:>3}/100  {}  {}",
        format_score(score),
        colorize_band(display.band, &bar),
        colorize_band(display.band, display.band.label()).bold(),
    );
}

/// Five fixed buckets, each bar proportional to its share of the total.
pub fn display_severity_chart(report: &AnalysisReport) {
    let breakdown = aggregate_severity_counts(report);

    println!(
        "  {}",
        format!("Severity breakdown ({} total)", breakdown.total).dimmed()
    );
    for impact in Impact::ALL {
        let filled = (breakdown.share(impact) * CHART_BAR_WIDTH as f64).round() as usize;
        println!(
            "  {:<9} {:<width$} {:>4}",
            colorize_impact(impact),
            colorize_impact_text(impact, &"■".repeat(filled)),
            breakdown.counts.get(impact),
            width = CHART_BAR_WIDTH,
        );
    }
}

/// Findings table in the given (already sorted) order.
pub fn display_violations(violations: &[Violation], sort: &SortState) {
    if violations.is_empty() {
        println!("  {}", "No violations found.".green());
        return;
    }

    println!(
        "  {:<10}  {:<56}  {:>6}",
        header("Impact", SortKey::Impact, sort).dimmed(),
        header("Issue", SortKey::Help, sort).dimmed(),
        header("Nodes", SortKey::NodesAffected, sort).dimmed(),
    );
    println!("  {}", "-".repeat(76).dimmed());

    for violation in violations {
        println!(
            "  {:<10}  {:<56}  {:>6}",
            colorize_impact(violation.impact),
            super::truncate_chars(violation.title(), 53),
            violation.nodes_affected,
        );

        let mut details = Vec::new();
        if let Some(id) = &violation.id {
            details.push(id.clone());
        }
        if let Some(wcag) = &violation.wcag {
            details.push(format!("WCAG {wcag}"));
        }
        if let Some(description) = &violation.description {
            details.push(super::truncate_chars(description, 90));
        }
        if !details.is_empty() {
            println!("  {:<10}  {}", "", details.join(" · ").dimmed());
        }
        if let Some(url) = &violation.help_url {
            println!("  {:<10}  {}", "", url.cyan());
        }
    }

    println!();
    println!(
        "  {}",
        format!("{} violations, sorted by {}", violations.len(), sort.key).dimmed()
    );
}

/// Display an analysis error as one red line.
pub fn display_error(err: &AnalysisError) {
    println!("{} {}", "Error:".red().bold(), err.user_message().red());
}

fn header(label: &str, key: SortKey, sort: &SortState) -> String {
    if sort.key != key {
        return label.to_string();
    }
    let arrow = match sort.dir {
        SortDir::Asc => "▲",
        SortDir::Desc => "▼",
    };
    format!("{label} {arrow}")
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

/// Colorize text with a score band's color.
fn colorize_band(band: ScoreBand, text: &str) -> colored::ColoredString {
    match band {
        ScoreBand::Excellent => text.green(),
        ScoreBand::Good => text.bright_green(),
        ScoreBand::NeedsWork => text.yellow(),
        ScoreBand::Poor => text.red(),
    }
}

/// Colorize an impact label.
fn colorize_impact(impact: Impact) -> colored::ColoredString {
    colorize_impact_text(impact, impact.as_str())
}

fn colorize_impact_text(impact: Impact, text: &str) -> colored::ColoredString {
    match impact {
        Impact::Critical => text.red().bold(),
        Impact::Serious => text.bright_red(),
        Impact::Moderate => text.yellow(),
        Impact::Minor => text.blue(),
        Impact::Unknown => text.dimmed(),
    }
}

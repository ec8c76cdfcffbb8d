//! Comparison report rendering.

use crate::driver::TransportReport;
use std::fmt::Write;
use std::time::Duration;

/// Formats a latency figure, picking the readable unit.
#[must_use]
pub fn format_latency(latency: Duration) -> String {
    let ns = latency.as_nanos() as f64;
    if ns >= 1_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.1} µs", ns / 1_000.0)
    } else {
        format!("{ns:.0} ns")
    }
}

/// Formats a transfer rate in MB/s.
#[must_use]
pub fn format_rate(mb_per_second: f64) -> String {
    format!("{mb_per_second:.1} MB/s")
}

/// Renders the box-drawing comparison table.
#[must_use]
pub fn render_table(reports: &[TransportReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "┌────────────┬───────────────┬───────────────┬────────────────┬────────────────┐"
    );
    let _ = writeln!(
        out,
        "│ Transport  │ Latency (p50) │ Latency (p99) │ Throughput     │ Capacity       │"
    );
    let _ = writeln!(
        out,
        "├────────────┼───────────────┼───────────────┼────────────────┼────────────────┤"
    );
    for report in reports {
        let _ = writeln!(
            out,
            "│ {:<10} │ {:>13} │ {:>13} │ {:>14} │ {:>14} │",
            report.transport,
            format_latency(report.latency.median),
            format_latency(report.latency.p99),
            format_rate(report.throughput_mb_s),
            format_rate(report.capacity_mb_s),
        );
    }
    let _ = writeln!(
        out,
        "└────────────┴───────────────┴───────────────┴────────────────┴────────────────┘"
    );
    out
}

/// Renders the same rows as a markdown table.
#[must_use]
pub fn render_markdown(reports: &[TransportReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "| Transport | Latency (p50) | Latency (p99) | Throughput | Capacity |"
    );
    let _ = writeln!(out, "|-----------|---------------|---------------|------------|----------|");
    for report in reports {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            report.transport,
            format_latency(report.latency.median),
            format_latency(report.latency.p99),
            format_rate(report.throughput_mb_s),
            format_rate(report.capacity_mb_s),
        );
    }
    out
}

/// Prints the comparison table followed by its markdown rendering.
pub fn print_comparison(reports: &[TransportReport]) {
    println!("{}", render_table(reports));
    println!("Markdown:");
    println!();
    println!("{}", render_markdown(reports));
}

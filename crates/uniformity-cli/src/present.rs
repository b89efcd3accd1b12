//! Text, table, histogram, Markdown and JSON renderings of test results.
//!
//! The `format_*` functions build strings so the interactive menu can write
//! them to any writer; the `print_*` wrappers go to stdout.

use serde_json::{Value, json};
use uniformity_tests::{
    BatteryEntry, Breakdown, SignificanceLevel, TestKind, TestResult, acceptance_rate,
};

const HISTOGRAM_WIDTH: usize = 40;
const POKER_TOP_SHOWN: usize = 3;

fn verdict_mark(passed: bool) -> &'static str {
    if passed { "✓" } else { "✗" }
}

/// p-value for tests that decide by one, the acceptance region otherwise.
fn decision_column(kind: TestKind, result: &TestResult) -> String {
    if kind.uses_p_value() {
        return result
            .p_value
            .map(|p| format!("{p:.6}"))
            .unwrap_or_else(|| "—".to_string());
    }
    match &result.breakdown {
        Breakdown::Autocorrelation { z_critical, .. } => format!("|Z|<{z_critical:.4}"),
        _ => "—".to_string(),
    }
}

fn hand(signature: &[u8; 5]) -> String {
    signature.iter().map(|d| char::from(b'0' + d)).collect()
}

// ---------------------------------------------------------------------------
// Single results
// ---------------------------------------------------------------------------

pub fn format_result(result: &TestResult) -> String {
    let mut out = format!(
        "{} {} Test: {}\n",
        verdict_mark(result.passed()),
        result.name,
        result.verdict
    );
    out.push_str(&format!("  Statistic: {:.6}\n", result.statistic));
    match (&result.breakdown, result.p_value) {
        (Breakdown::Autocorrelation { z_critical, .. }, _) => {
            out.push_str(&format!("  Critical:  ±{z_critical:.6}\n"));
        }
        (_, Some(p)) => out.push_str(&format!("  P-value:   {p:.6}\n")),
        (_, None) => {}
    }
    if let Breakdown::Poker { top, .. } = &result.breakdown {
        let shown: Vec<String> = top
            .iter()
            .take(POKER_TOP_SHOWN)
            .map(|(sig, count)| format!("{}×{count}", hand(sig)))
            .collect();
        if !shown.is_empty() {
            out.push_str(&format!("  Top hands: {}\n", shown.join(", ")));
        }
    }
    out.push_str(&format!("  {}\n", result.details));
    out
}

pub fn print_result(result: &TestResult) {
    print!("{}", format_result(result));
}

pub fn result_json(result: &TestResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Observed vs expected counts per bin. `None` unless `result` is a
/// chi-square result.
pub fn format_frequency_table(result: &TestResult) -> Option<String> {
    let Breakdown::ChiSquare {
        observed,
        expected,
        edges,
        ..
    } = &result.breakdown
    else {
        return None;
    };

    let mut out = format!(
        "{:>4}  {:<20} {:>9} {:>9}\n",
        "Bin", "Range", "Observed", "Expected"
    );
    out.push_str(&format!("{}\n", "-".repeat(46)));
    for (i, (count, bounds)) in observed.iter().zip(edges.windows(2)).enumerate() {
        let range = format!("[{:.4}, {:.4})", bounds[0], bounds[1]);
        out.push_str(&format!(
            "{:>4}  {:<20} {:>9} {:>9.2}\n",
            i + 1,
            range,
            count,
            expected
        ));
    }
    Some(out)
}

pub fn print_frequency_table(result: &TestResult) {
    if let Some(table) = format_frequency_table(result) {
        print!("{table}");
    }
}

/// Bar chart of the sample over `bins` equal-width bins.
///
/// The bins span `[0, 1]` widened to include any value outside it, so the
/// chart is comparable across samples. Non-finite values are skipped.
pub fn format_histogram(sample: &[f64], bins: usize) -> String {
    let bins = bins.max(1);
    let finite = sample.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.clone().fold((0.0f64, 1.0f64), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let peak = counts.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::new();
    for (i, &count) in counts.iter().enumerate() {
        let start = lo + width * i as f64;
        let bar = "#".repeat(count * HISTOGRAM_WIDTH / peak);
        out.push_str(&format!(
            "{:>7.4} | {:<w$} {count}\n",
            start,
            bar,
            w = HISTOGRAM_WIDTH
        ));
    }
    out
}

pub fn print_histogram(sample: &[f64], bins: usize) {
    print!("{}", format_histogram(sample, bins));
}

// ---------------------------------------------------------------------------
// Battery reports
// ---------------------------------------------------------------------------

pub fn format_summary(entries: &[BatteryEntry]) -> String {
    let mut out = format!(
        "{:<20} {:>9} {:>12} {:>10}\n",
        "Test", "Verdict", "Statistic", "p-value"
    );
    out.push_str(&format!("{}\n", "-".repeat(54)));
    for entry in entries {
        match &entry.outcome {
            Ok(r) => {
                let p = decision_column(entry.kind, r);
                out.push_str(&format!(
                    "{:<20} {:>9} {:>12.4} {:>10}\n",
                    entry.kind.name(),
                    r.verdict.to_string(),
                    r.statistic,
                    p
                ));
            }
            Err(e) => {
                out.push_str(&format!("{:<20} {:>9}  {e}\n", entry.kind.name(), "error"));
            }
        }
    }
    out.push_str(&format!(
        "\nAccepted: {}/{} ({:.0}%)\n",
        entries.iter().filter(|e| e.accepted()).count(),
        entries.len(),
        acceptance_rate(entries) * 100.0
    ));
    out
}

pub fn markdown_report(
    label: &str,
    n: usize,
    alpha: SignificanceLevel,
    entries: &[BatteryEntry],
) -> String {
    let accepted = entries.iter().filter(|e| e.accepted()).count();
    let mut report = String::new();
    report.push_str("# Uniformity Test Report\n\n");
    report.push_str(&format!("Generated: {}\n\n", timestamp()));
    report.push_str(&format!("## {label}\n\n"));
    report.push_str(&format!(
        "- Samples: {n} values\n- Alpha: {alpha}\n- Accepted: {accepted}/{} ({:.0}%)\n\n",
        entries.len(),
        acceptance_rate(entries) * 100.0
    ));

    report.push_str("| Test | A | Verdict | p-value | Statistic | Details |\n");
    report.push_str("|------|---|---------|---------|-----------|---------|\n");
    for entry in entries {
        match &entry.outcome {
            Ok(t) => {
                let pval = decision_column(entry.kind, t);
                report.push_str(&format!(
                    "| {} | {} | {} | {} | {:.4} | {} |\n",
                    t.name,
                    verdict_mark(t.passed()),
                    t.verdict,
                    pval,
                    t.statistic,
                    t.details
                ));
            }
            Err(e) => {
                report.push_str(&format!(
                    "| {} | ✗ | {} | — | — | {e} |\n",
                    entry.kind.name(),
                    e.kind()
                ));
            }
        }
    }
    report
}

pub fn battery_json(
    label: &str,
    n: usize,
    alpha: SignificanceLevel,
    entries: &[BatteryEntry],
) -> Value {
    let tests: Vec<Value> = entries
        .iter()
        .map(|entry| match &entry.outcome {
            Ok(result) => json!({ "kind": entry.kind, "result": result }),
            Err(e) => json!({
                "kind": entry.kind,
                "error": { "kind": e.kind(), "message": e.to_string() },
            }),
        })
        .collect();
    json!({
        "source": label,
        "samples": n,
        "alpha": alpha,
        "acceptance_rate": acceptance_rate(entries),
        "tests": tests,
    })
}

fn timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", dur.as_secs())
}

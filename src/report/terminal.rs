use super::types::{AnalysisReport, Summary};
use super::{ranked_complexity, ranked_redundancy};
use crate::model::TestRef;
use colored::Colorize;
use std::fmt::Write;

/// Formats the report for terminal display.
///
/// Shows at most `top` entries in each ranked section.
#[must_use]
pub fn format_terminal(report: &AnalysisReport, top: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "─".repeat(70).dimmed());
    let _ = writeln!(out, "{}", " 🤖 TEST SUITE METRICS REPORT ".cyan().bold());
    let _ = writeln!(out, "{}", "─".repeat(70).dimmed());
    let _ = writeln!(out);

    write_summary(&mut out, &report.summary);
    write_rejected(&mut out, report);
    write_complexity(&mut out, report, top);
    write_redundancy(&mut out, report, top);
    write_keywords(&mut out, report);

    let _ = writeln!(out, "{}", "─".repeat(70).dimmed());
    out
}

fn write_summary(out: &mut String, summary: &Summary) {
    let _ = writeln!(out, "{}", "📊 SUMMARY".cyan().bold());
    let _ = writeln!(out);
    let _ = writeln!(out, "   Suites:    {}", summary.total_suites.to_string().white());
    let _ = writeln!(out, "   Tests:     {}", summary.total_tests.to_string().white());
    let _ = writeln!(out, "   Keywords:  {}", summary.total_keywords.to_string().white());
    let _ = writeln!(out);
}

fn write_rejected(out: &mut String, report: &AnalysisReport) {
    if report.rejected_suites.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "{}",
        format!("⚠️  {} malformed suites skipped", report.rejected_suites.len())
            .yellow()
            .bold()
    );
    for rejected in &report.rejected_suites {
        let _ = writeln!(
            out,
            "   #{} '{}': {}",
            rejected.index,
            rejected.suite,
            rejected.reason.dimmed()
        );
    }
    let _ = writeln!(out);
}

fn write_complexity(out: &mut String, report: &AnalysisReport, top: usize) {
    let _ = writeln!(out, "{}", "🧮 MOST COMPLEX TESTS".cyan().bold());
    let _ = writeln!(out);

    let ranked = ranked_complexity(report);
    if ranked.is_empty() {
        let _ = writeln!(out, "   {}", "No tests found.".dimmed());
    }
    for entry in ranked.into_iter().take(top) {
        let _ = writeln!(
            out,
            "   {:>6}  {:>4} steps  {}::{}",
            format!("{:.2}", entry.entropy_score).yellow(),
            entry.step_count,
            entry.suite.dimmed(),
            entry.test
        );
    }
    let _ = writeln!(out);
}

fn write_redundancy(out: &mut String, report: &AnalysisReport, top: usize) {
    let _ = writeln!(
        out,
        "{} (threshold {:.2})",
        "♻️  REDUNDANT TEST PAIRS".cyan().bold(),
        report.settings.similarity_threshold
    );
    let _ = writeln!(out);

    if report.redundancy_analysis.is_empty() {
        let _ = writeln!(out, "   {}", "✨ No redundant tests found.".green());
        let _ = writeln!(out);
        return;
    }

    for pair in ranked_redundancy(report).into_iter().take(top) {
        let _ = writeln!(
            out,
            "   {}  {}  ↔  {}",
            format!("{:.2}", pair.similarity).red(),
            pair.first(),
            pair.second()
        );
    }
    let hidden = report.redundancy_analysis.len().saturating_sub(top);
    if hidden > 0 {
        let _ = writeln!(out, "   {}", format!("... and {hidden} more").dimmed());
    }

    let clusters: Vec<_> = report
        .redundancy_clusters
        .iter()
        .filter(|c| c.len() > 2)
        .collect();
    if !clusters.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "   {}", "Groups of mutually similar tests:".bold());
        for cluster in clusters {
            let _ = writeln!(out, "   • {}", join(cluster));
        }
    }
    let _ = writeln!(out);
}

fn write_keywords(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "{}", "🔑 MOST USED KEYWORDS".cyan().bold());
    let _ = writeln!(out);

    for kw in &report.keyword_patterns.most_used {
        let tests = report
            .keyword_usage
            .get(&kw.keyword)
            .map_or(0, |usage| usage.tests.len());
        let _ = writeln!(
            out,
            "   {:>5}×  {}  {}",
            kw.count.to_string().white(),
            kw.keyword,
            format!("({tests} tests)").dimmed()
        );
    }

    let single = report.keyword_patterns.single_use.len();
    if single > 0 {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "   {} {single} keywords are called only once",
            "💡".yellow()
        );
    }
    let _ = writeln!(out);
}

fn join(ids: &[TestRef]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::config::Config;
    use crate::model::{StepRecord, SuiteRecord, TestRecord};

    #[test]
    fn test_terminal_lists_sections() {
        colored::control::set_override(false);
        let test = |name: &str, keywords: &[&str]| TestRecord {
            name: name.into(),
            steps: keywords.iter().map(|k| StepRecord::new(*k)).collect(),
        };
        let records = vec![SuiteRecord {
            name: "Login".into(),
            tests: vec![
                test("plain", &["Open", "Open"]),
                test("busy", &["Open", "Type", "Submit"]),
                test("busy_copy", &["Submit", "Type", "Open"]),
            ],
        }];
        let report = analysis::run(records, &Config::default()).unwrap();
        let text = format_terminal(&report, 5);

        assert!(text.contains("Tests:     3"));
        assert!(text.contains("Login::busy  ↔  Login::busy_copy"));
        // Most complex test is listed before the flat one.
        let busy = text.find("Login::busy").unwrap();
        let plain = text.find("Login::plain").unwrap();
        assert!(busy < plain);
    }
}

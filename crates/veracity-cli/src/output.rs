//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veracity_domain::{ReputationEntry, VerdictLabel};
use veracity_pipeline::VerificationReport;

/// Longest claim text shown in a table cell
const MAX_CLAIM_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verification report.
    pub fn format_report(&self, report: &VerificationReport) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            CliFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    fn format_report_table(&self, report: &VerificationReport) -> String {
        let mut out = String::new();

        if report.claims.is_empty() {
            out.push_str(&self.colorize("No verifiable claims found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Claim", "Verdict", "Confidence", "Sources"]);

            for result in &report.claims {
                let verdict = &result.verdict;
                builder.push_record([
                    result.claim.id.clone(),
                    truncate(&result.claim.text, MAX_CLAIM_CHARS),
                    self.label(verdict.verdict),
                    format!("{:.2}", verdict.confidence.value()),
                    result.evidence.len().to_string(),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push_str(&table.to_string());
        }

        out.push('\n');
        out.push_str(&format!(
            "Page score: {}  ({} verdicts, {} sources checked, {} unverifiable skipped)",
            self.score(report.page_score.value()),
            report.summary.total(),
            report.sources_checked,
            report.unverifiable.len()
        ));
        out.push('\n');
        out.push_str(&format!(
            "Models: {} (classifier), {} (synthesizer)",
            report.models_used.classifier, report.models_used.synthesizer
        ));
        out
    }

    /// Format reputation lookups.
    pub fn format_reputation(&self, entries: &[(String, ReputationEntry)]) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let json: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|(domain, entry)| {
                        serde_json::json!({
                            "domain": domain,
                            "score": entry.score,
                            "category": entry.category,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            CliFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Domain", "Score", "Category"]);
                for (domain, entry) in entries {
                    builder.push_record([
                        domain.clone(),
                        format!("{:.2}", entry.score.value()),
                        entry.category.clone(),
                    ]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    fn label(&self, label: VerdictLabel) -> String {
        let color = match label {
            VerdictLabel::StronglySupported | VerdictLabel::Supported => "green",
            VerdictLabel::Mixed | VerdictLabel::Weak | VerdictLabel::Outdated => "yellow",
            VerdictLabel::Contradicted => "red",
            VerdictLabel::NotVerifiable => "none",
        };
        self.colorize(label.as_str(), color)
    }

    fn score(&self, score: u8) -> String {
        let color = match score {
            70..=100 => "green",
            40..=69 => "yellow",
            _ => "red",
        };
        self.colorize(&score.to_string(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{Claim, PageScore, Verdict, VerificationSummary};
    use veracity_pipeline::{ClaimResult, ModelsUsed};

    fn report() -> VerificationReport {
        let verdict = Verdict::new("c1", VerdictLabel::Supported, 0.8, "Two outlets agree.", "main");
        let mut summary = VerificationSummary::default();
        summary.record(VerdictLabel::Supported);

        VerificationReport {
            claims: vec![ClaimResult {
                claim: Claim::new("c1", "Over 10,000 users use this product."),
                verdict,
                evidence: vec![],
            }],
            unverifiable: vec![Claim::new("c2", "This is the best tool.")],
            page_score: PageScore::new(80),
            summary,
            models_used: ModelsUsed {
                classifier: "fast".to_string(),
                synthesizer: "main".to_string(),
            },
            sources_checked: 0,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let output = formatter.format_report(&report()).unwrap();
        assert!(output.contains("Verdict"));
        assert!(output.contains("supported"));
        assert!(output.contains("Page score: 80"));
        assert!(output.contains("1 unverifiable skipped"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(CliFormat::Json, false);
        let output = formatter.format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["page_score"], 80);
        assert_eq!(value["claims"][0]["verdict"]["verdict"], "supported");
    }

    #[test]
    fn test_empty_report() {
        let mut empty = report();
        empty.claims.clear();
        let formatter = Formatter::new(CliFormat::Table, false);
        let output = formatter.format_report(&empty).unwrap();
        assert!(output.contains("No verifiable claims found"));
    }

    #[test]
    fn test_reputation_table() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let entries = vec![("nature.com".to_string(), ReputationEntry::new(0.95, "science"))];
        let output = formatter.format_reputation(&entries).unwrap();
        assert!(output.contains("nature.com"));
        assert!(output.contains("0.95"));
        assert!(output.contains("science"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(CliFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}

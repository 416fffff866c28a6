use crate::models::{ReportType, Severity};

use super::insights::NO_INSIGHTS;
use super::types::{AnalysisResult, Highlight};

/// Date format used in user-facing text ("Mar 4, 2026").
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Plain-language summary of a report.
pub fn compose_summary(
    report_type: ReportType,
    total_parameters: usize,
    highlights: &[Highlight],
) -> String {
    if total_parameters == 0 {
        return format!("No recognizable test parameters were found in this {}.", report_type);
    }

    let count = |severity: Severity| highlights.iter().filter(|h| h.severity == severity).count();
    let critical = count(Severity::Critical);
    let abnormal = count(Severity::Abnormal);
    let borderline = count(Severity::Borderline);

    let mut sentences = vec![format!(
        "This {} contains {} test parameter(s).",
        report_type, total_parameters
    )];
    if critical > 0 {
        sentences.push(format!("{critical} critical finding(s) require immediate attention."));
    }
    if abnormal > 0 {
        sentences.push(format!("{abnormal} abnormal result(s) detected."));
    }
    if borderline > 0 {
        sentences.push(format!("{borderline} borderline result(s) to monitor."));
    }
    if critical == 0 && abnormal == 0 {
        sentences.push("All major parameters are within acceptable ranges.".to_string());
    }
    sentences.join(" ")
}

impl AnalysisResult {
    /// Markdown report for the chat view. Normal values are listed only when
    /// nothing is critical or abnormal, at most `max_normal_listed` of them.
    pub fn chat_message(&self, max_normal_listed: usize) -> String {
        let mut msg = String::from("📊 **Report Analysis Complete**\n\n");
        msg.push_str(&format!("**Report Type:** {}\n", self.report_type));
        msg.push_str(&format!("**Date:** {}\n", self.observed_on.format(DISPLAY_DATE_FORMAT)));
        msg.push_str(&format!("**Parameters Found:** {}\n\n", self.total_parameters));

        if self.total_parameters == 0 {
            msg.push_str("No recognizable test parameters were found in this document.\n");
            return msg;
        }

        if self.highlights.is_empty() {
            msg.push_str("✅ All parameters appear to be within normal ranges.\n");
        } else {
            msg.push_str("**Key Findings:**\n");
            for (title, severity) in [
                ("🔴 **Critical:**", Severity::Critical),
                ("⚠️ **Abnormal:**", Severity::Abnormal),
                ("⚡ **Borderline:**", Severity::Borderline),
            ] {
                push_section(&mut msg, title, self.highlights_with(severity));
            }
        }

        let serious = self.count_by_severity(Severity::Critical)
            + self.count_by_severity(Severity::Abnormal);
        let normal: Vec<_> = self.lab_results.iter().filter(|r| r.is_normal()).collect();
        if serious == 0 && !normal.is_empty() {
            msg.push_str("\n✅ **Normal Parameters:**\n");
            for result in normal.iter().take(max_normal_listed) {
                msg.push_str(&format!(
                    "• {}: {:.1} {}\n",
                    result.test_name(),
                    result.value(),
                    result.unit()
                ));
            }
            if normal.len() > max_normal_listed {
                msg.push_str(&format!(
                    "• ... and {} more normal results\n",
                    normal.len() - max_normal_listed
                ));
            }
        }

        msg.push_str("\n💡 **Insights:**\n");
        if self.insights.is_empty() {
            msg.push_str(&format!("• {NO_INSIGHTS}\n"));
        }
        for insight in &self.insights {
            msg.push_str(&format!("• {insight}\n"));
        }

        msg
    }

    fn highlights_with(&self, severity: Severity) -> impl Iterator<Item = &Highlight> {
        self.highlights.iter().filter(move |h| h.severity == severity)
    }
}

fn push_section<'a>(msg: &mut String, title: &str, items: impl Iterator<Item = &'a Highlight>) {
    let mut items = items.peekable();
    if items.peek().is_none() {
        return;
    }
    msg.push_str(&format!("\n{title}\n"));
    for h in items {
        msg.push_str(&format!(
            "• {}: {:.1} {} - {}\n",
            h.display_name, h.value, h.unit, h.message
        ));
    }
}

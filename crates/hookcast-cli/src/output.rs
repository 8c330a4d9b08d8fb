// Output formatting and styling

use std::io::IsTerminal;

use clap::ValueEnum;
use colored::Colorize;
use hookcast_hooks::{DeliveryOutcome, Hook, TriggerReport};

use crate::error::{CliError, CliResult};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }
}

impl OutputStyle {
    /// Style without colors, for tests and pipes
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }
}

/// Print error message to stderr
pub fn print_error(msg: &str) {
    let style = OutputStyle {
        use_colors: std::io::stderr().is_terminal(),
    };
    eprintln!("{}", style.error(msg));
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let head: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

fn outcome_detail(outcome: &DeliveryOutcome) -> String {
    match (&outcome.error, outcome.status_code) {
        (Some(error), _) => error.clone(),
        (None, Some(status)) => format!("HTTP {}", status),
        (None, None) => "-".to_string(),
    }
}

fn push_outcome_rows(output: &mut String, bucket: &str, outcomes: &[DeliveryOutcome]) {
    for outcome in outcomes {
        output.push_str(&format!(
            "{:<14} | {:<24} | {:<20} | {:>6} | {}\n",
            bucket,
            truncate(&outcome.endpoint_id, 24),
            truncate(&outcome.name, 20),
            outcome.duration_ms,
            outcome_detail(outcome)
        ));
    }
}

/// Format a trigger report as a table, one row per hook
pub fn format_report_table(report: &TriggerReport, style: &OutputStyle) -> String {
    let mut output = String::new();

    if report.total() > 0 {
        output.push_str("Bucket         | Hook ID                  | Name                 | ms     | Result\n");
        output.push_str("---------------|--------------------------|----------------------|--------|-------\n");
        push_outcome_rows(&mut output, "initial", &report.initial);
        for round in &report.retry_rounds {
            push_outcome_rows(
                &mut output,
                &format!("retrySuccess{}", round.round),
                &round.recovered,
            );
        }
        push_outcome_rows(&mut output, "finalFailed", &report.final_failed);
        output.push('\n');
    }

    let summary = format!(
        "{} of {} hooks delivered",
        report.delivered_count(),
        report.total()
    );
    if report.all_delivered() {
        output.push_str(&style.success(&summary));
    } else {
        output.push_str(&style.warning(&format!(
            "{}, {} failed every round",
            summary,
            report.final_failed.len()
        )));
    }
    output.push('\n');

    output
}

/// Format a trigger report as JSON
pub fn format_report_json(report: &TriggerReport) -> CliResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| CliError::Internal(format!("Failed to serialize report: {}", e)))
}

/// Format multiple hooks as a table
pub fn format_hooks_table(hooks: &[Hook]) -> String {
    if hooks.is_empty() {
        return "No hooks found\n".to_string();
    }

    let mut output = String::new();
    output.push_str("ID                                   | Name                     | URL\n");
    output.push_str("-------------------------------------|--------------------------|-----\n");

    for hook in hooks {
        output.push_str(&format!(
            "{:<36} | {:<24} | {}\n",
            truncate(&hook.id, 36),
            truncate(&hook.name, 24),
            hook.url
        ));
    }

    output
}

/// Format multiple hooks as JSON
pub fn format_hooks_json(hooks: &[Hook]) -> CliResult<String> {
    serde_json::to_string_pretty(hooks)
        .map_err(|e| CliError::Internal(format!("Failed to serialize hooks: {}", e)))
}

#[cfg(test)]
mod tests {
    use hookcast_hooks::RetryRound;

    use super::*;

    fn hook(id: &str) -> Hook {
        Hook::new(id, format!("Hook {}", id), format!("http://hooks.test/{}", id))
    }

    fn sample_report() -> TriggerReport {
        TriggerReport {
            initial: vec![DeliveryOutcome::success(&hook("a"), 200)],
            retry_rounds: vec![
                RetryRound {
                    round: 1,
                    recovered: vec![DeliveryOutcome::success(&hook("b"), 200)],
                },
                RetryRound {
                    round: 2,
                    recovered: vec![],
                },
            ],
            final_failed: vec![DeliveryOutcome::failure(&hook("c"), Some(503), None)],
        }
    }

    #[test]
    fn test_report_table_lists_every_bucket() {
        let table = format_report_table(&sample_report(), &OutputStyle::plain());

        assert!(table.contains("initial"));
        assert!(table.contains("retrySuccess1"));
        assert!(table.contains("finalFailed"));
        assert!(table.contains("HTTP 503"));
        assert!(table.contains("⚠ 2 of 3 hooks delivered, 1 failed every round"));
    }

    #[test]
    fn test_empty_report_table_is_summary_only() {
        let table = format_report_table(&TriggerReport::default(), &OutputStyle::plain());
        assert_eq!(table, "✓ 0 of 0 hooks delivered\n");
    }

    #[test]
    fn test_report_json_keys() {
        let json = format_report_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["initial"][0]["endpointId"], "a");
        assert_eq!(value["retrySuccess1"][0]["endpointId"], "b");
        assert_eq!(value["retrySuccess2"], serde_json::json!([]));
        assert_eq!(value["finalFailed"][0]["statusCode"], 503);
    }

    #[test]
    fn test_hooks_table_truncates_long_names() {
        let long = Hook::new("x", "N".repeat(40), "http://hooks.test/x");
        let table = format_hooks_table(&[long]);
        assert!(table.contains(&format!("{}...", "N".repeat(21))));
    }

    #[test]
    fn test_empty_hooks_table() {
        assert_eq!(format_hooks_table(&[]), "No hooks found\n");
    }
}

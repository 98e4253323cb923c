//! Subcommand implementations
//!
//! Each command reads its inputs, drives a [`DebugSession`] and hands the result to a
//! `render_*` function, which builds the printed output as a `String`.

use crate::cli::Command;
use crate::config::DsaaConfig;
use anyhow::{Context, Result, bail};
use dsaa_client::{
    AnalysisReport, AnalyzeRequest, DebugClient, DebugWorker, HealthStatus, apply_outcome,
    parse_debug_response,
};
use dsaa_core::{Decoration, DebugSession, Diagnostic};
use dsaa_lang::LanguageLabel;
use dsaa_lint::LintProcessor;
use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

/// Extra time granted to the worker beyond the transport timeouts.
const WORKER_GRACE: Duration = Duration::from_secs(1);

pub fn run(command: Command, config: &DsaaConfig) -> Result<()> {
    match command {
        Command::Classify { file } => {
            let session = open_session(&file, config)?;
            print!("{}", render_classification(session.language()));
        }
        Command::Lint { file } => {
            let mut session = open_session(&file, config)?;
            lint_session(&mut session)?;
            print!("{}", render_diagnostics(&file, session.diagnostics()));
        }
        Command::Overlay { file, issues, json } => {
            let mut session = open_session(&file, config)?;
            let raw = read_source(&issues)?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not valid JSON", issues.display()))?;
            session.replace_issues(parse_debug_response(&value).issues);

            if json {
                println!("{}", serde_json::to_string_pretty(session.decorations())?);
            } else {
                print!("{}", render_decorations(session.decorations()));
            }
        }
        Command::Debug {
            file,
            error_message,
        } => {
            let mut session = open_session(&file, config)?;
            debug_file(&mut session, &error_message, config)?;
            print!("{}", render_debug_report(&session));
        }
        Command::Analyze { file } => {
            let session = open_session(&file, config)?;
            let client = DebugClient::from_config(&config.client)?;
            let report = client.analyze(&AnalyzeRequest {
                code: session.text(),
                language: session.language(),
            })?;
            print!("{}", render_analysis(&report));
        }
        Command::Health => {
            let client = DebugClient::from_config(&config.client)?;
            let health = client.health()?;
            print!("{}", render_health(&health));
            if !health.is_up() {
                bail!("service at {} is not up", config.client.endpoint);
            }
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn open_session(path: &Path, config: &DsaaConfig) -> Result<DebugSession> {
    let text = read_source(path)?;
    let session = DebugSession::new(&text)
        .with_style_classes(config.styles.clone())
        .with_notice_durations(config.notices);
    tracing::debug!(
        path = %path.display(),
        language = %session.language(),
        lines = session.buffer().line_count(),
        "opened source"
    );
    Ok(session)
}

fn lint_session(session: &mut DebugSession) -> Result<()> {
    let mut processor = LintProcessor::standard().context("failed to build lint rules")?;
    // `LintProcessor` never fails.
    let Ok(()) = session.run_processor(&mut processor);
    Ok(())
}

/// Submit the session's code on a background worker and apply the outcome.
///
/// A failed request is not an error here: the session keeps its previous results and carries
/// a failure notice instead.
fn debug_file(session: &mut DebugSession, error_message: &str, config: &DsaaConfig) -> Result<()> {
    let submission = session.prepare_debug_request(error_message, Instant::now())?;

    let client = DebugClient::from_config(&config.client)?;
    let mut worker = DebugWorker::new(client);
    worker.submit(submission);

    let wait = Duration::from_millis(config.client.connect_timeout_ms)
        + Duration::from_millis(config.client.io_timeout_ms)
        + WORKER_GRACE;
    let outcome = worker.recv_timeout(wait)?;
    apply_outcome(session, outcome, Instant::now());

    lint_session(session)
}

pub fn render_classification(label: LanguageLabel) -> String {
    format!("{}\t{}\n", label.id(), label.display_name())
}

pub fn render_diagnostics(path: &Path, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let _ = write!(
            out,
            "{}:{}: {}: {}",
            path.display(),
            diagnostic.line,
            diagnostic.severity,
            diagnostic.message
        );
        if let Some(code) = &diagnostic.code {
            let _ = write!(out, " [{code}]");
        }
        out.push('\n');
    }
    out
}

pub fn render_decorations(decorations: &[Decoration]) -> String {
    let mut out = String::new();
    for decoration in decorations {
        let _ = writeln!(
            out,
            "line {} (offset {}) {}: {}",
            decoration.line, decoration.target_line_start, decoration.style_class, decoration.tooltip
        );
    }
    out
}

pub fn render_debug_report(session: &DebugSession) -> String {
    let mut out = String::new();
    if let Some(notice) = session.notices().last() {
        let _ = writeln!(out, "{}", notice.message);
    }

    let _ = writeln!(out, "\nIssues ({}):", session.issues().len());
    for issue in session.issues() {
        let _ = write!(out, "  line {} {}: {}", issue.line, issue.severity, issue.message);
        if let Some(priority) = issue.priority {
            let _ = write!(out, " ({priority:?})");
        }
        out.push('\n');
    }

    if !session.decorations().is_empty() {
        out.push_str("\nHighlighted lines:\n");
        for line in render_decorations(session.decorations()).lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if !session.fix_suggestions().is_empty() {
        out.push_str("\nFix suggestions:\n");
        for suggestion in session.fix_suggestions() {
            let _ = writeln!(out, "  - {suggestion}");
        }
    }

    if let Some(explanation) = session.explanation() {
        let _ = writeln!(out, "\nExplanation:\n  {explanation}");
    }

    if !session.diagnostics().is_empty() {
        out.push_str("\nLint:\n");
        for diagnostic in session.diagnostics() {
            let _ = writeln!(
                out,
                "  line {} {}: {}",
                diagnostic.line, diagnostic.severity, diagnostic.message
            );
        }
    }
    out
}

pub fn render_health(health: &HealthStatus) -> String {
    let status = if health.status.is_empty() {
        "UNKNOWN"
    } else {
        health.status.as_str()
    };
    let mut out = status.to_string();
    for detail in [&health.service, &health.version] {
        if !detail.is_empty() {
            out.push(' ');
            out.push_str(detail);
        }
    }
    out.push('\n');
    out
}

pub fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Time complexity:  {}", report.time_complexity);
    let _ = writeln!(out, "Space complexity: {}", report.space_complexity);
    let _ = writeln!(out, "Pattern:          {}", report.pattern);
    if !report.summary.is_empty() {
        let _ = writeln!(out, "\n{}", report.summary);
    }
    for (title, items) in [
        ("Intuition", &report.intuition),
        ("Suggestions", &report.suggestions),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{title}:");
        for item in items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsaa_core::{DebugReport, Issue, Priority, Severity};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_classification() {
        let session = DebugSession::new("#include <vector>\nint main() {}");
        assert_eq!(render_classification(session.language()), "cpp\tC++\n");
    }

    #[test]
    fn test_render_lint_output() {
        let mut session = DebugSession::new("if (a == b) {}\n// TODO: fix");
        lint_session(&mut session).unwrap();

        assert_eq!(
            render_diagnostics(Path::new("main.js"), session.diagnostics()),
            "main.js:1: warning: Use === instead of == for strict equality. [loose-equality]\n\
             main.js:2: info: Unresolved TODO found. [todo]\n"
        );
    }

    #[test]
    fn test_render_decorations() {
        let mut session = DebugSession::new("a\nbb\nc");
        session.replace_issues(vec![
            Issue::new(2, Severity::Error, "boom"),
            Issue::new(9, Severity::Error, "gone"),
        ]);

        assert_eq!(
            render_decorations(session.decorations()),
            "line 2 (offset 2) dsaa-line-error: boom\n"
        );
    }

    #[test]
    fn test_render_debug_report() {
        let now = Instant::now();
        let mut session = DebugSession::new("print(x)\n");
        session.prepare_debug_request("", now).unwrap();
        session.finish_debug(
            Ok(DebugReport {
                issues: vec![
                    Issue::new(1, Severity::Error, "x is undefined").with_priority(Priority::High),
                ],
                fix_suggestions: vec!["Define x.".to_string()],
                explanation: Some("Name lookup fails.".to_string()),
            }),
            now,
        );

        assert_eq!(
            render_debug_report(&session),
            "Debugging completed successfully!\n\
             \n\
             Issues (1):\n  line 1 error: x is undefined (High)\n\
             \n\
             Highlighted lines:\n  line 1 (offset 0) dsaa-line-error: x is undefined\n\
             \n\
             Fix suggestions:\n  - Define x.\n\
             \n\
             Explanation:\n  Name lookup fails.\n"
        );
    }

    #[test]
    fn test_render_health() {
        let health = HealthStatus {
            status: "UP".to_string(),
            service: "DSA Analyzer Backend".to_string(),
            version: "1.0.0".to_string(),
        };
        assert_eq!(render_health(&health), "UP DSA Analyzer Backend 1.0.0\n");
        assert_eq!(render_health(&HealthStatus::default()), "UNKNOWN\n");
    }

    #[test]
    fn test_render_analysis_skips_empty_sections() {
        let report = AnalysisReport {
            time_complexity: "O(n)".to_string(),
            space_complexity: "O(1)".to_string(),
            pattern: "Two pointers".to_string(),
            suggestions: vec!["Exit early.".to_string()],
            ..AnalysisReport::default()
        };

        assert_eq!(
            render_analysis(&report),
            "Time complexity:  O(n)\n\
             Space complexity: O(1)\n\
             Pattern:          Two pointers\n\
             \n\
             Suggestions:\n  - Exit early.\n"
        );
    }

    #[test]
    fn test_debug_rejects_blank_file() {
        let mut session = DebugSession::new("  \n");
        let err = debug_file(&mut session, "", &DsaaConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "the source buffer is empty");
        assert_eq!(
            session.notices().last().map(|n| n.message.as_str()),
            Some(dsaa_core::NOTICE_EMPTY_CODE)
        );
    }

    #[test]
    fn test_debug_unreachable_service_sets_failure_notice() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut config = DsaaConfig::default()
            .with_endpoint(Some(format!("http://127.0.0.1:{port}")));
        config.client.connect_timeout_ms = 500;
        config.client.io_timeout_ms = 500;

        let mut session = DebugSession::new("if (a == b) {}");
        session.replace_issues(vec![Issue::new(1, Severity::Info, "kept")]);
        debug_file(&mut session, "", &config).unwrap();

        assert!(!session.is_loading());
        assert_eq!(session.issues(), [Issue::new(1, Severity::Info, "kept")]);
        let notice = session.notices().last().unwrap().message.clone();
        assert!(notice.starts_with("Debug failed: "), "{notice}");
        assert_eq!(session.diagnostics().len(), 1);
    }
}

use dsaa_core::{DebugSession, Diagnostic, DiagnosticRange, Severity, SourceBuffer};
use dsaa_lint::{
    HeuristicLinter, LINT_SOURCE, LintProcessor, LintRule, MESSAGE_LOOSE_EQUALITY, MESSAGE_TODO,
    lint,
};
use pretty_assertions::assert_eq;

#[test]
fn test_single_line_with_both_markers() {
    let doc = SourceBuffer::new("if (a == b) { } // TODO fix");
    let diagnostics = lint(&doc);

    assert_eq!(
        diagnostics,
        vec![
            Diagnostic {
                range: DiagnosticRange::new(0, 27),
                line: 1,
                severity: Severity::Warning,
                code: Some("loose-equality".to_string()),
                source: Some(LINT_SOURCE.to_string()),
                message: MESSAGE_LOOSE_EQUALITY.to_string(),
            },
            Diagnostic {
                range: DiagnosticRange::new(0, 27),
                line: 1,
                severity: Severity::Info,
                code: Some("todo".to_string()),
                source: Some(LINT_SOURCE.to_string()),
                message: MESSAGE_TODO.to_string(),
            },
        ]
    );
    assert!(diagnostics[0].message.contains("strict equality"));
    assert!(diagnostics[1].message.contains("TODO"));
}

#[test]
fn test_one_diagnostic_per_rule_per_line() {
    // Two `==` on one line still yield a single warning for that line.
    let doc = SourceBuffer::new("a == b && c == d // TODO TODO");
    let diagnostics = lint(&doc);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_line_order_and_spans() {
    let doc = SourceBuffer::new("// TODO: header\nlet ok = a === b;\r\nif (x == 1) {}\n");
    let diagnostics = lint(&doc);

    let summary: Vec<(usize, Severity, usize, usize)> = diagnostics
        .iter()
        .map(|d| (d.line, d.severity, d.range.start, d.range.end))
        .collect();
    assert_eq!(
        summary,
        vec![(1, Severity::Info, 0, 15), (3, Severity::Warning, 35, 49)]
    );
}

#[test]
fn test_custom_rules() {
    let linter = HeuristicLinter::new(vec![
        LintRule::new(r"\bconsole\.log\b", Severity::Info, "Remove debug logging.")
            .unwrap()
            .with_code("console"),
    ]);
    let diagnostics = linter.lint(&SourceBuffer::new("x\nconsole.log(x)"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line, 2);
    assert_eq!(diagnostics[0].range, DiagnosticRange::new(2, 16));
}

#[test]
fn test_lint_processor_replaces_session_diagnostics() {
    let mut session = DebugSession::new("a == b");
    let mut processor = LintProcessor::standard().unwrap();

    session.run_processor(&mut processor).unwrap();
    assert_eq!(session.diagnostics().len(), 1);

    session.set_text("a === b");
    session.run_processor(&mut processor).unwrap();
    assert!(session.diagnostics().is_empty());
}

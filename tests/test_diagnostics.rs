use cooklang_parser::{parse, Diagnostic, DiagnosticKind, Parser};

#[test]
fn test_line_numbers_follow_the_source() {
    let source = ">> title: Pancakes\n-- a comment\n[pantry]\nflour\n\nAdd @{2%cups} flour\nWait ~ten minutes";
    let report = Parser::default().parse_with_report(source);

    assert_eq!(
        report.diagnostics,
        vec![
            Diagnostic {
                kind: DiagnosticKind::EmptyName,
                line: 6,
                span: 4..13,
            },
            Diagnostic {
                kind: DiagnosticKind::TimerWithoutBraces,
                line: 7,
                span: 5..9,
            },
        ]
    );
    assert_eq!(report.recipe, parse(source));
}

#[test]
fn test_clean_recipe_has_no_diagnostics() {
    let report = Parser::default()
        .parse_with_report(">> servings: 4\nWhisk @eggs{2} and @milk{200%ml} in a #bowl.\nRest ~{10%minutes}.");

    assert!(report.diagnostics.is_empty());
    assert_eq!(report.recipe.steps.len(), 2);
}

#[test]
fn test_unclosed_brace_and_malformed_metadata() {
    let report = Parser::default().parse_with_report(">> draft\nAdd @flour{2 cups and stir");

    let kinds: Vec<DiagnosticKind> = report.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::MalformedMetadata, DiagnosticKind::UnclosedBrace]
    );
    assert_eq!(report.recipe.ingredients[0].name, "flour");
}

#[test]
fn test_diagnostic_display() {
    let report = Parser::default().parse_with_report("Wait ~ten minutes");

    assert_eq!(
        report.diagnostics[0].to_string(),
        "line 1, columns 5-9: timer is missing its {...} group"
    );
}

#[test]
fn test_diagnostics_serialize() {
    let report = Parser::default().parse_with_report("Add #{}");
    let value = serde_json::to_value(&report.diagnostics).unwrap();

    assert_eq!(value[0]["kind"], "empty_name");
    assert_eq!(value[0]["line"], 1);
    assert_eq!(value[0]["span"]["start"], 4);
    assert_eq!(value[0]["span"]["end"], 7);
}

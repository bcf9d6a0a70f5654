use once_cell::sync::Lazy;
use xcompare_core::{
    DiagnosticKind, ExtractOptions, Severity, SourceDocument, Tokenizer, parse, parse_document,
};

static TUTORIAL: Lazy<String> = Lazy::new(|| {
    [
        "---",
        "title: Concurrency",
        "description: Goroutines and channels for JavaScript developers",
        "---",
        "",
        "# Concurrency",
        "",
        "JavaScript runs one event loop; Go schedules goroutines.",
        "",
        "<UniversalEditor title=\"Starting work\" compare={true}>",
        "```js !! js",
        "setTimeout(() => console.log(\"done\"), 0)",
        "```",
        "",
        "```go !! go",
        "go func() {",
        "\tfmt.Println(\"done\")",
        "}()",
        "```",
        "</UniversalEditor>",
        "",
        "Channels replace promises for hand-off:",
        "",
        "<UniversalEditor title=\"Channels\" compare={true}>",
        "```js !! js",
        "const value = await promise",
        "```",
        "",
        "```go !! go",
        "value := <-ch",
        "```",
        "</UniversalEditor>",
        "",
        "To show the component itself:",
        "",
        "````mdx",
        "<UniversalEditor title=\"Not parsed\">",
        "```go !! go",
        "x",
        "```",
        "</UniversalEditor>",
        "````",
        "",
        "<UniversalEditor title=\"Run it\">",
        "```bash",
        "go run main.go",
        "```",
        "</UniversalEditor>",
        "",
    ]
    .join("\n")
});

#[test]
fn scenario_compare_pair() {
    let input = "<Editor title=\"X\" compare={true}>\n```js !! js\nconsole.log(1)\n```\n```go !! go\nfmt.Println(1)\n```\n</Editor>";
    let (layout, diagnostics) = parse(input).into_parts();

    assert!(diagnostics.is_empty());
    assert_eq!(layout.groups.len(), 1);
    let group = &layout.groups[0];
    assert_eq!(group.group.title.as_deref(), Some("X"));
    assert!(group.group.is_compare);
    assert!(group.side_by_side);
    assert_eq!(group.group.panes.len(), 2);
    assert_eq!(group.group.panes[0].language_tag.as_deref(), Some("js"));
    assert_eq!(group.group.panes[1].language_tag.as_deref(), Some("go"));
}

#[test]
fn scenario_single_pane_downgrade() {
    let input = "<Editor title=\"X\" compare={true}>\n```js !! js\nconsole.log(1)\n```\n</Editor>";
    let outcome = parse(input);

    assert_eq!(outcome.layout.groups.len(), 1);
    let group = &outcome.layout.groups[0];
    assert!(!group.group.is_compare);
    assert!(!group.side_by_side);
    assert_eq!(group.group.panes.len(), 1);
}

#[test]
fn scenario_unterminated_block() {
    let input = "<Editor title=\"X\" compare={true}>\n```js !! js\nconsole.log(1)\n```\n```go !! go\nfmt.Println(1)\n</Editor>";
    let outcome = parse(input);

    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [DiagnosticKind::UnterminatedBlock]);
    assert_eq!(outcome.diagnostics.warnings().count(), 1);

    assert_eq!(outcome.layout.groups.len(), 1);
    let group = &outcome.layout.groups[0];
    assert_eq!(group.group.panes.len(), 1);
    assert_eq!(group.group.panes[0].language_tag.as_deref(), Some("js"));
}

#[test]
fn scenario_unterminated_region_before_sibling() {
    let input = "<Editor title=\"First\">\n```js !! js\na\n```\n\n<Editor title=\"Second\">\n```go !! go\nb\n```\n</Editor>\n";
    let outcome = parse(input);

    assert_eq!(outcome.diagnostics.errors().count(), 1);
    let error = outcome.diagnostics.errors().next().unwrap();
    assert_eq!(error.kind, DiagnosticKind::UnterminatedRegion);
    assert_eq!(error.severity, Severity::Error);
    assert_eq!(error.offset, 0);
    assert!(!outcome.is_ok());

    assert_eq!(outcome.layout.groups.len(), 1);
    assert_eq!(outcome.layout.groups[0].title(), Some("Second"));
}

#[test]
fn unterminated_block_is_skipped_within_region() {
    let input = "<Editor title=\"X\" compare={true}>\n````js !! js\nconsole.log(1)\n```go !! go\nfmt.Println(1)\n```\n</Editor>";
    let outcome = parse(input);

    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [DiagnosticKind::UnterminatedBlock]);

    assert_eq!(outcome.layout.groups.len(), 1);
    let group = &outcome.layout.groups[0];
    assert_eq!(group.group.panes.len(), 1);
    assert_eq!(group.group.panes[0].language_tag.as_deref(), Some("go"));
    assert_eq!(group.group.panes[0].code, "fmt.Println(1)");
    assert!(!group.side_by_side);
}

#[test]
fn unterminated_region_keeps_earlier_groups() {
    let input = "<Editor title=\"Kept\">\n```go\nok\n```\n</Editor>\n\n<Editor title=\"Lost\">\n```go\nx\n```\n";
    let outcome = parse(input);

    assert_eq!(outcome.layout.groups.len(), 1);
    assert_eq!(outcome.layout.groups[0].title(), Some("Kept"));
    assert!(outcome.diagnostics.has_errors());
}

#[test]
fn unterminated_block_does_not_affect_sibling_regions() {
    let input = "<Editor title=\"A\">\n```js\nbroken\n</Editor>\n\n<Editor title=\"B\">\n```go\nfine\n```\n</Editor>\n\n<Editor title=\"C\" compare>\n```js\n1\n```\n```go\n2\n```\n</Editor>\n";
    let outcome = parse(input);

    let titles: Vec<_> = outcome
        .layout
        .groups
        .iter()
        .map(|g| g.title().unwrap())
        .collect();
    assert_eq!(titles, ["B", "C"]);
    assert!(outcome.layout.groups[1].side_by_side);

    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [DiagnosticKind::UnterminatedBlock, DiagnosticKind::EmptyRegion]
    );
    assert!(outcome.is_ok());
}

#[test]
fn tutorial_page_end_to_end() {
    let document = SourceDocument::with_path("concurrency.mdx", TUTORIAL.as_str());
    let outcome = parse_document(&document, &ExtractOptions::default());

    assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
    let layout = &outcome.layout;
    assert_eq!(layout.frontmatter_str("title"), Some("Concurrency"));
    assert_eq!(layout.path.as_deref(), Some("concurrency.mdx"));

    let titles: Vec<_> = layout.groups.iter().map(|g| g.title().unwrap()).collect();
    assert_eq!(titles, ["Starting work", "Channels", "Run it"]);

    let anchors: Vec<_> = layout
        .groups
        .iter()
        .map(|g| g.anchor.as_deref().unwrap())
        .collect();
    assert_eq!(anchors, ["starting-work", "channels", "run-it"]);

    assert_eq!(layout.side_by_side_count(), 2);
    assert_eq!(
        layout.groups[0].group.panes[1].code,
        "go func() {\n\tfmt.Println(\"done\")\n}()"
    );
    assert_eq!(layout.groups[2].group.panes[0].role_marker, None);
}

#[test]
fn group_order_and_ordinals_follow_source() {
    let outcome = parse(&TUTORIAL);
    let offsets: Vec<_> = outcome
        .layout
        .groups
        .iter()
        .map(|g| g.group.start_offset)
        .collect();
    assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));

    for group in &outcome.layout.groups {
        let ordinals: Vec<_> = group.panes().map(|p| p.ordinal).collect();
        let expected: Vec<_> = (0..group.group.panes.len()).collect();
        assert_eq!(ordinals, expected);
    }
}

#[test]
fn compare_groups_always_have_two_panes() {
    let input = "<Editor compare>\n```js\n1\n```\n</Editor>\n<Editor compare>\n```js\n1\n```\n```go\n2\n```\n</Editor>\n<Editor compare=\"true\">\n```go\n3\n```\n</Editor>\n";
    let outcome = parse(input);
    assert_eq!(outcome.layout.groups.len(), 3);
    for group in &outcome.layout.groups {
        if group.group.is_compare {
            assert!(group.group.panes.len() >= 2);
        }
    }
    assert_eq!(outcome.layout.side_by_side_count(), 1);
}

#[test]
fn tokenization_is_idempotent() {
    let options = ExtractOptions::default();
    let first: Vec<_> = Tokenizer::new(&TUTORIAL, &options).collect();
    let second: Vec<_> = Tokenizer::new(&TUTORIAL, &options).collect();
    assert_eq!(first, second);

    for (a, b) in first.iter().zip(&second) {
        let a_blocks: Vec<_> = a.as_ref().unwrap().code_blocks().collect();
        let b_blocks: Vec<_> = b.as_ref().unwrap().code_blocks().collect();
        assert_eq!(a_blocks, b_blocks);
    }

    assert_eq!(parse(&TUTORIAL), parse(&TUTORIAL));
}

#[test]
fn layout_serializes_to_camel_case_json() {
    let outcome = parse("<Editor title=\"X\" compare={true}>\n```js !! js\na\n```\n```go !! go\nb\n```\n</Editor>");
    let json = serde_json::to_value(&outcome).unwrap();

    let group = &json["layout"]["groups"][0];
    assert_eq!(group["sideBySide"], true);
    assert_eq!(group["paneOrder"], serde_json::json!([0, 1]));
    assert_eq!(group["anchor"], "x");
    assert_eq!(group["group"]["isCompare"], true);
    assert_eq!(group["group"]["panes"][1]["languageTag"], "go");
    assert_eq!(json["diagnostics"], serde_json::json!([]));
}

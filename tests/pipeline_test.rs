//! Integration tests for the extraction pipeline.

use std::fs;
use std::path::Path;

use scraper::{Html, Selector};
use unpage::pipeline::{ExtractOptions, FailureKind, Outcome, Pipeline};
use unpage::{LocateOptions, PageMap, SourceDocument, Strategy, Unpage};

/// Page identifiers and output slots of the demo application.
const DEMO_PAGES: &str = r#"{
    "dashboard": "dashboard",
    "jamaah": "jamaah",
    "packages": "packages",
    "payments": "payments",
    "documents": "documents",
    "groups": "groups",
    "groundHandling": "ground-handling",
    "reports": "reports",
    "excel": "excel"
}"#;

fn create_demo_document() -> String {
    let mut html = String::from(
        r##"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <title>Umroh Management System</title>
    <style>
        .page { display: none; }
        .page.active { display: block; }
    </style>
</head>
<body>
    <nav class="sidebar">
        <a href="#" onclick="showPage('dashboard')">Dashboard</a>
        <a href="#" onclick="showPage('excel')">Import Excel</a>
    </nav>
    <!-- Main Content -->
    <main class="main">
"##,
    );

    html.push_str(
        r#"<div id="dashboard" class="page active"><h2>Overview</h2><div class="stats"><div class="card">120 Jamaah</div></div></div>"#,
    );
    html.push_str(
        r#"<div id="jamaah" class="page"><div class="toolbar"><h3>Data Jamaah</h3></div><table><tr><td>Ahmad</td></tr></table></div>"#,
    );
    html.push('\n');

    for (id, title) in [
        ("packages", "Paket Umroh"),
        ("payments", "Pembayaran"),
        ("documents", "Dokumen"),
        ("groups", "Grup Keberangkatan"),
        ("groundHandling", "Ground Handling"),
        ("reports", "Laporan"),
    ] {
        html.push_str(&format!(
            "        <div id=\"{id}\" class=\"page\">\n            <h2>{title}</h2>\n            <!-- filters -->\n            <div class=\"content\"><p>{title}</p></div>\n        </div>\n",
        ));
    }

    html.push_str(
        r#"    </main>
    <style>
        .card { border-radius: 8px; }
    </style>
    <script>
        function showPage(id) { document.getElementById(id).innerHTML += '</div>'; }
    </script>
</body>
</html>"#,
    );
    html
}

fn create_output_dirs(base: &Path, pages: &PageMap) {
    for spec in pages {
        fs::create_dir_all(base.join(&spec.output_slot)).unwrap();
    }
}

fn run(strategy: Strategy, out: &Path) -> unpage::RunSummary {
    let pages = PageMap::from_json(DEMO_PAGES).unwrap();
    let options = ExtractOptions::new()
        .with_strategy(strategy)
        .with_output_dir(out);
    Pipeline::new(options)
        .run(&SourceDocument::new(create_demo_document()), &pages)
        .unwrap()
}

#[test]
fn test_dashboard_ends_at_next_page() {
    let text = create_demo_document();
    let doc = SourceDocument::new(text.clone());
    let jamaah_start = text.find(r#"<div id="jamaah""#).unwrap();
    let dashboard_start = text.find(r#"<div id="dashboard""#).unwrap();

    let locator = Strategy::Pattern
        .locator(&doc, LocateOptions::default())
        .unwrap();
    let region = locator.locate("dashboard").unwrap().unwrap();
    assert_eq!(region.span, Some(dashboard_start..jamaah_start));
    assert!(!region.content.contains("Data Jamaah"));

    let locator = Strategy::Structural
        .locator(&doc, LocateOptions::default())
        .unwrap();
    let region = locator.locate("dashboard").unwrap().unwrap();
    assert_eq!(region.title.as_deref(), Some("Overview"));
    assert!(!region.content.contains("Data Jamaah"));
    assert!(region.content.ends_with("</div>"));
}

#[test]
fn test_structural_content_reparses_to_same_subtree() {
    let text = create_demo_document();
    let doc = SourceDocument::new(text.clone());
    let locator = Strategy::Structural
        .locator(&doc, LocateOptions::default())
        .unwrap();
    let original = Html::parse_document(&text);

    for id in ["dashboard", "jamaah", "groundHandling"] {
        let region = locator.locate(id).unwrap().unwrap();
        let selector = Selector::parse(&format!("div#{}", id)).unwrap();

        let reparsed = Html::parse_document(&region.content);
        let reparsed_el = reparsed.select(&selector).next().unwrap();
        let original_el = original.select(&selector).next().unwrap();

        assert_eq!(reparsed_el.html(), original_el.html());
        assert_eq!(
            reparsed_el.text().collect::<String>(),
            original_el.text().collect::<String>()
        );
    }
}

#[test]
fn test_absent_identifier_is_not_found_for_both_strategies() {
    let doc = SourceDocument::new(create_demo_document());
    for strategy in [Strategy::Structural, Strategy::Pattern] {
        let locator = strategy.locator(&doc, LocateOptions::default()).unwrap();
        // "excel" appears in the sidebar but has no page container
        assert!(locator.locate("excel").unwrap().is_none());
        assert!(locator.locate("sidebar").unwrap().is_none());
    }
}

#[test]
fn test_missing_page_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let pages = PageMap::from_json(DEMO_PAGES).unwrap();
    create_output_dirs(dir.path(), &pages);

    let summary = run(Strategy::Structural, dir.path());

    assert_eq!(summary.total(), 9);
    assert_eq!(summary.written, 8);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.failed, 0);
    assert!(summary.get("excel").unwrap().is_not_found());
    assert!(!dir.path().join("excel/index.html").exists());
    // pages after the missing one are still written
    assert!(dir.path().join("ground-handling/index.html").exists());
    assert_eq!(
        summary.to_string(),
        "Extracted 8 of 9 pages (1 not found, 0 failed)"
    );
}

#[test]
fn test_assembled_page_uses_shared_shell() {
    let dir = tempfile::tempdir().unwrap();
    let pages = PageMap::from_json(DEMO_PAGES).unwrap();
    create_output_dirs(dir.path(), &pages);

    run(Strategy::Structural, dir.path());

    let dashboard = fs::read_to_string(dir.path().join("dashboard/index.html")).unwrap();
    let reports = fs::read_to_string(dir.path().join("reports/index.html")).unwrap();

    assert!(dashboard.contains("<title>Overview - Umroh Management System</title>"));
    assert!(reports.contains("<title>Laporan - Umroh Management System</title>"));
    assert!(dashboard.contains(".page.active { display: block; }"));
    assert!(dashboard.contains(".card { border-radius: 8px; }"));

    let head = |html: &str| html[html.find("</title>").unwrap()..html.find("</head>").unwrap()].to_string();
    assert_eq!(head(&dashboard), head(&reports));
}

#[test]
fn test_pattern_strategy_falls_back_to_identifier_title() {
    let dir = tempfile::tempdir().unwrap();
    let pages = PageMap::from_json(DEMO_PAGES).unwrap();
    create_output_dirs(dir.path(), &pages);

    run(Strategy::Pattern, dir.path());

    let page = fs::read_to_string(dir.path().join("ground-handling/index.html")).unwrap();
    assert!(page.contains("<title>Groundhandling - Umroh Management System</title>"));
    assert!(page.contains(r#"<div id="groundHandling" class="page">"#));
    assert!(page.contains("<!-- filters -->"));
}

#[test]
fn test_runs_are_idempotent() {
    for strategy in [Strategy::Structural, Strategy::Pattern] {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let pages = PageMap::from_json(DEMO_PAGES).unwrap();
        create_output_dirs(first.path(), &pages);
        create_output_dirs(second.path(), &pages);

        run(strategy, first.path());
        run(strategy, second.path());
        // run again over the first output to check overwriting
        run(strategy, first.path());

        for spec in &pages {
            let a = first.path().join(&spec.output_slot).join("index.html");
            let b = second.path().join(&spec.output_slot).join("index.html");
            assert_eq!(a.exists(), b.exists());
            if a.exists() {
                assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
            }
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = tempfile::tempdir().unwrap();
    let parallel = tempfile::tempdir().unwrap();
    let pages = PageMap::from_json(DEMO_PAGES).unwrap();
    create_output_dirs(sequential.path(), &pages);
    create_output_dirs(parallel.path(), &pages);
    let doc = SourceDocument::new(create_demo_document());

    let a = Pipeline::new(ExtractOptions::new().with_output_dir(sequential.path()))
        .run(&doc, &pages)
        .unwrap();
    let b = Pipeline::new(
        ExtractOptions::new()
            .with_output_dir(parallel.path())
            .with_parallel(true),
    )
    .run(&doc, &pages)
    .unwrap();

    let ids = |s: &unpage::RunSummary| {
        s.results
            .iter()
            .map(|r| (r.identifier.clone(), r.is_written()))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(
        fs::read(sequential.path().join("jamaah/index.html")).unwrap(),
        fs::read(parallel.path().join("jamaah/index.html")).unwrap()
    );
}

#[test]
fn test_missing_output_dir_is_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let pages = PageMap::from_pairs(["dashboard", "jamaah"]).unwrap();
    fs::create_dir(dir.path().join("dashboard")).unwrap();

    let summary = Pipeline::new(ExtractOptions::new().with_output_dir(dir.path()))
        .run(&SourceDocument::new(create_demo_document()), &pages)
        .unwrap();

    assert!(summary.get("dashboard").unwrap().is_written());
    match &summary.get("jamaah").unwrap().outcome {
        Outcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::Write),
        other => panic!("expected write failure, got {:?}", other),
    }
    assert!(!dir.path().join("jamaah").exists());
}

#[test]
fn test_main_content_marker_inside_region_is_kept() {
    let text = r#"<div id="payments" class="page"><h2>Pembayaran</h2><!-- Main Content --><p>Cicilan</p></div>
<div id="groups" class="page"></div>"#;
    let doc = SourceDocument::new(text);
    let locator = Strategy::Pattern
        .locator(&doc, LocateOptions::default())
        .unwrap();

    let region = locator.locate("payments").unwrap().unwrap();

    // balanced matching: the comment does not truncate the region
    assert!(region.content.contains("<p>Cicilan</p>"));
    assert_eq!(region.span.unwrap().end, text.find("\n").unwrap());
}

#[test]
fn test_unbalanced_page_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("dashboard")).unwrap();
    fs::create_dir(dir.path().join("jamaah")).unwrap();
    let text = r#"<div id="dashboard" class="page"><p>ok</p></div><div id="jamaah" class="page"><div>"#;

    let summary = Unpage::new()
        .with_strategy(Strategy::Pattern)
        .with_output_dir(dir.path())
        .with_document(SourceDocument::new(text))
        .extract(&PageMap::from_pairs(["dashboard", "jamaah"]).unwrap())
        .unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 1);
    assert!(matches!(
        summary.get("jamaah").unwrap().outcome,
        Outcome::Failed {
            kind: FailureKind::MalformedBoundary,
            ..
        }
    ));
}

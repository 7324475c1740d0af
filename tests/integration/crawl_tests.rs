//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small directory over HTTP and run the
//! full crawl-then-export pipeline end-to-end.

use std::path::Path;
use supplier_harvest::config::{Config, OutputFormat};
use supplier_harvest::{HarvestError, Harvester};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock directory
fn create_test_config(base_url: &str, output_dir: &Path, format: OutputFormat) -> Config {
    let mut config = Config::default();
    config.directory.name = "Test".to_string();
    config.directory.root_url = format!("{}/g-cloud/suppliers", base_url);
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.output.directory = output_dir.to_string_lossy().into_owned();
    config.output.format = format;
    config
}

fn landing_page(letters: &[&str]) -> String {
    let links: String = letters
        .iter()
        .map(|l| format!(r#"<li><a href="/g-cloud/letter/{}">{}</a></li>"#, l, l.to_uppercase()))
        .collect();
    format!(
        r#"<html><body><nav id="global-atoz-navigation"><ul>{}</ul></nav>
        <p>Choose a letter</p></body></html>"#,
        links
    )
}

fn listing_page(suppliers: &[&str], next: Option<&str>) -> String {
    let rows: String = suppliers
        .iter()
        .map(|s| {
            format!(
                r#"<div class="search-result"><h2 class="search-result-title"><a href="/g-cloud/supplier/{}">{}</a></h2></div>"#,
                s, s
            )
        })
        .collect();
    let next = next
        .map(|href| format!(r#"<li class="next"><a href="{}">Next page</a></li>"#, href))
        .unwrap_or_default();
    format!(
        r#"<html><body><div class="results">{}</div><ul class="pagination">{}</ul></body></html>"#,
        rows, next
    )
}

fn detail_page(name: &str, telephone: &str, email: &str) -> String {
    format!(
        r#"<html><body><div id="content">
        <header><h1>{}</h1></header>
        <p class="supplier-description">{} provides cloud services</p>
        <div id="meta"><div><p>Contact</p><p><span><span>Jo Bloggs</span></span></p></div></div>
        <div class="contact-details-block"><span>Contact details</span></div>
        <div class="contact-details-block"><span itemprop="telephone">{}</span></div>
        <div class="contact-details-block"><span itemprop="email">{}</span></div>
        </div></body></html>"#,
        name, name, telephone, email
    )
}

/// `set_body_string` would force `text/plain`; the mime must go through `set_body_raw`
fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV output");
    reader
        .records()
        .map(|row| row.expect("Malformed CSV row").iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_full_harvest_to_csv() {
    let server = MockServer::start().await;

    mount_page(&server, "/g-cloud/suppliers", landing_page(&["a", "z"])).await;
    mount_page(
        &server,
        "/g-cloud/letter/a",
        listing_page(&["zeta-old", "acme"], Some("/g-cloud/letter/a/2")),
    )
    .await;
    mount_page(&server, "/g-cloud/letter/a/2", listing_page(&["zeta-new"], None)).await;
    mount_page(&server, "/g-cloud/letter/z", listing_page(&["bravo"], None)).await;

    mount_page(
        &server,
        "/g-cloud/supplier/acme",
        detail_page("Acme Ltd", "020 1111 1111", "hello@acme.example"),
    )
    .await;
    mount_page(
        &server,
        "/g-cloud/supplier/bravo",
        detail_page("Bravo Systems", "020 2222 2222", "info@bravo.example"),
    )
    .await;
    // Two listing entries resolve to the same supplier name
    mount_page(
        &server,
        "/g-cloud/supplier/zeta-old",
        detail_page("Zeta Cloud", "020 0000 0000", "old@zeta.example"),
    )
    .await;
    mount_page(
        &server,
        "/g-cloud/supplier/zeta-new",
        detail_page("Zeta Cloud", "020 9999 9999", "new@zeta.example"),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), OutputFormat::Csv);
    let output_path = config.output_path();
    let summary_path = config.summary_path();

    let summary = Harvester::new(config)
        .expect("Failed to build harvester")
        .run()
        .await
        .expect("Harvest failed");

    assert_eq!(summary.listing_roots, 2);
    // Landing page plus two pages of "a" plus one page of "z"
    assert_eq!(summary.pages_visited, 4);
    assert_eq!(summary.records_extracted, 4);
    assert_eq!(summary.unique_records, 3);
    assert_eq!(summary.entities_skipped(), 0);

    let rows = read_csv(&output_path);
    let names: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(names, vec!["Acme Ltd", "Bravo Systems", "Zeta Cloud"]);

    assert_eq!(
        rows[0],
        vec![
            "Acme Ltd",
            "Jo Bloggs",
            "020 1111 1111",
            "hello@acme.example",
            "Acme Ltd provides cloud services"
        ]
    );
    // The later page's record replaced the earlier one wholesale
    assert_eq!(rows[2][2], "020 9999 9999");
    assert_eq!(rows[2][3], "new@zeta.example");

    let markdown = std::fs::read_to_string(summary_path).expect("Summary not written");
    assert!(markdown.contains("| Unique records | 3 |"));
}

#[tokio::test]
async fn test_failed_listing_page_ends_only_its_chain() {
    let server = MockServer::start().await;

    mount_page(&server, "/g-cloud/suppliers", landing_page(&["a", "b"])).await;
    mount_page(
        &server,
        "/g-cloud/letter/a",
        listing_page(&["acme"], Some("/g-cloud/letter/a/2")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/g-cloud/letter/a/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // Never reached: page 2 has no parsed next link
    Mock::given(method("GET"))
        .and(path("/g-cloud/letter/a/3"))
        .respond_with(html(listing_page(&["ghost"], None)))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/g-cloud/letter/b", listing_page(&["bravo"], None)).await;

    mount_page(
        &server,
        "/g-cloud/supplier/acme",
        detail_page("Acme Ltd", "020 1111 1111", "hello@acme.example"),
    )
    .await;
    mount_page(
        &server,
        "/g-cloud/supplier/bravo",
        detail_page("Bravo Systems", "020 2222 2222", "info@bravo.example"),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), OutputFormat::Csv);
    let output_path = config.output_path();

    let summary = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.pages_failed, 1);
    let names: Vec<String> = read_csv(&output_path).into_iter().map(|r| r[0].clone()).collect();
    assert_eq!(names, vec!["Acme Ltd", "Bravo Systems"]);
}

#[tokio::test]
async fn test_broken_supplier_pages_are_skipped() {
    let server = MockServer::start().await;

    mount_page(&server, "/g-cloud/suppliers", landing_page(&["a"])).await;
    mount_page(
        &server,
        "/g-cloud/letter/a",
        listing_page(&["acme", "gone", "anonymous"], None),
    )
    .await;
    mount_page(
        &server,
        "/g-cloud/supplier/acme",
        detail_page("Acme Ltd", "020 1111 1111", "hello@acme.example"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/g-cloud/supplier/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/g-cloud/supplier/anonymous",
        r#"<html><body><div id="content"><p>No heading</p></div></body></html>"#.to_string(),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), OutputFormat::Csv);
    let output_path = config.output_path();

    let summary = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.entities_attempted, 3);
    assert_eq!(summary.skipped_fetch_failed, 1);
    assert_eq!(summary.skipped_missing_name, 1);
    assert_eq!(read_csv(&output_path).len(), 1);
}

#[tokio::test]
async fn test_missing_navigation_writes_nothing() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/g-cloud/suppliers",
        "<html><body><p>Down for maintenance</p></body></html>".to_string(),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), OutputFormat::Xlsx);
    let output_path = config.output_path();

    let result = Harvester::new(config).unwrap().run().await;

    assert!(matches!(result, Err(HarvestError::NavigationMissing { .. })));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_non_html_landing_page_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/g-cloud/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), OutputFormat::Xlsx);

    let result = Harvester::new(config).unwrap().run().await;
    assert!(matches!(result, Err(HarvestError::RootFetch(_))));
}

#[tokio::test]
async fn test_plain_text_pages_are_parsed_as_markup() {
    let server = MockServer::start().await;

    let plain = |body: String| ResponseTemplate::new(200).set_body_raw(body, "text/plain");
    Mock::given(method("GET"))
        .and(path("/g-cloud/suppliers"))
        .respond_with(plain(landing_page(&["a"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/g-cloud/letter/a"))
        .respond_with(plain(listing_page(&["acme"], None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/g-cloud/supplier/acme"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                detail_page("Acme Ltd", "020 1111 1111", "hello@acme.example"),
                "application/xhtml+xml",
            ),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), OutputFormat::Csv);
    let output_path = config.output_path();

    let summary = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.listing_roots, 1);
    assert_eq!(summary.pages_failed, 0);
    let rows = read_csv(&output_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Acme Ltd");
}

#[tokio::test]
async fn test_harvest_to_xlsx() {
    let server = MockServer::start().await;

    mount_page(&server, "/g-cloud/suppliers", landing_page(&["a"])).await;
    mount_page(&server, "/g-cloud/letter/a", listing_page(&["acme"], None)).await;
    mount_page(
        &server,
        "/g-cloud/supplier/acme",
        detail_page("Acme Ltd", "020 1111 1111", "hello@acme.example"),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), &dir.path().join("out"), OutputFormat::Xlsx);
    let output_path = config.output_path();

    let summary = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.output_path.as_deref(), Some(output_path.as_path()));
    assert!(output_path.ends_with("Test-Suppliers-List.xlsx"));
    let bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

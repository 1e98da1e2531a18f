use crate::{data_list_page, detail_page, empty_page, mount_html, mount_listing, test_config};
use camara_scraper::browser::Chrome;
use camara_scraper::config::SiteKind;
use camara_scraper::output::{read_json_index, write_json_index, DocumentRecord};
use camara_scraper::state::{locate_resume_point, Checkpoint, ResumeSource};
use camara_scraper::{Harvester, RunOptions};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(title: &str, page: u32) -> DocumentRecord {
    DocumentRecord {
        title: title.to_string(),
        folder_path: format!("saida/{}", title),
        primary_pdf_path: String::new(),
        attachments: vec![],
        page_number: page,
    }
}

async fn forbid_listing(server: &MockServer, page: u32) {
    Mock::given(method("GET"))
        .and(path("/lista"))
        .and(query_param("pagina", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resumes_at_last_indexed_page() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let config = test_config(SiteKind::Proposituras, &base, dir.path());
    let output = config.output.clone();
    write_json_index(
        &[record("A", 1), record("B", 2), record("C", 2)],
        &output.index_json_path(),
    )
    .unwrap();

    forbid_listing(&server, 1).await;
    mount_listing(&server, 2, data_list_page(&base, &[("B", "/doc/b"), ("C", "/doc/c")])).await;
    mount_listing(&server, 3, empty_page()).await;
    mount_html(&server, "/doc/b", detail_page(&[])).await;
    mount_html(&server, "/doc/c", detail_page(&[])).await;

    let mut harvester = Harvester::<Chrome>::new(config, None).unwrap();
    let summary = harvester.run(RunOptions::default()).await.unwrap();

    assert_eq!(summary.start_page, 2);
    assert_eq!(summary.documents_collected, 2);
    assert_eq!(summary.total_records, 3);

    let records = read_json_index(&output.index_json_path()).unwrap().unwrap();
    let titles: Vec<(&str, u32)> = records
        .iter()
        .map(|r| (r.title.as_str(), r.page_number))
        .collect();
    assert_eq!(titles, vec![("A", 1), ("B", 2), ("C", 2)]);
}

#[tokio::test]
async fn test_checkpoint_takes_precedence_over_index() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let config = test_config(SiteKind::Proposituras, &base, dir.path());
    let output = config.output.clone();
    write_json_index(
        &[record("A", 1), record("B", 2), record("C", 3)],
        &output.index_json_path(),
    )
    .unwrap();
    Checkpoint::new(2).save(&output.checkpoint_path()).unwrap();

    forbid_listing(&server, 1).await;
    forbid_listing(&server, 2).await;
    mount_listing(&server, 3, data_list_page(&base, &[("C", "/doc/c")])).await;
    mount_listing(&server, 4, empty_page()).await;
    mount_html(&server, "/doc/c", detail_page(&[])).await;

    let mut harvester = Harvester::<Chrome>::new(config, None).unwrap();
    let summary = harvester.run(RunOptions::default()).await.unwrap();

    assert_eq!(summary.start_page, 3);
    assert_eq!(summary.last_completed_page, Some(3));

    let records = read_json_index(&output.index_json_path()).unwrap().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].title, "C");

    let checkpoint = Checkpoint::load(&output.checkpoint_path()).unwrap().unwrap();
    assert_eq!(checkpoint.last_completed_page, 3);
}

#[tokio::test]
async fn test_fresh_run_ignores_previous_state() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let config = test_config(SiteKind::Proposituras, &base, dir.path());
    let output = config.output.clone();
    write_json_index(&[record("Antigo", 5)], &output.index_json_path()).unwrap();
    Checkpoint::new(5).save(&output.checkpoint_path()).unwrap();

    mount_listing(&server, 1, data_list_page(&base, &[("Novo", "/doc/novo")])).await;
    mount_listing(&server, 2, empty_page()).await;
    mount_html(&server, "/doc/novo", detail_page(&[])).await;

    let mut harvester = Harvester::<Chrome>::new(config, None).unwrap();
    let summary = harvester
        .run(RunOptions {
            single_page: false,
            fresh: true,
        })
        .await
        .unwrap();

    assert_eq!(summary.start_page, 1);

    let records = read_json_index(&output.index_json_path()).unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Novo");

    let checkpoint = Checkpoint::load(&output.checkpoint_path()).unwrap().unwrap();
    assert_eq!(checkpoint.last_completed_page, 1);
}

#[tokio::test]
async fn test_malformed_index_starts_over() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let config = test_config(SiteKind::Proposituras, &base, dir.path());
    let output = config.output.clone();
    std::fs::write(output.index_json_path(), "{ not json").unwrap();

    mount_listing(&server, 1, empty_page()).await;

    let mut harvester = Harvester::<Chrome>::new(config, None).unwrap();
    let summary = harvester.run(RunOptions::default()).await.unwrap();

    assert_eq!(summary.start_page, 1);
    assert_eq!(summary.last_completed_page, None);

    let records = read_json_index(&output.index_json_path()).unwrap().unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_interrupted_run_keeps_completed_pages() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let config = test_config(SiteKind::Proposituras, &base, dir.path());
    let output = config.output.clone();

    mount_listing(&server, 1, data_list_page(&base, &[("A", "/doc/a")])).await;
    mount_listing(&server, 2, data_list_page(&base, &[("B", "/doc/b")])).await;
    mount_listing(&server, 3, data_list_page(&base, &[("C", "/doc/c")])).await;
    mount_html(&server, "/doc/a", detail_page(&[])).await;
    mount_html(&server, "/doc/b", detail_page(&[])).await;
    Mock::given(method("GET"))
        .and(path("/doc/c"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_page(&[]))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let mut harvester = Harvester::<Chrome>::new(config, None).unwrap();
    let interrupted =
        tokio::time::timeout(Duration::from_secs(2), harvester.run(RunOptions::default())).await;
    assert!(interrupted.is_err());
    drop(harvester);

    let checkpoint = Checkpoint::load(&output.checkpoint_path()).unwrap().unwrap();
    assert_eq!(checkpoint.last_completed_page, 2);

    let records = read_json_index(&output.index_json_path()).unwrap().unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);

    let resume = locate_resume_point(&output, false);
    assert_eq!(resume.start_page, 3);
    assert_eq!(resume.source, ResumeSource::Checkpoint);
    assert_eq!(resume.records.len(), 2);
}

//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a mock portal (listing pages, detail
//! pages and files) and run full harvests into temporary directories.

mod resume_tests;

use camara_scraper::browser::PageRenderer;
use camara_scraper::config::{Config, OutputConfig, SiteKind};
use std::path::Path;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing at the mock server and a temp directory
pub fn test_config(kind: SiteKind, base_url: &str, output_dir: &Path) -> Config {
    let mut config = Config::for_site(kind);
    config.site.listing_url = format!("{}/lista?pagina={{page}}", base_url);
    config.output = OutputConfig::new(output_dir);
    config.render.enabled = false;
    config.render.settle_delay_ms = 0;
    config
}

/// Listing page in the proposals layout, one entry per (title, detail path)
pub fn data_list_page(base_url: &str, entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(title, detail)| {
            format!(
                r#"<div class="data-list-item"><h4><a href="{}{}">{}</a></h4><p>Ementa</p></div>"#,
                base_url, detail, title
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="data-list">{}</div></body></html>"#,
        items
    )
}

/// Listing page in the legislation layout, one entry per (title, detail path, pdf path)
pub fn normas_page(entries: &[(&str, &str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(title, detail, pdf)| {
            format!(
                r#"<div class="normas-lista"><a href="{}">{}</a><a href="{}/compilado">Compilado</a><a href="{}">PDF</a></div>"#,
                detail, title, detail, pdf
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="float-left col-md-9">{}</div></body></html>"#,
        items
    )
}

/// Detail page with an attachment table, one row per (link text, file path)
pub fn detail_page(attachments: &[(&str, &str)]) -> String {
    let rows: String = attachments
        .iter()
        .map(|(text, href)| format!(r#"<tr><td><a href="{}">{}</a></td><td>2024</td></tr>"#, href, text))
        .collect();
    format!(
        r#"<html><body><h2>Detalhes</h2><table class="table table-striped"><thead><tr><th>Arquivo</th><th>Ano</th></tr></thead><tbody>{}</tbody></table></body></html>"#,
        rows
    )
}

pub fn empty_page() -> String {
    "<html><body><p>Nenhum resultado encontrado</p></body></html>".to_string()
}

pub async fn mount_listing(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/lista"))
        .and(query_param("pagina", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_file(server: &MockServer, route: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Sub-directories of the output directory
pub fn document_folders(output_dir: &Path) -> Vec<std::path::PathBuf> {
    let mut folders: Vec<_> = std::fs::read_dir(output_dir)
        .expect("output directory exists")
        .map(|entry| entry.expect("readable entry").path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    folders
}

pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .expect("folder exists")
        .filter(|entry| entry.as_ref().map(|e| e.path().is_file()).unwrap_or(false))
        .count()
}

/// Renderer writing a placeholder PDF instead of launching a browser
pub struct FakeRenderer;

impl PageRenderer for FakeRenderer {
    async fn render_pdf(&self, _url: &Url, destination: &Path) -> camara_scraper::Result<()> {
        std::fs::write(destination, b"%PDF-1.4 rendered")?;
        Ok(())
    }
}

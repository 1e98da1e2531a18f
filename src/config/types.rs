use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for Camara-Scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub render: RenderConfig,
    pub output: OutputConfig,

    /// Link-text rules used to infer the kind of a downloaded file
    #[serde(default = "default_classification")]
    pub classification: Vec<ClassificationRule>,

    /// Kind used when no classification rule matches
    #[serde(rename = "default-kind", default = "default_kind")]
    pub default_kind: String,
}

/// Which portal layout the listing and detail pages follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// Document search of the legislative process system (proposals and requests)
    Proposituras,
    /// Digital legislation portal (laws and complementary norms)
    Normas,
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proposituras => write!(f, "proposituras"),
            Self::Normas => write!(f, "normas"),
        }
    }
}

/// Listing source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Layout of the portal being scraped
    pub kind: SiteKind,

    /// Listing URL template, `{page}` is replaced by the page number
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// CSS selector that must be present on a loaded listing page
    #[serde(rename = "listing-marker")]
    pub listing_marker: String,

    /// Stop after this many pages in a single run
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,
}

impl SiteConfig {
    /// Builds the listing URL for a page number
    pub fn listing_url_for(&self, page: u32) -> String {
        self.listing_url.replace("{page}", &page.to_string())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Page-to-PDF rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Render detail pages to PDF with a headless browser
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Pause after each rendered page (milliseconds)
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Explicit Chrome/Chromium executable, discovered from PATH when unset
    #[serde(rename = "chrome-path", default)]
    pub chrome_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_delay_ms: default_settle_delay_ms(),
            chrome_path: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one folder per document plus the index files
    pub directory: PathBuf,

    /// File name of the JSON index
    #[serde(rename = "index-json", default = "default_index_json")]
    pub index_json: String,

    /// File name of the CSV index
    #[serde(rename = "index-csv", default = "default_index_csv")]
    pub index_csv: String,

    /// File name of the page checkpoint
    #[serde(default = "default_checkpoint")]
    pub checkpoint: String,
}

impl OutputConfig {
    /// Creates an output configuration with the default file names
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            index_json: default_index_json(),
            index_csv: default_index_csv(),
            checkpoint: default_checkpoint(),
        }
    }

    pub fn index_json_path(&self) -> PathBuf {
        self.directory.join(&self.index_json)
    }

    pub fn index_csv_path(&self) -> PathBuf {
        self.directory.join(&self.index_csv)
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.directory.join(&self.checkpoint)
    }
}

/// Maps a link text fragment to a file kind (also used as the file extension)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassificationRule {
    /// Case-insensitive substring of the link text
    pub pattern: String,

    /// Kind assigned when the pattern matches
    pub kind: String,
}

impl ClassificationRule {
    pub fn new(pattern: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: kind.into(),
        }
    }
}

impl Config {
    /// Built-in profile for a portal layout
    pub fn for_site(kind: SiteKind) -> Self {
        match kind {
            SiteKind::Proposituras => Self::proposituras(),
            SiteKind::Normas => Self::normas(),
        }
    }

    /// Proposals search of the Rio Claro chamber
    pub fn proposituras() -> Self {
        Self {
            site: SiteConfig {
                kind: SiteKind::Proposituras,
                listing_url: "https://rioclaro.siscam.com.br/Documentos/Pesquisa?Pesquisa=Avancada&id=80&pagina={page}&Modulo=8&Documento=0&Numeracao=Documento&NumeroInicial=&AnoInicial=&DataInicial=&NumeroFinal=&AnoFinal=&DataFinal=&Situacao=0&TipoAutor=Todos&AutoriaId=0&Iniciativa=Nenhum&NoTexto=false&Assunto=a&Observacoes=".to_string(),
                listing_marker: ".data-list-item".to_string(),
                max_pages: None,
            },
            http: HttpConfig::default(),
            render: RenderConfig::default(),
            output: OutputConfig::new("proposituras"),
            classification: default_classification(),
            default_kind: default_kind(),
        }
    }

    /// Complementary legislation of Rio Claro
    pub fn normas() -> Self {
        Self {
            site: SiteConfig {
                kind: SiteKind::Normas,
                listing_url: "https://legislacaodigital.com.br/RioClaro-SP?Pagina={page}&Pesquisa=Avancada&TipoId=0&Numero=&Ano=&Data=&NumeroFinal=&AnoFinal=&DataFinal=&SituacaoId=0&ClassificacaoId=0&EmentaAssunto=a&PaginaCount=20&NoTexto=false".to_string(),
                listing_marker: ".float-left.col-md-9".to_string(),
                max_pages: None,
            },
            http: HttpConfig::default(),
            render: RenderConfig {
                enabled: false,
                ..RenderConfig::default()
            },
            output: OutputConfig::new("complemento_legislativo"),
            classification: default_classification(),
            default_kind: default_kind(),
        }
    }
}

fn default_classification() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new("modelo_requerimento", "doc"),
        ClassificationRule::new("documento assinado", "pdf"),
    ]
}

fn default_kind() -> String {
    "pdf".to_string()
}

fn default_user_agent() -> String {
    format!("camara-scraper/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_index_json() -> String {
    "documentos_info.json".to_string()
}

fn default_index_csv() -> String {
    "documentos_info.csv".to_string()
}

fn default_checkpoint() -> String {
    "checkpoint.json".to_string()
}

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! OpenDART data source for company resolution and financial statements.
//!
//! This crate implements the `dart-core` traits for Korea's
//! [OpenDART](https://opendart.fss.or.kr/) disclosure API:
//!
//! - Company lookup by registered name or 6-digit stock code
//! - Bulk `corpCode.xml` reference-table download (zip archive containing
//!   one XML document)
//! - Financial statement retrieval (`fnlttSinglAcnt`)
//!
//! # Example
//!
//! ```rust,ignore
//! use dart_opendart::OpendartClient;
//! use dart_core::{DisclosureSource, StatementQuery, CorpCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpendartClient::new("your_api_key");
//!
//!     let query = StatementQuery::new(CorpCode::new("00126380"), 2023);
//!     let outcome = client.fetch_statement(&query).await;
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use dart_core::{
    ApiOutcome, CorpCode, CorpEntry, DartError, DisclosureSource, Result, StatementQuery,
    StatementRow,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::io::{Cursor, Read};
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL for the OpenDART API.
const OPENDART_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// Status code the service uses for a successful call.
const STATUS_OK: &str = "000";

/// Default timeout for every outbound call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenDART API client.
///
/// Provides access to:
/// - Company lookup by name or stock code
/// - The bulk company reference table (`corpCode.xml`)
/// - Single-company financial statements (`fnlttSinglAcnt`)
#[derive(Clone)]
pub struct OpendartClient {
    client: reqwest::Client,
    crtfc_key: String,
}

impl fmt::Debug for OpendartClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpendartClient")
            .field("crtfc_key", &"[REDACTED]")
            .finish()
    }
}

impl OpendartClient {
    /// Create a new OpenDART client with the given API key.
    ///
    /// The key (`crtfc_key`) is issued by the DART open-data portal and is
    /// appended to every request.
    #[must_use]
    pub fn new(crtfc_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            crtfc_key: crtfc_key.into(),
        }
    }

    /// Create a new OpenDART client with a custom HTTP client.
    ///
    /// The client should already carry a request timeout; the service has
    /// no streaming endpoints.
    #[must_use]
    pub fn with_client(client: reqwest::Client, crtfc_key: impl Into<String>) -> Self {
        Self {
            client,
            crtfc_key: crtfc_key.into(),
        }
    }

    /// Build the full URL for an endpoint.
    fn url(endpoint: &str) -> String {
        format!("{OPENDART_BASE_URL}/{endpoint}")
    }

    /// Make a GET request and classify the JSON response into an outcome.
    async fn get_outcome<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> ApiOutcome<T> {
        debug!("OpenDART request: {}", endpoint);

        let response = match self
            .client
            .get(Self::url(endpoint))
            .query(&[("crtfc_key", self.crtfc_key.as_str())])
            .query(params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return ApiOutcome::Transport(e.to_string()),
        };

        if !response.status().is_success() {
            return ApiOutcome::Transport(format!("HTTP {}", response.status()));
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ApiOutcome::Transport(e.to_string()),
        };

        classify_body(&text)
    }

    /// Fetch the raw bytes of the bulk `corpCode.xml` archive.
    async fn fetch_corp_archive(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(Self::url("corpCode.xml"))
            .query(&[("crtfc_key", self.crtfc_key.as_str())])
            .send()
            .await
            .map_err(|e| DartError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DartError::Network(format!(
                "Failed to fetch corp table: HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DartError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DisclosureSource for OpendartClient {
    fn name(&self) -> &str {
        "OpenDART"
    }

    async fn search_company(&self, corp_name: &str) -> ApiOutcome<Vec<CorpEntry>> {
        let body: ApiOutcome<CompanyListBody> = self
            .get_outcome("company.json", &[("corp_name", corp_name)])
            .await;

        body.map(|body| body.list.into_iter().map(CompanyHit::into_entry).collect())
    }

    async fn company_by_stock_code(&self, stock_code: &str) -> ApiOutcome<CorpEntry> {
        let body: ApiOutcome<CompanyBody> = self
            .get_outcome("company.json", &[("stock_code", stock_code)])
            .await;

        match body {
            ApiOutcome::Success(body) => match body.corp_code {
                Some(code) => ApiOutcome::Success(
                    CorpEntry::new(body.corp_name.unwrap_or_default(), CorpCode::new(code))
                        .with_stock_code(stock_code),
                ),
                None => ApiOutcome::Transport("malformed response: missing corp_code".to_string()),
            },
            ApiOutcome::Rejected { code, message } => ApiOutcome::Rejected { code, message },
            ApiOutcome::Transport(reason) => ApiOutcome::Transport(reason),
        }
    }

    async fn download_corp_table(&self) -> Result<Vec<CorpEntry>> {
        let bytes = self.fetch_corp_archive().await?;

        // The service answers errors to this endpoint with a JSON body
        // instead of a zip archive.
        if bytes.starts_with(b"{") {
            let text = String::from_utf8_lossy(&bytes);
            return match classify_body::<serde_json::Value>(&text) {
                ApiOutcome::Rejected { code, message } => Err(DartError::Rejected { code, message }),
                _ => Err(DartError::Parse(
                    "corp table endpoint returned JSON instead of a zip archive".to_string(),
                )),
            };
        }

        let entries = parse_corp_archive(&bytes)?;
        debug!("Downloaded corp table with {} entries", entries.len());
        Ok(entries)
    }

    async fn fetch_statement(&self, query: &StatementQuery) -> ApiOutcome<Vec<StatementRow>> {
        let year = query.bsns_year.to_string();
        let body: ApiOutcome<StatementBody> = self
            .get_outcome(
                "fnlttSinglAcnt.json",
                &[
                    ("corp_code", query.corp_code.as_str()),
                    ("bsns_year", &year),
                    ("reprt_code", query.report.code()),
                    ("fs_div", query.fs_div.code()),
                ],
            )
            .await;

        body.map(|body| body.list)
    }
}

/// Classify a JSON response body into an [`ApiOutcome`].
///
/// The service wraps every JSON payload in a `{status, message, ...}`
/// envelope; anything that does not fit that shape is a transport-level
/// failure for cascade purposes.
fn classify_body<T: DeserializeOwned>(text: &str) -> ApiOutcome<T> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return ApiOutcome::Transport(format!("malformed response: {e}")),
    };

    let Some(status) = value.get("status").and_then(|s| s.as_str()) else {
        return ApiOutcome::Transport("malformed response: missing status".to_string());
    };

    if status != STATUS_OK {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("")
            .to_string();
        return ApiOutcome::Rejected {
            code: status.to_string(),
            message,
        };
    }

    match serde_json::from_value(value) {
        Ok(payload) => ApiOutcome::Success(payload),
        Err(e) => ApiOutcome::Transport(format!("malformed response: {e}")),
    }
}

/// Open the bulk archive and parse the single XML document inside.
fn parse_corp_archive(bytes: &[u8]) -> Result<Vec<CorpEntry>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DartError::Parse(format!("corp table archive: {e}")))?;

    if archive.is_empty() {
        return Err(DartError::Parse(
            "corp table archive contains no entries".to_string(),
        ));
    }

    let mut file = archive
        .by_index(0)
        .map_err(|e| DartError::Parse(format!("corp table archive entry: {e}")))?;

    let mut raw = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut raw)
        .map_err(|e| DartError::Parse(format!("corp table archive read: {e}")))?;

    let xml = String::from_utf8_lossy(&raw);
    parse_corp_table(&xml)
}

/// Parse the `corpCode.xml` document into reference-table entries.
///
/// Duplicate corp codes violate the table invariant; the first occurrence
/// wins and later ones are dropped with a warning.
fn parse_corp_table(xml: &str) -> Result<Vec<CorpEntry>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut seen: HashSet<CorpCode> = HashSet::new();

    let mut current_tag: Option<String> = None;
    let mut corp_code = String::new();
    let mut corp_name = String::new();
    let mut stock_code = String::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => {
                let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if tag == "list" {
                    corp_code.clear();
                    corp_name.clear();
                    stock_code.clear();
                }
                current_tag = Some(tag);
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| DartError::Parse(format!("corp table XML: {e}")))?;
                match current_tag.as_deref() {
                    Some("corp_code") => corp_code.push_str(&value),
                    Some("corp_name") => corp_name.push_str(&value),
                    Some("stock_code") => stock_code.push_str(&value),
                    _ => {}
                }
            }
            Ok(Event::End(end)) => {
                if end.name().as_ref() == b"list" && !corp_code.trim().is_empty() {
                    let code = CorpCode::new(corp_code.trim());
                    if seen.insert(code.clone()) {
                        let mut entry = CorpEntry::new(corp_name.trim(), code);
                        let ticker = stock_code.trim();
                        if !ticker.is_empty() {
                            entry = entry.with_stock_code(ticker);
                        }
                        entries.push(entry);
                    } else {
                        warn!(corp_code = %code, "Duplicate corp code in reference table, keeping first");
                    }
                }
                current_tag = None;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(DartError::Parse(format!("corp table XML: {e}"))),
        }
        buf.clear();
    }

    if entries.is_empty() {
        return Err(DartError::Parse(
            "corp table document contained no companies".to_string(),
        ));
    }

    Ok(entries)
}

// ============================================================================
// OpenDART API Response Types
// ============================================================================

/// Envelope body for name-based company lookup.
#[derive(Debug, Deserialize)]
struct CompanyListBody {
    #[serde(default)]
    list: Vec<CompanyHit>,
}

/// One candidate from the name lookup.
#[derive(Debug, Deserialize)]
struct CompanyHit {
    #[serde(default)]
    corp_code: String,
    #[serde(default)]
    corp_name: String,
    #[serde(default)]
    stock_code: Option<String>,
}

impl CompanyHit {
    fn into_entry(self) -> CorpEntry {
        let mut entry = CorpEntry::new(self.corp_name, CorpCode::new(self.corp_code));
        if let Some(ticker) = self.stock_code
            && !ticker.trim().is_empty()
        {
            entry = entry.with_stock_code(ticker.trim());
        }
        entry
    }
}

/// Envelope body for stock-code company lookup.
#[derive(Debug, Deserialize)]
struct CompanyBody {
    corp_code: Option<String>,
    corp_name: Option<String>,
}

/// Envelope body for the statement fetch.
#[derive(Debug, Deserialize)]
struct StatementBody {
    #[serde(default)]
    list: Vec<StatementRow>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        assert_eq!(
            OpendartClient::url("fnlttSinglAcnt.json"),
            "https://opendart.fss.or.kr/api/fnlttSinglAcnt.json"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = OpendartClient::new("secret_key_12345");
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_client_metadata() {
        let client = OpendartClient::new("test_key");
        assert_eq!(client.name(), "OpenDART");
    }

    #[test]
    fn test_classify_success_body() {
        let body = r#"{
            "status": "000",
            "message": "정상",
            "list": [
                {"corp_code": "00126380", "corp_name": "삼성전자", "stock_code": "005930"}
            ]
        }"#;

        match classify_body::<CompanyListBody>(body) {
            ApiOutcome::Success(parsed) => {
                assert_eq!(parsed.list.len(), 1);
                assert_eq!(parsed.list[0].corp_code, "00126380");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_no_data_is_rejection() {
        let body = r#"{"status": "013", "message": "조회된 데이타가 없습니다."}"#;

        match classify_body::<StatementBody>(body) {
            ApiOutcome::Rejected { code, .. } => assert_eq!(code, "013"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_malformed_body_is_transport() {
        assert!(matches!(
            classify_body::<StatementBody>("<html>gateway error</html>"),
            ApiOutcome::Transport(_)
        ));
        assert!(matches!(
            classify_body::<StatementBody>(r#"{"no_status": true}"#),
            ApiOutcome::Transport(_)
        ));
    }

    #[test]
    fn test_parse_corp_table() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <result>
                <list>
                    <corp_code>00126380</corp_code>
                    <corp_name>삼성전자</corp_name>
                    <stock_code>005930</stock_code>
                    <modify_date>20240101</modify_date>
                </list>
                <list>
                    <corp_code>00144155</corp_code>
                    <corp_name>삼성전자서비스</corp_name>
                    <stock_code> </stock_code>
                    <modify_date>20240101</modify_date>
                </list>
            </result>"#;

        let entries = parse_corp_table(xml).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].corp_code, CorpCode::new("00126380"));
        assert_eq!(entries[0].stock_code.as_deref(), Some("005930"));
        assert!(entries[0].listed);

        assert_eq!(entries[1].corp_name, "삼성전자서비스");
        assert!(entries[1].stock_code.is_none());
        assert!(!entries[1].listed);
    }

    #[test]
    fn test_parse_corp_table_dedups_corp_codes() {
        let xml = r#"<result>
            <list><corp_code>00126380</corp_code><corp_name>First</corp_name><stock_code>005930</stock_code></list>
            <list><corp_code>00126380</corp_code><corp_name>Second</corp_name><stock_code> </stock_code></list>
        </result>"#;

        let entries = parse_corp_table(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].corp_name, "First");
    }

    #[test]
    fn test_parse_corp_table_empty_document_fails() {
        assert!(parse_corp_table("<result></result>").is_err());
    }

    #[test]
    fn test_parse_corp_archive_round_trip() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let xml = r#"<result>
            <list><corp_code>00164779</corp_code><corp_name>SK하이닉스</corp_name><stock_code>000660</stock_code></list>
        </result>"#;

        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("CORPCODE.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let entries = parse_corp_archive(&buf).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].corp_code, CorpCode::new("00164779"));
    }

    #[test]
    fn test_parse_corp_archive_rejects_garbage() {
        assert!(parse_corp_archive(b"definitely not a zip").is_err());
    }
}

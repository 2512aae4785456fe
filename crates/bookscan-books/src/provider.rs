// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Metadata provider — ISBN to bibliographic record.
//
// The default provider is the Google Books volumes API. A lookup for a known
// ISBN returns the first matching volume; an empty result set is
// `LookupNotFound`, anything that goes wrong on the wire is
// `LookupTransport`.

use std::time::Duration;

use async_trait::async_trait;
use bookscan_core::config::LookupSettings;
use bookscan_core::error::{BookscanError, Result};
use bookscan_core::{BookInfo, Isbn};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = concat!("bookscan/", env!("CARGO_PKG_VERSION"));

/// Source of bibliographic metadata keyed by ISBN.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, isbn: &Isbn) -> Result<BookInfo>;
}

// -- Wire format ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    description: Option<String>,
    published_date: Option<String>,
    publisher: Option<String>,
    page_count: Option<u32>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

/// Turn a volumes search response body into a [`BookInfo`] for `isbn`.
///
/// Only the first volume is used. The returned record keeps the ISBN that was
/// asked for, not whatever identifier the provider lists.
pub fn parse_volumes(isbn: &Isbn, body: &str) -> Result<BookInfo> {
    let response: VolumesResponse = serde_json::from_str(body)
        .map_err(|e| BookscanError::LookupTransport(format!("malformed response: {e}")))?;

    if response.total_items == 0 {
        return Err(BookscanError::LookupNotFound(isbn.to_string()));
    }
    let Some(volume) = response.items.into_iter().next() else {
        return Err(BookscanError::LookupNotFound(isbn.to_string()));
    };

    let info = volume.volume_info;
    Ok(BookInfo {
        isbn: isbn.clone(),
        title: info.title.unwrap_or_default(),
        authors: info.authors,
        description: info.description,
        image_url: info.image_links.and_then(|links| links.thumbnail),
        published_date: info.published_date,
        publisher: info.publisher,
        page_count: info.page_count,
    })
}

// -- Client --------------------------------------------------------------------

/// Google Books volumes API client.
pub struct GoogleBooksClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(settings: &LookupSettings) -> Result<Self> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|e| {
            BookscanError::Config(format!("invalid lookup endpoint {}: {e}", settings.endpoint))
        })?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| BookscanError::LookupTransport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            api_key: settings.api_key.clone(),
        })
    }

    /// The request URL for `isbn`.
    pub fn request_url(&self, isbn: &Isbn) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", &format!("isbn:{isbn}"));
            if let Some(key) = &self.api_key {
                query.append_pair("key", key);
            }
        }
        url
    }
}

#[async_trait]
impl MetadataProvider for GoogleBooksClient {
    #[instrument(skip_all, fields(isbn = %isbn))]
    async fn lookup(&self, isbn: &Isbn) -> Result<BookInfo> {
        let url = self.request_url(isbn);
        debug!(host = url.host_str().unwrap_or_default(), "Querying metadata provider");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BookscanError::LookupTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Metadata provider returned an error status");
            return Err(BookscanError::LookupTransport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BookscanError::LookupTransport(e.to_string()))?;
        let book = parse_volumes(isbn, &body)?;
        info!(title = %book.title, "Book found");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const SAMPLE: &str = r#"{
        "totalItems": 1,
        "items": [{
            "volumeInfo": {
                "title": "サンプル書籍",
                "authors": ["著者名"],
                "description": "書籍の説明文",
                "publishedDate": "2023-01-01",
                "publisher": "出版社名",
                "pageCount": 300,
                "imageLinks": { "thumbnail": "https://example.com/image.jpg" },
                "industryIdentifiers": [{ "type": "ISBN_13", "identifier": "9784123456789" }]
            }
        }]
    }"#;

    fn isbn() -> Isbn {
        Isbn::from_normalized("9784123456789").unwrap()
    }

    #[test]
    fn first_volume_becomes_book_info() {
        let book = parse_volumes(&isbn(), SAMPLE).unwrap();
        assert_eq!(book.isbn.as_str(), "9784123456789");
        assert_eq!(book.title, "サンプル書籍");
        assert_eq!(book.authors, vec!["著者名".to_string()]);
        assert_eq!(book.description.as_deref(), Some("書籍の説明文"));
        assert_eq!(book.published_date.as_deref(), Some("2023-01-01"));
        assert_eq!(book.publisher.as_deref(), Some("出版社名"));
        assert_eq!(book.page_count, Some(300));
        assert_eq!(book.image_url.as_deref(), Some("https://example.com/image.jpg"));
    }

    #[test]
    fn zero_total_items_is_not_found() {
        let err = parse_volumes(&isbn(), r#"{"totalItems":0,"items":[]}"#).unwrap_err();
        assert!(matches!(err, BookscanError::LookupNotFound(ref s) if s == "9784123456789"));
    }

    #[test]
    fn missing_items_is_not_found() {
        let err = parse_volumes(&isbn(), r#"{"kind":"books#volumes","totalItems":0}"#).unwrap_err();
        assert!(matches!(err, BookscanError::LookupNotFound(_)));
    }

    #[test]
    fn sparse_volume_uses_empty_defaults() {
        let book = parse_volumes(&isbn(), r#"{"totalItems":1,"items":[{"volumeInfo":{}}]}"#)
            .unwrap();
        assert_eq!(book.title, "");
        assert!(book.authors.is_empty());
        assert!(book.image_url.is_none());
    }

    #[test]
    fn garbage_body_is_transport_error() {
        let err = parse_volumes(&isbn(), "<html>502</html>").unwrap_err();
        assert!(matches!(err, BookscanError::LookupTransport(_)));
    }

    #[test]
    fn request_url_carries_query_and_key() {
        let mut settings = LookupSettings::default();
        let client = GoogleBooksClient::new(&settings).unwrap();
        let url = client.request_url(&isbn());
        assert_eq!(url.host_str(), Some("www.googleapis.com"));
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("q".to_string(), "isbn:9784123456789".to_string())]);

        settings.api_key = Some("secret".into());
        let client = GoogleBooksClient::new(&settings).unwrap();
        let url = client.request_url(&isbn());
        assert!(url.query_pairs().any(|(k, v)| k == "key" && v == "secret"));
    }

    #[test]
    fn bad_endpoint_is_config_error() {
        let settings = LookupSettings {
            endpoint: "not a url".into(),
            ..LookupSettings::default()
        };
        assert!(matches!(
            GoogleBooksClient::new(&settings),
            Err(BookscanError::Config(_))
        ));
    }

    /// Serve one canned HTTP response on a local port and return its base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/books/v1/volumes")
    }

    fn client_for(endpoint: String) -> GoogleBooksClient {
        GoogleBooksClient::new(&LookupSettings {
            endpoint,
            timeout_secs: 5,
            api_key: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn lookup_over_http() {
        let endpoint = serve_once("200 OK", SAMPLE).await;
        let book = client_for(endpoint).lookup(&isbn()).await.unwrap();
        assert_eq!(book.title, "サンプル書籍");
    }

    #[tokio::test]
    async fn server_error_is_transport_error() {
        let endpoint = serve_once("503 Service Unavailable", "{}").await;
        let err = client_for(endpoint).lookup(&isbn()).await.unwrap_err();
        assert!(matches!(err, BookscanError::LookupTransport(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client_for(format!("http://{addr}/volumes"))
            .lookup(&isbn())
            .await
            .unwrap_err();
        assert_eq!(
            err.kind(),
            Some(bookscan_core::ErrorKind::LookupTransportError)
        );
    }
}

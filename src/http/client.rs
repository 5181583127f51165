//! HTTP record source.
//!
//! Fetches the flat record list the suggestion box searches, normally from a
//! running site's `/api/videos.json`.

use crate::search::{RecordSource, SourceError};
use crate::types::Record;

/// HTTP client for a site's record endpoint.
pub struct Client {
    url: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client for the given record URL.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim().to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Return the record URL (for display/logging).
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecordSource for Client {
    async fn fetch_records(&self) -> Result<Vec<Record>, SourceError> {
        if self.url.is_empty() {
            return Err(SourceError::Unavailable("no record source URL".to_string()));
        }
        tracing::debug!("Fetching records from {}", self.url);

        let resp = self.http.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    async fn spawn(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_client_trims_url() {
        let client = Client::new(" http://localhost:4321/api/videos.json\n");
        assert_eq!(client.url(), "http://localhost:4321/api/videos.json");
    }

    #[tokio::test]
    async fn test_empty_url_is_unavailable() {
        let err = Client::new("  ").fetch_records().await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)), "{err}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = Client::new("http://127.0.0.1:9/api/videos.json");
        let err = client.fetch_records().await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)), "{err}");
    }

    #[tokio::test]
    async fn test_fetch_from_site() {
        let dir = TempDir::new().unwrap();
        let videos = dir.path().join("src/content/videos");
        std::fs::create_dir_all(&videos).unwrap();
        std::fs::write(
            videos.join("neon-dreams.md"),
            "---\ntitle: Neon Dreams\nauthor: Jane\nthumbnail: /t.svg\nvideoFileName: neon.mp4\ncategory: VFX\ntags: []\npublishDate: 2024-03-01\ndescription: Glow\n---\n",
        )
        .unwrap();

        let base = spawn(super::super::app(dir.path().to_path_buf(), Config::default())).await;
        let client = Client::new(&format!("{base}/api/videos.json"));
        let records = client.fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Neon Dreams");
        assert_eq!(records[0].href(), "/videos/neon-dreams");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base = spawn(axum::Router::new()).await;
        let client = Client::new(&format!("{base}/api/videos.json"));
        match client.fetch_records().await {
            Err(SourceError::Status(status)) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        use axum::routing::get;
        let app = axum::Router::new().route("/api/videos.json", get(|| async { "{\"not\": \"a list\"}" }));
        let base = spawn(app).await;
        let client = Client::new(&format!("{base}/api/videos.json"));
        let err = client.fetch_records().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)), "{err}");
    }
}

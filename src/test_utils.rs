//! Test utilities and fixtures for lyrics-finder tests.
//!
//! Fixtures return plain values with sensible defaults; customize them with
//! struct update syntax.
//!
//! # Example
//!
//! ```ignore
//! use lyrics_finder::test_utils::{sample_result, sample_submission};
//!
//! let hit = sample_result(Source::Genius, "90475", "Yesterday", "The Beatles");
//! let submission = LyricsSubmission {
//!     album_name: String::new(),
//!     ..sample_submission()
//! };
//! ```

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::lyrics::{LyricsSubmission, SearchResult, Source, Views};

/// Creates a normalized search result with the given identity.
///
/// Everything else is left empty, the way a sparse provider record
/// normalizes.
pub fn sample_result(source: Source, id: &str, title: &str, artist: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: None,
        duration: None,
        image_url: None,
        views: Views::Unknown,
        source,
        plain_lyrics: None,
        synced_lyrics: None,
        instrumental: false,
    }
}

/// Creates a submission that passes validation.
pub fn sample_submission() -> LyricsSubmission {
    LyricsSubmission {
        track_name: "Yesterday".to_string(),
        artist_name: "The Beatles".to_string(),
        album_name: "Help!".to_string(),
        duration_seconds: 125.0,
        plain_lyrics: Some("Yesterday\nAll my troubles seemed so far away".to_string()),
        synced_lyrics: Some(
            "[00:00.63] Yesterday\n[00:04.12] All my troubles seemed so far away".to_string(),
        ),
    }
}

/// Local HTTP server answering every request with one canned response.
///
/// Requests are recorded (request line, headers and body) so tests can check
/// what the client sent.
///
/// ```ignore
/// let server = StubServer::start(404, r#"{"message":"nope"}"#).await;
/// let client = LrclibClient::with_base_url(server.base_url());
/// ```
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Stub server has no address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let response = format!(
            "HTTP/1.1 {} Stub\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                recorded.lock().expect("Stub request log poisoned").push(request);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("Stub request log poisoned").clone()
    }
}

/// Read one request: headers, then `Content-Length` bytes of body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return String::from_utf8_lossy(&data).into_owned(),
            Ok(n) => data.extend_from_slice(&chunk[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_submission_is_valid() {
        assert!(sample_submission().validate().is_ok());
    }

    #[tokio::test]
    async fn test_stub_server_serves_canned_response() {
        let server = StubServer::start(418, "teapot").await;

        let response = reqwest::Client::new()
            .post(format!("{}/brew", server.base_url()))
            .body("earl grey")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 418);
        assert_eq!(response.text().await.unwrap(), "teapot");
        let requests = server.requests();
        assert!(requests[0].starts_with("POST /brew "));
        assert!(requests[0].ends_with("earl grey"));
    }
}

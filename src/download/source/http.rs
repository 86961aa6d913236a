//! Streamed HTTP download used after a lookup service returned a media link.
//!
//! Plain GET with an idle timeout: each wait for the headers or the next
//! body chunk is bounded, the whole transfer is not. The body is written
//! sequentially in 1 KiB pieces. No resume, no retry, no integrity check;
//! a partial file is removed when the transfer fails.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Build the HTTP client shared by the adapters.
pub fn build_client() -> AppResult<Client> {
    let client = Client::builder()
        .user_agent("Mozilla/5.0 (compatible; vidgrab/0.3)")
        .connect_timeout(config::download::lookup_timeout())
        .build()?;
    Ok(client)
}

/// Download `url` into `dest`. Returns the number of bytes written.
pub async fn stream_to_file(client: &Client, url: &str, dest: &Path) -> AppResult<u64> {
    stream_with_idle_timeout(client, url, dest, config::download::stream_timeout()).await
}

async fn stream_with_idle_timeout(client: &Client, url: &str, dest: &Path, idle: Duration) -> AppResult<u64> {
    log::info!("Streaming {} -> {}", url, dest.display());

    let result = write_body(client, url, dest, idle).await;
    if result.is_err() {
        if let Err(e) = fs_err::tokio::remove_file(dest).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to remove partial file {}: {}", dest.display(), e);
            }
        }
    }
    result
}

fn stalled(idle: Duration) -> AppError {
    AppError::Download(format!("No data received for {}s", idle.as_secs_f32()))
}

async fn write_body(client: &Client, url: &str, dest: &Path, idle: Duration) -> AppResult<u64> {
    let response = tokio::time::timeout(idle, client.get(url).send())
        .await
        .map_err(|_| stalled(idle))??;

    if !response.status().is_success() {
        return Err(AppError::HttpStatus(response.status()));
    }

    let mut file = fs_err::tokio::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = tokio::time::timeout(idle, stream.next())
        .await
        .map_err(|_| stalled(idle))?
    {
        let chunk = chunk?;
        for piece in chunk.chunks(config::download::STREAM_CHUNK_SIZE) {
            file.write_all(piece).await?;
        }
        written += chunk.len() as u64;
    }
    file.flush().await?;

    log::info!(
        "✅ HTTP download complete: {} ({:.2} MB)",
        dest.display(),
        written as f64 / (1024.0 * 1024.0)
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_stream_writes_whole_body() {
        let server = MockServer::start().await;
        let body = vec![7u8; 4096 + 17];
        Mock::given(method("GET"))
            .and(path("/video.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.mp4");
        let client = build_client().unwrap();

        let written = stream_to_file(&client, &format!("{}/video.mp4", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn test_stream_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.mp4");
        let client = build_client().unwrap();

        let result = stream_to_file(&client, &format!("{}/missing.mp4", server.uri()), &dest).await;

        assert!(matches!(result, Err(AppError::HttpStatus(s)) if s.as_u16() == 404));
        assert!(!dest.exists());
    }

    /// Serves one response whose body is written one byte at a time with `gap` between bytes.
    async fn drip_server(body: &'static [u8], gap: Duration) -> String {
        use tokio::io::AsyncReadExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: video/mp4\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );
            if socket.write_all(head.as_bytes()).await.is_err() {
                return;
            }
            for byte in body {
                // The client may hang up mid-body.
                if socket.write_all(&[*byte]).await.is_err() || socket.flush().await.is_err() {
                    return;
                }
                tokio::time::sleep(gap).await;
            }
        });
        format!("http://{}/clip.mp4", addr)
    }

    #[tokio::test]
    async fn test_slow_transfer_longer_than_idle_timeout_completes() {
        let url = drip_server(b"abcdefgh", Duration::from_millis(250)).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("slow.mp4");
        let client = build_client().unwrap();

        // 8 bytes at 250 ms each take ~2 s in total, well past the 1 s idle limit.
        let written = stream_with_idle_timeout(&client, &url, &dest, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(written, 8);
        assert_eq!(std::fs::read(&dest).unwrap(), b"abcdefgh");
    }

    #[tokio::test]
    async fn test_stalled_transfer_fails_and_removes_partial_file() {
        let url = drip_server(b"ab", Duration::from_secs(3)).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("stalled.mp4");
        let client = build_client().unwrap();

        let result = stream_with_idle_timeout(&client, &url, &dest, Duration::from_millis(500)).await;

        assert!(matches!(result, Err(AppError::Download(_))));
        assert!(!dest.exists());
    }
}

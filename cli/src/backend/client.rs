use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use vitals_protocol::{join_url, DailyAggregate, RECEIVE_PATH};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to encode aggregate: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Backend rejected upload with HTTP {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Upload task failed: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Destination for a finished daily aggregate.
#[async_trait]
pub trait AggregateSink: Send + Sync {
    async fn submit(&self, aggregate: &DailyAggregate) -> Result<()>;
}

#[async_trait]
impl<T: AggregateSink + ?Sized> AggregateSink for std::sync::Arc<T> {
    async fn submit(&self, aggregate: &DailyAggregate) -> Result<()> {
        self.as_ref().submit(aggregate).await
    }
}

/// Blocking HTTP client that POSTs aggregates to the backend receive path.
#[derive(Clone)]
pub struct BackendClient {
    agent: ureq::Agent,
    url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            url: join_url(base_url, RECEIVE_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post_json(&self, body: &[u8]) -> Result<()> {
        match self
            .agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .send(body)
        {
            Ok(response) => {
                debug!(url = %self.url, status = response.status().as_u16(), "Upload accepted");
                Ok(())
            }
            Err(ureq::Error::StatusCode(code)) => Err(TransportError::Status(code)),
            Err(e) => Err(TransportError::Request(e.to_string())),
        }
    }
}

#[async_trait]
impl AggregateSink for BackendClient {
    async fn submit(&self, aggregate: &DailyAggregate) -> Result<()> {
        let body = serde_json::to_vec(aggregate)?;
        let client = self.clone();

        tokio::task::spawn_blocking(move || client.post_json(&body))
            .await
            .map_err(|e| TransportError::Join(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use vitals_protocol::HeartRatePoint;

    use super::*;

    /// Accepts one connection, records the raw request and answers with `status_line`.
    fn one_shot_server(status_line: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            );
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&raw).to_string()).unwrap();
        });

        (base_url, rx)
    }

    fn sample() -> DailyAggregate {
        DailyAggregate {
            step_counts: vec![500, 800],
            heart_rate_samples: vec![HeartRatePoint::missing()],
            total_calories_kcal: 150.5,
            ..Default::default()
        }
    }

    #[test]
    fn url_points_at_receive_path() {
        let client = BackendClient::new("http://localhost:8080/", Duration::from_secs(1));
        assert_eq!(client.url(), "http://localhost:8080/hh/receive");
    }

    #[tokio::test]
    async fn submit_posts_json_body() {
        let (base_url, rx) = one_shot_server("HTTP/1.1 200 OK");
        let client = BackendClient::new(&base_url, Duration::from_secs(5));

        client.submit(&sample()).await.unwrap();

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /hh/receive HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent = DailyAggregate::from_json(body).unwrap();
        assert_eq!(sent, sample());
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let (base_url, _rx) = one_shot_server("HTTP/1.1 500 Internal Server Error");
        let client = BackendClient::new(&base_url, Duration::from_secs(5));

        let err = client.submit(&sample()).await.unwrap_err();

        assert!(matches!(err, TransportError::Status(500)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = BackendClient::new(&base_url, Duration::from_secs(2));

        let err = client.submit(&sample()).await.unwrap_err();

        assert!(matches!(err, TransportError::Request(_)));
    }
}

//! Slack search client.
//!
//! Uses the `search.messages` Web API with a bearer token. Search failures are
//! logged and treated as "no messages".

use chrono::{Days, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{NippoError, Result};
use crate::models::{Message, MessageSummary};

const SLACK_SEARCH_URL: &str = "https://slack.com/api/search.messages";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    ok: bool,
    error: Option<String>,
    messages: Option<SearchMatches>,
}

#[derive(Debug, Deserialize)]
struct SearchMatches {
    #[serde(default)]
    matches: Vec<SearchMatch>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    #[serde(default)]
    text: String,
    #[serde(default)]
    channel: SearchChannel,
}

#[derive(Debug, Default, Deserialize)]
struct SearchChannel {
    #[serde(default)]
    name: String,
}

/// Slack collector searching one user's messages around a day
pub struct SlackCollector {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl SlackCollector {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(SLACK_SEARCH_URL, REQUEST_TIMEOUT)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Collect messages sent by `username` between `day - 1` and `day + 1`
    ///
    /// Missing credentials are an error. Any failure talking to Slack is logged
    /// and yields an empty summary.
    pub fn fetch_messages(
        &self,
        username: &str,
        day: NaiveDate,
        token: &str,
        max_results: usize,
    ) -> Result<MessageSummary> {
        if token.trim().is_empty() {
            return Err(NippoError::MissingCredential { key: "slack.token" });
        }
        if username.trim().is_empty() {
            return Err(NippoError::MissingCredential {
                key: "slack.username",
            });
        }

        match self.search(&search_query(username, day), token, max_results) {
            Ok(mut messages) => {
                messages.truncate(max_results);
                tracing::debug!(count = messages.len(), "collected slack messages");
                Ok(MessageSummary::from_messages(&messages))
            }
            Err(reason) => {
                tracing::warn!(%reason, "Slack search failed; continuing without messages");
                Ok(MessageSummary::default())
            }
        }
    }

    fn search(
        &self,
        query: &str,
        token: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<Message>, String> {
        let resp = self
            .client
            .get(&self.endpoint)
            .bearer_auth(token)
            .query(&[
                ("query", query.to_string()),
                ("sort", "score".to_string()),
                ("sort_dir", "desc".to_string()),
                ("count", max_results.to_string()),
            ])
            .send()
            .map_err(|e| format!("Slack API request failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("Slack API error {}", resp.status()));
        }

        let body = resp
            .text()
            .map_err(|e| format!("Failed to read Slack response: {}", e))?;

        parse_response(&body)
    }
}

/// Search modifiers for `username` around `day`
///
/// `after:` and `before:` are exclusive, so this covers `day - 1` through `day`.
fn search_query(username: &str, day: NaiveDate) -> String {
    let after = day.checked_sub_days(Days::new(2)).unwrap_or(NaiveDate::MIN);
    let before = day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    format!(
        "from:@{} after:{} before:{}",
        username.trim_start_matches('@'),
        after.format("%Y-%m-%d"),
        before.format("%Y-%m-%d")
    )
}

fn parse_response(body: &str) -> std::result::Result<Vec<Message>, String> {
    let resp: SearchResponse =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse Slack response: {}", e))?;

    if !resp.ok {
        return Err(format!(
            "Slack API returned error: {}",
            resp.error.unwrap_or_else(|| "unknown".to_string())
        ));
    }

    Ok(resp
        .messages
        .map(|m| m.matches)
        .unwrap_or_default()
        .into_iter()
        .map(|m| Message {
            text: m.text,
            channel: m.channel.name,
        })
        .collect())
}

/// One-shot HTTP server standing in for the Slack API
#[cfg(test)]
pub(crate) mod stub {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer a single request with `body` as JSON
    ///
    /// Returns the endpoint URL and a handle yielding the raw request head.
    pub fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!(
            "http://{}/api/search.messages",
            listener.local_addr().unwrap()
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buffer).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..n]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (endpoint, handle)
    }

    pub const THREE_MATCHES: &str = r#"{
        "ok": true,
        "messages": {
            "total": 3,
            "matches": [
                {"text": "shipped v2", "channel": {"id": "C1", "name": "release"}},
                {"text": "lunch?", "channel": {"id": "C2", "name": "random"}},
                {"text": "standup notes", "channel": {"id": "C3", "name": "team"}}
            ]
        }
    }"#;
}

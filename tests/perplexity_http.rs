// tests/perplexity_http.rs
//! Drives `PerplexityClient` against a one-shot local HTTP stub.

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use discussion_scout::config::SearchConfig;
use discussion_scout::{AnswerClient, Citation, PerplexityClient, SearchError};

/// What the stub saw: the raw header block and the decoded JSON body.
struct Captured {
    head: String,
    body: Value,
}

/// Accept exactly one connection, answer it with `status` and `reply`, hand back the request.
async fn serve_once(status: u16, reply: String) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/chat/completions", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let head_end = loop {
            let n = sock.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(i) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break i + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let len = head
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length")
                    .then(|| v.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buf.len() < head_end + len {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = serde_json::from_slice(&buf[head_end..head_end + len]).unwrap_or(Value::Null);

        let response = format!(
            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        );
        sock.write_all(response.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        Captured { head, body }
    });

    (url, handle)
}

fn client_for(url: String) -> PerplexityClient {
    let cfg = SearchConfig {
        api_url: url,
        api_key: "test-key".into(),
        timeout_secs: 5,
        ..Default::default()
    };
    PerplexityClient::from_config(&cfg).expect("client")
}

#[tokio::test]
async fn server_error_is_upstream_with_truncated_body() {
    let (url, stub) = serve_once(500, "e".repeat(400)).await;
    let err = client_for(url).answer("video SEO").await.unwrap_err();
    stub.await.unwrap();

    match err {
        SearchError::Upstream { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body.chars().count(), 300);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_a_decode_error() {
    let (url, stub) = serve_once(200, json!({ "choices": [] }).to_string()).await;
    let err = client_for(url).answer("q").await.unwrap_err();
    stub.await.unwrap();
    assert!(matches!(err, SearchError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn success_maps_content_and_citations() {
    let reply = json!({
        "choices": [{ "message": { "role": "assistant", "content": "Creators are leaving YouTube" } }],
        "citations": ["https://ignored.example/1"],
        "search_results": [
            { "url": "https://www.reddit.com/r/NewTubers/1", "title": "Leaving YouTube", "date": "2025-06-01" },
            { "title": "entry without a url" }
        ]
    });
    let (url, stub) = serve_once(200, reply.to_string()).await;
    let payload = client_for(url).answer("YouTube alternatives").await.unwrap();
    let seen = stub.await.unwrap();

    assert_eq!(payload.content, "Creators are leaving YouTube");
    assert_eq!(
        payload.citations,
        vec![Citation {
            url: "https://www.reddit.com/r/NewTubers/1".into(),
            title: Some("Leaving YouTube".into()),
            snippet: None,
            date: Some("2025-06-01".into()),
        }]
    );

    assert!(seen.head.starts_with("POST /chat/completions"), "{}", seen.head);
    assert!(seen
        .head
        .to_ascii_lowercase()
        .contains("authorization: bearer test-key"));
    assert_eq!(seen.body["model"], "sonar-pro");
    assert_eq!(seen.body["max_tokens"], 2000);
    let temperature = seen.body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.3).abs() < 1e-6, "{temperature}");

    let messages = seen.body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert!(messages[1]["content"]
        .as_str()
        .unwrap()
        .contains("discussions about: YouTube alternatives."));
}

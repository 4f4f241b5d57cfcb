use std::net::SocketAddr;

use emotion_journal::classifier::{ClassifierError, EmotionClassifier, HttpClassifier};
use emotion_journal::config::JournalConfig;
use emotion_journal::models::Emotion;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Accepts one connection, captures the raw request, answers with a canned
/// HTTP/1.1 response. No mock-server crate needed for a single exchange.
async fn serve_once(status_line: &str, body: &str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request_complete(&request) {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (addr, handle)
}

fn request_complete(request: &[u8]) -> bool {
    let Some(split) = request
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
    else {
        return false;
    };
    let headers = String::from_utf8_lossy(&request[..split]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    request.len() >= split + 4 + content_length
}

fn classifier_for(addr: SocketAddr) -> HttpClassifier {
    // Trailing slash on purpose; the config must normalize it away.
    let config = JournalConfig::new(format!("http://{addr}/")).unwrap();
    HttpClassifier::new(&config)
}

#[tokio::test]
async fn posts_to_analyze_and_parses_the_result() {
    init_logging();
    let (addr, server) = serve_once(
        "200 OK",
        r#"{"emotion":"Joy","keywords":["walk","sun"],"entities":[{"text":"Lisbon","label":"GPE"}]}"#,
    )
    .await;

    let classifier = classifier_for(addr);
    let result = classifier.analyze("a walk in the sun").await.unwrap();

    assert_eq!(result.emotion, Emotion::Joy);
    assert_eq!(result.keywords, vec!["walk", "sun"]);
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[0].text, "Lisbon");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /analyze HTTP/1.1"));
    assert!(request.contains(r#"{"text":"a walk in the sun"}"#));
}

#[tokio::test]
async fn entities_are_optional_in_the_response() {
    init_logging();
    let (addr, server) = serve_once("200 OK", r#"{"emotion":"Fear","keywords":[]}"#).await;

    let classifier = classifier_for(addr);
    let result = classifier.analyze("what was that noise").await.unwrap();

    assert_eq!(result.emotion, Emotion::Other("Fear".into()));
    assert!(result.keywords.is_empty());
    assert!(result.entities.is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_a_classification_failure() {
    init_logging();
    let (addr, server) = serve_once("503 Service Unavailable", "model is loading").await;

    let classifier = classifier_for(addr);
    let err = classifier.analyze("anything").await.unwrap_err();

    match err {
        ClassifierError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model is loading");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    server.await.unwrap();
}

use orbis_core::country::CountryDirectory;
use orbis_core::error::OrbisError;
use orbis_infrastructure::RestCountriesClient;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Handler = Arc<dyn Fn(&str) -> (u16, String) + Send + Sync>;

/// Minimal HTTP/1.1 server answering every request through `handler`.
struct FakeDirectory {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeDirectory {
    async fn start(handler: impl Fn(&str) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let seen = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let handler = handler.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&buf);
                    let target = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    seen.lock().unwrap().push(target.clone());

                    let (status, body) = handler(&target);
                    let response = format!(
                        "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn client(&self) -> RestCountriesClient {
        RestCountriesClient::new(&self.base_url).unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

const GERMANY: &str = r#"{"cca3":"DEU","name":{"common":"Germany","official":"Federal Republic of Germany"},"region":"Europe","population":83240525,"borders":["AUT","BEL"]}"#;
const USA: &str = r#"{"cca3":"USA","name":{"common":"United States","official":"United States of America"},"region":"Americas","population":329484123}"#;

#[tokio::test]
async fn test_fetch_all_returns_countries() {
    let server = FakeDirectory::start(|_| (200, format!("[{GERMANY},{USA}]"))).await;

    let countries = server.client().fetch_all().await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[1].name.common, "United States");
    assert_eq!(server.requests(), vec!["/all"]);
}

#[tokio::test]
async fn test_fetch_by_name_encodes_the_name() {
    let server = FakeDirectory::start(|_| (200, format!("[{USA}]"))).await;

    let countries = server.client().fetch_by_name("United States").await.unwrap();

    assert_eq!(countries[0].cca3, "USA");
    assert_eq!(server.requests(), vec!["/name/United%20States"]);
}

#[tokio::test]
async fn test_fetch_by_name_not_found_is_empty() {
    let server =
        FakeDirectory::start(|_| (404, r#"{"status":404,"message":"Not Found"}"#.to_string())).await;

    let countries = server.client().fetch_by_name("Germany").await.unwrap();

    assert!(countries.is_empty());
}

#[tokio::test]
async fn test_fetch_by_name_server_error_fails() {
    let server = FakeDirectory::start(|_| (500, r#"{"message":"Server error"}"#.to_string())).await;

    let err = server.client().fetch_by_name("ErrorTest").await.unwrap_err();

    assert!(err.is_fetch());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_fetch_by_code_server_error_is_fetch_failure() {
    let server = FakeDirectory::start(|_| (500, String::new())).await;

    let err = server.client().fetch_by_code("ZZZ").await.unwrap_err();

    assert_eq!(
        err,
        OrbisError::Fetch {
            status: Some(500),
            message: "Failed to fetch country details".to_string(),
        }
    );
    assert_eq!(server.requests(), vec!["/alpha/ZZZ"]);
}

#[tokio::test]
async fn test_fetch_by_code_not_found_is_failure() {
    let server = FakeDirectory::start(|_| (404, String::new())).await;

    let err = server.client().fetch_by_code("ZZZ").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_fetch_by_code_single_element() {
    let server = FakeDirectory::start(|_| (200, format!("[{GERMANY}]"))).await;

    let countries = server.client().fetch_by_code("DEU").await.unwrap();

    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].borders, vec!["AUT", "BEL"]);
}

#[tokio::test]
async fn test_fetch_by_region() {
    let server = FakeDirectory::start(|_| (200, format!("[{GERMANY}]"))).await;

    let countries = server.client().fetch_by_region("Europe").await.unwrap();

    assert!(countries.iter().all(|c| c.region == "Europe"));
    assert_eq!(server.requests(), vec!["/region/Europe"]);
}

#[tokio::test]
async fn test_fetch_by_codes_sends_csv() {
    let server = FakeDirectory::start(|_| (200, format!("[{GERMANY},{USA}]"))).await;

    let codes = vec!["DEU".to_string(), "USA".to_string()];
    let countries = server.client().fetch_by_codes(&codes).await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(server.requests(), vec!["/alpha?codes=DEU%2CUSA"]);
}

#[tokio::test]
async fn test_fetch_by_codes_empty_input_skips_network() {
    let server = FakeDirectory::start(|_| (500, String::new())).await;

    let countries = server.client().fetch_by_codes(&[]).await.unwrap();

    assert!(countries.is_empty());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_fields_projection_is_sent() {
    let server = FakeDirectory::start(|_| (200, "[]".to_string())).await;
    let client = server.client().with_fields(["name", "cca3"]);

    client.fetch_all().await.unwrap();

    assert_eq!(server.requests(), vec!["/all?fields=name%2Ccca3"]);
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = FakeDirectory::start(|_| (200, "<html>oops</html>".to_string())).await;

    let err = server.client().fetch_all().await.unwrap_err();

    assert!(err.is_serialization());
}

#[tokio::test]
async fn test_connection_refused_is_fetch_failure_without_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RestCountriesClient::new(&format!("http://{addr}")).unwrap();
    let err = client.fetch_by_code("DEU").await.unwrap_err();

    // Transport detail goes to the log, not into the user-facing message.
    assert_eq!(
        err,
        OrbisError::Fetch {
            status: None,
            message: "Failed to fetch country details".to_string(),
        }
    );
}

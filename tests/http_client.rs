//! Integration tests for the reqwest-backed indexer client against a
//! loopback HTTP responder.

use daoboard::api::client::AstroDaoClient;
use daoboard::api::{ApiError, DaoApi, ProposalFilter, ProposalQuery, StatKind};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const DAO: &str = "brave-new-games.sputnik-dao.near";

/// Serve one request with `status` and `body`; yields the request line.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request = String::from_utf8_lossy(&buf);
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    (format!("http://{}/api/v1", addr), rx)
}

fn client(base_url: &str, timeout: Duration) -> AstroDaoClient {
    AstroDaoClient::new(base_url, DAO, timeout).unwrap()
}

#[tokio::test]
async fn test_proposals_request_and_decode() {
    let body = r#"{
        "data": [{
            "id": "brave-new-games.sputnik-dao.near-3",
            "proposalId": 3,
            "daoId": "brave-new-games.sputnik-dao.near",
            "type": "Transfer",
            "title": "Prize pool",
            "description": "",
            "proposer": "alice.near",
            "transactionHash": "abc",
            "status": "InProgress",
            "votePeriodEnd": "1700000000000000000",
            "votes": {"bob.near": "Approve"}
        }],
        "total": 45
    }"#;
    let (base, request) = serve_once("200 OK", body).await;

    let resp = client(&base, Duration::from_secs(5))
        .proposals(&ProposalQuery::filtered(ProposalFilter::Active, 20, 20))
        .await
        .unwrap();

    assert_eq!(resp.total, 45);
    assert_eq!(resp.data[0].proposal_id, 3);

    let line = request.await.unwrap();
    assert!(line.starts_with("GET /api/v1/proposals?"));
    assert!(line.contains("dao=brave-new-games.sputnik-dao.near"));
    assert!(line.contains("active=true"));
    assert!(line.contains("limit=20"));
    assert!(line.contains("offset=20"));
    assert!(line.contains("orderBy=createdAt"));
    assert!(line.contains("order=DESC"));
}

#[tokio::test]
async fn test_stats_path() {
    let (base, request) = serve_once(
        "200 OK",
        r#"[{"timestamp": "2023-01-01T00:00:00.000Z", "value": "12"}]"#,
    )
    .await;

    let stats = client(&base, Duration::from_secs(5))
        .stats(StatKind::Bounties)
        .await
        .unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].value, 12.0);
    assert!(request
        .await
        .unwrap()
        .starts_with("GET /api/v1/stats/dao/brave-new-games.sputnik-dao.near/bounties"));
}

#[tokio::test]
async fn test_proposal_history_decodes() {
    let (base, request) = serve_once(
        "200 OK",
        r#"[
            {"timestamp": 1672617600000, "total": 41, "active": 2},
            {"timestamp": 1672531200000, "total": 40, "active": 3}
        ]"#,
    )
    .await;

    let http = client(&base, Duration::from_secs(5));
    let history = daoboard::stats::fetch_proposal_series(&http).await;

    assert!(request
        .await
        .unwrap()
        .starts_with("GET /api/v1/stats/dao/brave-new-games.sputnik-dao.near/proposals"));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].total, 40);
    assert_eq!(history[0].active, 3);
    assert_eq!(history[1].total_point().value, 41.0);
}

#[tokio::test]
async fn test_http_error_status() {
    let (base, _request) = serve_once("503 Service Unavailable", "{}").await;

    let err = client(&base, Duration::from_secs(5))
        .dao_state()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 503, .. }));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (base, _request) = serve_once("200 OK", "not json").await;

    let err = client(&base, Duration::from_secs(5))
        .dao_state()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    // Accepts the connection but never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let err = client(&format!("http://{}/api/v1", addr), Duration::from_millis(200))
        .proposals(&ProposalQuery::filtered(ProposalFilter::Active, 0, 20))
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Timeout(Duration::from_millis(200)));
    assert!(err.is_network());
}

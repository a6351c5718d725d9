use common::api::{ApiError, GoldsaveClient};
use common::types::{PriceTrend, TransactionKind};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GoldsaveClient {
    GoldsaveClient::new(&server.uri(), Duration::from_secs(5))
}

#[tokio::test]
async fn account_fetch_parses_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(bearer_token("tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "goldBalanceGrams": 12.5,
            "cashBalanceLKR": 25000,
            "starCount": 2,
            "transactions": [
                {
                    "_id": "t-1",
                    "date": "2026-03-01T10:00:00Z",
                    "type": "deposit",
                    "amountLKR": 5000,
                    "status": "completed"
                }
            ]
        })))
        .mount(&server)
        .await;

    let account = client_for(&server).fetch_account("tok-123").await.unwrap();
    assert_eq!(account.star_count, 2);
    assert_eq!(account.transactions.len(), 1);
    assert_eq!(
        account.transactions[0].kind(),
        Some(TransactionKind::Deposit)
    );
}

#[tokio::test]
async fn account_401_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_account("expired")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn account_500_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_account("tok").await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "db down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn market_fetch_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/market/gold-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latestPricePerGram": 31250.5,
            "priceChangePercent": -0.4,
            "trend": "down"
        })))
        .mount(&server)
        .await;

    let market = client_for(&server).fetch_market_summary().await.unwrap();
    assert_eq!(market.trend, PriceTrend::Down);
    assert!(market.price_change_percent.is_sign_negative());
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/market/gold-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_market_summary()
        .await
        .unwrap_err();
    assert_eq!(err.kind_str(), "decode");
}

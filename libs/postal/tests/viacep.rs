//! ViaCEP client tests against a mock server.

use std::time::Duration;

use barblab_ident::Cep;
use barblab_postal::{
    lookup_or_not_found, LookupError, LookupOutcome, PostalLookup, ViaCepClient,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, timeout: Duration) -> ViaCepClient {
    ViaCepClient::new(&server.uri(), timeout).expect("client should build")
}

#[tokio::test]
async fn test_lookup_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/01310100/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, Duration::from_secs(2));
    let outcome = lookup_or_not_found(&client, "01310-100").await;

    let address = outcome.address().expect("address should be found");
    assert_eq!(
        address.full_line(),
        "Avenida Paulista - Bela Vista - São Paulo/SP"
    );
}

#[tokio::test]
async fn test_lookup_error_marker_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": true })))
        .mount(&server)
        .await;

    let client = client(&server, Duration::from_secs(2));
    let cep = Cep::parse("99999-999").unwrap();
    let outcome = client.lookup(&cep).await.unwrap();
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn test_server_error_collapses_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client(&server, Duration::from_secs(2));
    let cep = Cep::parse("01310100").unwrap();

    let err = client.lookup(&cep).await.unwrap_err();
    assert!(matches!(err, LookupError::Status(503)));

    assert_eq!(
        lookup_or_not_found(&client, "01310100").await,
        LookupOutcome::NotFound
    );
}

#[tokio::test]
async fn test_timeout_collapses_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "logradouro": "Rua Lenta" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client(&server, Duration::from_millis(50));
    let cep = Cep::parse("01310100").unwrap();

    let err = client.lookup(&cep).await.unwrap_err();
    assert!(err.is_timeout());

    assert_eq!(
        lookup_or_not_found(&client, "01310100").await,
        LookupOutcome::NotFound
    );
}

#[tokio::test]
async fn test_malformed_cep_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, Duration::from_secs(2));
    assert_eq!(
        lookup_or_not_found(&client, "0131-01").await,
        LookupOutcome::NotFound
    );
    assert_eq!(
        lookup_or_not_found(&client, "013101000").await,
        LookupOutcome::NotFound
    );
}

#[tokio::test]
async fn test_unreachable_service_is_not_found() {
    // Nothing listens on the discard port.
    let client = ViaCepClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    assert_eq!(
        lookup_or_not_found(&client, "01310100").await,
        LookupOutcome::NotFound
    );
}

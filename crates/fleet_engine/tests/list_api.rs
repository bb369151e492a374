use std::time::Duration;

use fleet_core::{map_filters, FetchRequest, FilterField, FilterSet, ScopeContext};
use fleet_engine::{FailureKind, FetchSettings, ListApi, ReqwestListApi};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: server.uri(),
        list_path: "/api/vehicles".to_string(),
        ..FetchSettings::default()
    }
}

fn request(page: u32, limit: u32, filters: FilterSet) -> FetchRequest {
    FetchRequest {
        page,
        limit,
        filters: map_filters(&filters, &ScopeContext::tenant("acme")),
    }
}

#[tokio::test]
async fn fetch_sends_paging_and_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .and(query_param("info_brand", "Toyota"))
        .and(query_param("info_availabilityStatus", "available"))
        .and(query_param("company_id", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1}, {"id": 2}],
            "meta": {"current_page": 2, "per_page": 25, "last_page": 3, "total": 52}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReqwestListApi::new(settings_for(&server)).expect("client");
    let filters = FilterSet::new()
        .with(FilterField::Brand, "Toyota")
        .with(FilterField::Availability, "yes");

    let response = api.fetch(&request(2, 25, filters)).await.expect("fetch ok");
    assert_eq!(response.data.len(), 2);
    let meta = response.meta.expect("meta");
    assert_eq!(meta.current_page, 2);
    assert_eq!(meta.per_page, Some(25));
    assert_eq!(meta.last_page, Some(3));
    assert_eq!(meta.total, Some(52));
}

#[tokio::test]
async fn missing_meta_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let api = ReqwestListApi::new(settings_for(&server)).expect("client");
    let response = api
        .fetch(&request(1, 10, FilterSet::new()))
        .await
        .expect("fetch ok");
    assert!(response.data.is_empty());
    assert!(response.meta.is_none());
}

#[tokio::test]
async fn backend_error_body_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "unknown company",
            "code": "E_COMPANY"
        })))
        .mount(&server)
        .await;

    let api = ReqwestListApi::new(settings_for(&server)).expect("client");
    let err = api
        .fetch(&request(1, 10, FilterSet::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.message, "unknown company");
    assert_eq!(err.code.as_deref(), Some("E_COMPANY"));
}

#[tokio::test]
async fn plain_http_error_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = ReqwestListApi::new(settings_for(&server)).expect("client");
    let err = api
        .fetch(&request(1, 10, FilterSet::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.code.as_deref(), Some("http_503"));

    let info = fleet_core::ErrorInfo::from(err);
    assert_eq!(info.message, "503 Service Unavailable");
    assert_eq!(info.code.as_deref(), Some("http_503"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = ReqwestListApi::new(settings_for(&server)).expect("client");
    let err = api
        .fetch(&request(1, 10, FilterSet::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"data": []})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let api = ReqwestListApi::new(settings).expect("client");
    let err = api
        .fetch(&request(1, 10, FilterSet::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let api = ReqwestListApi::new(settings).expect("client");
    let err = api
        .fetch(&request(1, 10, FilterSet::new()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[test]
fn request_url_orders_filters_by_key() {
    let api = ReqwestListApi::new(FetchSettings {
        base_url: "http://fleet.test/".to_string(),
        list_path: "api/vehicles".to_string(),
        ..FetchSettings::default()
    })
    .expect("client");
    let filters = FilterSet::from_pairs([("seats", "5"), ("brand", "x")]);

    let url = api.request_url(&request(1, 10, filters)).expect("url");
    assert_eq!(
        url.as_str(),
        "http://fleet.test/api/vehicles?page=1&limit=10&company_id=acme&info_brand=x&info_seats=5"
    );
}

#[test]
fn invalid_base_url_is_reported() {
    let api = ReqwestListApi::new(FetchSettings {
        base_url: "not a url".to_string(),
        ..FetchSettings::default()
    })
    .expect("client");
    let err = api
        .request_url(&request(1, 10, FilterSet::new()))
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

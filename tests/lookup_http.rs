//! End-to-end lookups over HTTP against a mock platform.

use std::collections::HashMap;

use route_lookup::config::{ApiConfig, AppStrategy};
use route_lookup::lookup::{Discard, LookupError, LookupOutcome, NotBoundReason, RetargetOutcome, RouteLookup};
use route_lookup::platform::client::{eq_filter, in_filter, ListQuery};
use route_lookup::platform::{ApiError, Domain, HttpConnection, PlatformClient, TargetRecord, TransportError};
use route_lookup::resolver::candidate_domains;

mod common;

fn list(endpoint: &str, filter: Option<String>) -> String {
    let mut query = ListQuery::new();
    if let Some(filter) = filter {
        query = query.filter(filter);
    }
    query.results_per_page(100).to_path(endpoint)
}

fn ok(body: &str) -> (u16, String) {
    (200, body.to_string())
}

/// Platform with domain `example.com` (D), route `bar` (r-bar) in space S1
/// bound to `svc1`, exposed through both app strategies.
fn example_platform(hostname: &str) -> HashMap<String, (u16, String)> {
    let domains = in_filter("name", &candidate_domains(hostname));
    let mut routes = HashMap::new();
    routes.insert(
        list("/v2/private_domains", Some(domains.clone())),
        ok(r#"{ "next_url": null, "resources": [] }"#),
    );
    routes.insert(
        list("/v2/shared_domains", Some(domains)),
        ok(r#"{ "next_url": null, "resources": [
            { "metadata": { "guid": "D" }, "entity": { "name": "example.com" } }
        ] }"#),
    );
    routes.insert(
        list("/v2/routes", Some(eq_filter("domain_guid", "D"))),
        ok(r#"{ "next_url": null, "resources": [
            { "metadata": { "guid": "r-bar" }, "entity": { "host": "bar", "domain_guid": "D", "space_guid": "S1" } },
            { "metadata": { "guid": "r-baz" }, "entity": { "host": "baz", "domain_guid": "D", "space_guid": "S1" } }
        ] }"#),
    );
    routes.insert(
        list("/v2/routes/r-bar/apps", None),
        ok(r#"{ "next_url": null, "resources": [
            { "metadata": { "guid": "a-1" }, "entity": { "name": "svc1", "space_guid": "S1" } }
        ] }"#),
    );
    routes.insert(
        list("/v2/routes/r-bar/route_mappings", None),
        ok(r#"{ "next_url": null, "resources": [
            { "metadata": { "guid": "m-1" }, "entity": { "app_guid": "a-1", "route_guid": "r-bar" } }
        ] }"#),
    );
    routes.insert(
        "/v2/apps/a-1/summary".to_string(),
        ok(r#"{ "guid": "a-1", "name": "svc1", "space_guid": "S1", "instances": 1 }"#),
    );
    routes.insert(
        "/v2/spaces/S1".to_string(),
        ok(r#"{ "metadata": { "guid": "S1" }, "entity": { "name": "dev", "organization_guid": "O1" } }"#),
    );
    routes.insert(
        "/v2/organizations/O1".to_string(),
        ok(r#"{ "metadata": { "guid": "O1" }, "entity": { "name": "acme" } }"#),
    );
    routes
}

fn api_config(endpoint: String, token_env: &str, target_file: &str) -> ApiConfig {
    ApiConfig {
        endpoint,
        token_env: token_env.to_string(),
        timeout_secs: 5,
        target_file: target_file.to_string(),
    }
}

fn lookup_for(config: &ApiConfig, strategy: AppStrategy) -> RouteLookup {
    let conn = HttpConnection::new(config).unwrap();
    RouteLookup::new(PlatformClient::new(conn, 100), strategy)
}

#[tokio::test]
async fn test_bar_example_com_resolves_to_svc1() {
    let platform = common::start_mock_platform(example_platform("bar.example.com")).await;
    std::env::set_var("ROUTE_LOOKUP_IT_TOKEN_E2E", "bearer test-token");
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_E2E", "unused.toml");

    let outcome = lookup_for(&config, AppStrategy::Direct)
        .run("bar.example.com", false, &mut Discard)
        .await
        .unwrap();

    let LookupOutcome::Bound(report) = outcome else {
        panic!("expected bound outcome");
    };
    assert_eq!(report.domain.name, "example.com");
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].space.guid, "S1");
    let bindings: Vec<_> = report.bindings().collect();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].route.guid, "r-bar");
    assert_eq!(bindings[0].app.as_ref().unwrap().name, "svc1");

    let requests = platform.requests();
    assert!(requests
        .iter()
        .all(|r| r.authorization.as_deref() == Some("Bearer test-token")));
}

#[tokio::test]
async fn test_mapping_strategy_matches_direct() {
    let platform = common::start_mock_platform(example_platform("bar.example.com")).await;
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_UNSET", "unused.toml");

    let outcome = lookup_for(&config, AppStrategy::Mapping)
        .run("bar.example.com", false, &mut Discard)
        .await
        .unwrap();

    let LookupOutcome::Bound(report) = outcome else {
        panic!("expected bound outcome");
    };
    assert_eq!(report.first_app().unwrap().name, "svc1");
    assert_eq!(platform.hits("/v2/apps/a-1/summary"), 1);
    assert_eq!(platform.hits(&list("/v2/routes/r-bar/apps", None)), 0);
}

#[tokio::test]
async fn test_unknown_domain_is_not_bound() {
    let hostname = "foo.unknown.org";
    let domains = in_filter("name", &candidate_domains(hostname));
    let mut routes = HashMap::new();
    for endpoint in ["/v2/private_domains", "/v2/shared_domains"] {
        routes.insert(list(endpoint, Some(domains.clone())), ok(r#"{ "next_url": null, "resources": [] }"#));
    }
    let platform = common::start_mock_platform(routes).await;
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_UNSET", "unused.toml");

    let outcome = lookup_for(&config, AppStrategy::Direct)
        .run(hostname, true, &mut Discard)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        LookupOutcome::NotBound {
            reason: NotBoundReason::DomainNotFound
        }
    );
    assert_eq!(platform.requests().len(), 2);
}

#[tokio::test]
async fn test_error_status_surfaces_platform_error() {
    let mut routes = example_platform("bar.example.com");
    routes.insert(
        list("/v2/routes", Some(eq_filter("domain_guid", "D"))),
        (
            401,
            r#"{ "description": "Invalid Auth Token", "error_code": "CF-InvalidAuthToken", "code": 1000 }"#.to_string(),
        ),
    );
    let platform = common::start_mock_platform(routes).await;
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_UNSET", "unused.toml");

    let err = lookup_for(&config, AppStrategy::Direct)
        .run("bar.example.com", false, &mut Discard)
        .await
        .unwrap_err();
    match err {
        LookupError::Api(ApiError::Platform { path, code, error_code, .. }) => {
            assert!(path.starts_with("/v2/routes?"));
            assert_eq!(code, 1000);
            assert_eq!(error_code, "CF-InvalidAuthToken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_retarget_writes_target_file() {
    let platform = common::start_mock_platform(example_platform("bar.example.com")).await;
    let dir = tempfile::tempdir().unwrap();
    let target_file = dir.path().join("target.toml");
    let config = api_config(
        platform.endpoint(),
        "ROUTE_LOOKUP_IT_TOKEN_UNSET",
        target_file.to_str().unwrap(),
    );

    let outcome = lookup_for(&config, AppStrategy::Direct)
        .run("bar.example.com", true, &mut Discard)
        .await
        .unwrap();

    let LookupOutcome::Bound(report) = outcome else {
        panic!("expected bound outcome");
    };
    assert_eq!(
        report.retarget,
        Some(RetargetOutcome::Changed {
            org: "acme".into(),
            space: "dev".into()
        })
    );
    let record: TargetRecord = toml::from_str(&std::fs::read_to_string(&target_file).unwrap()).unwrap();
    assert_eq!(record.org, "acme");
    assert_eq!(record.space, "dev");
    // Grouping and retarget share one space and one org fetch
    assert_eq!(platform.hits("/v2/spaces/S1"), 1);
    assert_eq!(platform.hits("/v2/organizations/O1"), 1);
}

#[tokio::test]
async fn test_unreachable_platform_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = api_config(format!("http://{}", addr), "ROUTE_LOOKUP_IT_TOKEN_UNSET", "unused.toml");

    let err = lookup_for(&config, AppStrategy::Direct)
        .run("bar.example.com", false, &mut Discard)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Api(ApiError::Transport(_))));
}

fn shared_domains_page(next_url: &str, name: &str) -> (u16, String) {
    ok(&format!(
        r#"{{ "next_url": "{next_url}", "resources": [
            {{ "metadata": {{ "guid": "guid-{name}" }}, "entity": {{ "name": "{name}" }} }}
        ] }}"#
    ))
}

#[tokio::test]
async fn test_absolute_next_url_on_api_host_is_followed() {
    let platform = common::start_mock_platform(HashMap::new()).await;
    let second = format!("{}/v2/shared_domains?page=2", platform.endpoint());
    let (status, body) = shared_domains_page(&second, "a.example.com");
    platform.respond(&list("/v2/shared_domains", None), status, body);
    let (status, body) = shared_domains_page("", "b.example.com");
    platform.respond("/v2/shared_domains?page=2", status, body);

    std::env::set_var("ROUTE_LOOKUP_IT_TOKEN_SAME_HOST", "same-host-token");
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_SAME_HOST", "unused.toml");
    let client = PlatformClient::new(HttpConnection::new(&config).unwrap(), 100);

    let domains: Vec<Domain> = client.fetch_all("/v2/shared_domains", &client.list_query()).await.unwrap();
    let names: Vec<&str> = domains.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.example.com", "b.example.com"]);
    assert_eq!(platform.hits("/v2/shared_domains?page=2"), 1);
    assert!(platform
        .requests()
        .iter()
        .all(|r| r.authorization.as_deref() == Some("Bearer same-host-token")));
}

#[tokio::test]
async fn test_next_url_to_other_host_is_refused() {
    let foreign = common::start_mock_platform(HashMap::new()).await;
    let stolen = format!("{}/v2/shared_domains?page=2", foreign.endpoint());
    let (status, body) = shared_domains_page("", "evil.example.com");
    foreign.respond("/v2/shared_domains?page=2", status, body);

    let mut routes = HashMap::new();
    routes.insert(list("/v2/shared_domains", None), shared_domains_page(&stolen, "a.example.com"));
    let platform = common::start_mock_platform(routes).await;

    std::env::set_var("ROUTE_LOOKUP_IT_TOKEN_FOREIGN", "secret-token");
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_FOREIGN", "unused.toml");
    let client = PlatformClient::new(HttpConnection::new(&config).unwrap(), 100);

    let err = client
        .fetch_all::<Domain>("/v2/shared_domains", &client.list_query())
        .await
        .unwrap_err();
    match err {
        ApiError::Transport(TransportError::Other(message)) => {
            assert!(message.contains("leaves the API host"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(foreign.requests().is_empty(), "foreign host saw {:?}", foreign.requests());
    assert_eq!(platform.requests().len(), 1);
}

#[tokio::test]
async fn test_error_status_without_envelope_is_decode_failure() {
    let mut routes = example_platform("bar.example.com");
    routes.insert(
        list("/v2/routes", Some(eq_filter("domain_guid", "D"))),
        (500, "<html>upstream connect error</html>".to_string()),
    );
    let platform = common::start_mock_platform(routes).await;
    let config = api_config(platform.endpoint(), "ROUTE_LOOKUP_IT_TOKEN_UNSET", "unused.toml");

    let err = lookup_for(&config, AppStrategy::Direct)
        .run("bar.example.com", false, &mut Discard)
        .await
        .unwrap_err();
    match err {
        LookupError::Api(ApiError::Decode { path, .. }) => assert!(path.starts_with("/v2/routes?")),
        other => panic!("unexpected error: {other:?}"),
    }
}

mod common;

use bing_index::domain::entities::VerificationMethod;
use bing_index::domain::probes::ProbeError;
use common::{BEARER, OTHER_BEARER, TestContext};
use serde_json::json;

#[tokio::test]
async fn test_check_health_success() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    ctx.http.set_head("https://example.com/", Ok(200));
    let server = ctx.server();

    let response = server
        .post("/api/domains/health")
        .add_header("authorization", BEARER)
        .json(&json!({ "domain_id": domain.id }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["health"]["status_code"], 200);
    assert_eq!(json["health"]["is_healthy"], true);
    assert!(json["health"]["error"].is_null());
    assert!(json["health"]["response_time"].is_u64());

    let stored = ctx.domains.get(domain.id).unwrap();
    assert!(stored.is_healthy);
    assert!(stored.last_health_check.is_some());
    assert_eq!(ctx.health_logs.count_for(domain.id), 1);
}

#[tokio::test]
async fn test_check_health_server_error_is_unhealthy() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    ctx.http.set_head("https://example.com/", Ok(503));
    let server = ctx.server();

    let response = server
        .post("/api/domains/health")
        .add_header("authorization", BEARER)
        .json(&json!({ "domain_id": domain.id }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["health"]["status_code"], 503);
    assert_eq!(json["health"]["is_healthy"], false);
    assert!(json["health"]["error"].is_null());
    assert!(!ctx.domains.get(domain.id).unwrap().is_healthy);
}

#[tokio::test]
async fn test_check_health_unreachable_is_recorded() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    ctx.http
        .set_head("https://example.com/", Err(ProbeError::Timeout));
    let server = ctx.server();

    let response = server
        .post("/api/domains/health")
        .add_header("authorization", BEARER)
        .json(&json!({ "domainId": domain.id }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["health"]["status_code"], 0);
    assert_eq!(json["health"]["response_time"], 0);
    assert_eq!(json["health"]["is_healthy"], false);
    assert_eq!(json["health"]["error"], "request timed out");

    let logs = ctx.health_logs.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status_code, 0);
    assert_eq!(logs[0].error_message.as_deref(), Some("request timed out"));
}

#[tokio::test]
async fn test_check_health_other_users_domain() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    ctx.http.set_head("https://example.com/", Ok(200));
    let server = ctx.server();

    let response = server
        .post("/api/domains/health")
        .add_header("authorization", OTHER_BEARER)
        .json(&json!({ "domain_id": domain.id }))
        .await;

    response.assert_status_not_found();
    assert_eq!(ctx.health_logs.count_for(domain.id), 0);
    assert!(ctx.domains.get(domain.id).unwrap().last_health_check.is_none());
}

#[tokio::test]
async fn test_health_logs_newest_first_with_summary() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    let server = ctx.server();

    ctx.http.set_head("https://example.com/", Ok(200));
    for _ in 0..3 {
        server
            .post("/api/domains/health")
            .add_header("authorization", BEARER)
            .json(&json!({ "domain_id": domain.id }))
            .await
            .assert_status_ok();
    }
    ctx.http
        .set_head("https://example.com/", Err(ProbeError::Timeout));
    server
        .post("/api/domains/health")
        .add_header("authorization", BEARER)
        .json(&json!({ "domain_id": domain.id }))
        .await
        .assert_status_ok();

    let response = server
        .get(&format!("/api/domains/{}/health-logs", domain.id))
        .add_header("authorization", BEARER)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["is_healthy"], false);
    assert_eq!(items[0]["error_message"], "request timed out");
    assert_eq!(json["summary"]["checks"], 4);
    assert_eq!(json["summary"]["healthy_checks"], 3);
    assert_eq!(json["summary"]["uptime_percent"], 75.0);
}

#[tokio::test]
async fn test_health_logs_limit() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    ctx.http.set_head("https://example.com/", Ok(204));
    let server = ctx.server();

    for _ in 0..3 {
        server
            .post("/api/domains/health")
            .add_header("authorization", BEARER)
            .json(&json!({ "domain_id": domain.id }))
            .await
            .assert_status_ok();
    }

    let response = server
        .get(&format!("/api/domains/{}/health-logs?limit=2", domain.id))
        .add_header("authorization", BEARER)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_health_logs_limit_out_of_range() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    let server = ctx.server();

    let response = server
        .get(&format!("/api/domains/{}/health-logs?limit=501", domain.id))
        .add_header("authorization", BEARER)
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_health_logs_other_users_domain() {
    let ctx = TestContext::new();
    let domain = ctx.add_domain(ctx.user_id, "example.com", VerificationMethod::Dns, "abc123");
    let server = ctx.server();

    let response = server
        .get(&format!("/api/domains/{}/health-logs", domain.id))
        .add_header("authorization", OTHER_BEARER)
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_sweep_probes_every_domain() {
    let ctx = TestContext::new();
    let up = ctx.add_domain(ctx.user_id, "up.example.com", VerificationMethod::Dns, "a1");
    let down = ctx.add_domain(ctx.other_user_id, "down.example.com", VerificationMethod::File, "b2");
    ctx.http.set_head("https://up.example.com/", Ok(200));

    let report = ctx.state.health_service.sweep().await.unwrap();

    assert_eq!(report.checked, 2);
    assert_eq!(report.healthy, 1);
    assert_eq!(report.unhealthy, 1);
    assert_eq!(report.failed, 0);
    assert!(ctx.domains.get(up.id).unwrap().is_healthy);
    assert!(!ctx.domains.get(down.id).unwrap().is_healthy);
    assert_eq!(ctx.health_logs.count_for(down.id), 1);
}

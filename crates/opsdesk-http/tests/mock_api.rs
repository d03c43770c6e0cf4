//! Mock backend tests for opsdesk-http.
//!
//! These tests use wiremock to simulate the admin API and check the
//! requests each resource sends and how responses are unwrapped.

use std::sync::Arc;

use opsdesk_core::controller::{FetchOutcome, Reconcile, ResourcePage};
use opsdesk_core::error::{Error, TransportError};
use opsdesk_core::resources::{
    Activities, AdminDraft, Admins, ChargeRequest, EmailKind, Emails, FeedbackCategories,
    GameConfigs, GameUsers, MuteDraft, MuteLogKind, Mutes, Notices, PlayerFeedbackDraft,
    PlayerFeedbacks, PublishStatus, RankLimit, RefundRequest, RefundStatus, Roles, Sects,
    SensitiveWordLogs, SensitiveWords,
};
use opsdesk_core::{
    AccessToken, ApiUrl, Credentials, Feedback, ListController, MemorySession, PasswordChange,
    QueryState, Resource, ResourceClient, SessionStore,
};
use opsdesk_http::ApiClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn client_with_token(server: &MockServer) -> (ApiClient, Arc<MemorySession>) {
    let session = Arc::new(MemorySession::with_token(AccessToken::new("test-token")));
    let client = ApiClient::new(mock_api_url(server), session.clone()).unwrap();
    (client, session)
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": data, "message": "ok"}))
}

fn admin_json(id: i64) -> Value {
    json!({
        "id": id,
        "username": format!("admin{:02}", id),
        "name": format!("Admin {}", id),
        "role_id": 2,
        "is_super_admin": false,
        "status": "active",
        "created_at": "2025-06-01T00:00:00Z"
    })
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_list_sends_paging_filters_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/account/list"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .and(query_param("search", "lee"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ok(json!({
            "list": (1..=10).map(admin_json).collect::<Vec<_>>(),
            "total": 23,
            "page": 1,
            "pageSize": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut query = QueryState::new(&Admins::DESCRIPTOR);
    query
        .set_filter(
            &Admins::DESCRIPTOR,
            "search",
            opsdesk_core::resource::FilterValue::Text("lee".into()),
        )
        .unwrap();

    let page = ResourceClient::<Admins>::list(&client, &query).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 23);
}

#[tokio::test]
async fn test_feedback_categories_page_size_is_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feedback-categories"))
        .and(query_param("limit", "10"))
        .respond_with(ok(json!({"list": [], "total": 0, "page": 1, "limit": 10})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut list = ListController::<FeedbackCategories, _>::new(client);
    assert_eq!(list.refresh().await, FetchOutcome::Applied);
}

#[tokio::test]
async fn test_unpaged_activities_are_filtered_and_paged_locally() {
    let server = MockServer::start().await;

    let activities: Vec<Value> = (1..=15)
        .map(|i| {
            json!({
                "id": i,
                "title": if i % 2 == 0 { format!("Festival {}", i) } else { format!("Raid {}", i) },
                "intro": "",
                "limit": 1,
                "start_time": 1_772_323_200_000_i64,
                "end_time": 1_772_409_600_000_i64,
                "award": "",
                "detail": "",
                "status": 0
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/activity"))
        .respond_with(ok(Value::Array(activities)))
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut list = ListController::<Activities, _>::new(client);

    list.refresh().await;
    assert_eq!(list.snapshot().total, 15);
    assert_eq!(list.snapshot().len(), 10);
    assert_eq!(list.snapshot().total_pages, 2);

    list.set_filter("keyword", "festival").unwrap();
    list.refresh().await;
    assert_eq!(list.snapshot().total, 7);
    assert!(list.snapshot().items.iter().all(|a| a.title.starts_with("Festival")));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_accepts_201() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/account/list"))
        .and(body_json(json!({
            "username": "newcomer",
            "password": "secret1",
            "name": "New"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"code": 201, "data": admin_json(24), "message": "created"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let draft = AdminDraft {
        username: "newcomer".into(),
        password: Some("secret1".into()),
        name: "New".into(),
        role_id: None,
    };
    let created = ResourceClient::<Admins>::create(&client, &draft).await.unwrap();
    assert_eq!(created.id, 24);
}

#[tokio::test]
async fn test_update_puts_id_in_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/roles/list"))
        .and(body_json(json!({
            "id": 3,
            "name": "Auditor",
            "status": "active"
        })))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let draft = opsdesk_core::resources::RoleDraft {
        name: "Auditor".into(),
        description: None,
        status: opsdesk_core::resources::AccountStatus::Active,
    };
    let echoed = ResourceClient::<Roles>::update(&client, &3, &draft).await.unwrap();
    assert!(echoed.is_none());
}

#[tokio::test]
async fn test_activity_update_patches_with_query_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/activity"))
        .and(query_param("id", "7"))
        .and(body_partial_json(json!({"start_time": 1_000, "end_time": 2_000})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let draft = opsdesk_core::resources::ActivityDraft {
        title: "t".into(),
        intro: "i".into(),
        limit: 1,
        start_time: Some(opsdesk_core::Timestamp::from_millis(1_000)),
        end_time: Some(opsdesk_core::Timestamp::from_millis(2_000)),
        award: "a".into(),
        detail: "d".into(),
    };
    ResourceClient::<Activities>::update(&client, &7, &draft).await.unwrap();
}

#[tokio::test]
async fn test_delete_id_placement() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/account/list"))
        .and(query_param("id", "5"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/game-configs/main"))
        .and(body_json(json!({"id": 9})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    ResourceClient::<Admins>::delete(&client, &5).await.unwrap();
    ResourceClient::<GameConfigs>::delete(&client, &9).await.unwrap();
}

#[tokio::test]
async fn test_status_routes() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/activity-status"))
        .and(query_param("id", "4"))
        .and(body_json(json!({"status": 1})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/notice"))
        .and(query_param("isStatus", "true"))
        .and(body_json(json!({"id": "665f", "status": 0})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    ResourceClient::<Activities>::set_status(&client, &4, &PublishStatus::Closed)
        .await
        .unwrap();
    ResourceClient::<Notices>::set_status(&client, &"665f".to_string(), &PublishStatus::Open)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unsupported_operation_sends_nothing() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_token(&server);

    let err = ResourceClient::<Notices>::delete(&client, &"x".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_domain_failure_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sensitive-words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 400,
            "message": "word already exists"
        })))
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut draft = SensitiveWords::default_draft();
    draft.word = "cheat".into();

    let err = ResourceClient::<SensitiveWords>::create(&client, &draft)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Domain(_)));
    assert_eq!(err.user_message(), "word already exists");
}

#[tokio::test]
async fn test_http_errors_are_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roles/list"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 403,
            "message": "permission denied"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/account/list"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);

    let mut roles = ListController::<Roles, _>::new(client.clone());
    assert_eq!(
        roles.refresh().await,
        FetchOutcome::Failed(Feedback::PermissionDenied("permission denied".into()))
    );

    let query = QueryState::new(&Admins::DESCRIPTOR);
    let err = ResourceClient::<Admins>::list(&client, &query).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(), "network error");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let server = MockServer::start().await;
    let url = mock_api_url(&server);
    drop(server);

    let client = ApiClient::new(url, Arc::new(MemorySession::new())).unwrap();
    let query = QueryState::new(&Admins::DESCRIPTOR);
    let err = ResourceClient::<Admins>::list(&client, &query).await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Connection { .. })));
}

#[tokio::test]
async fn test_missing_token_sends_no_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/account/list"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "message": "login required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server), Arc::new(MemorySession::new())).unwrap();
    let query = QueryState::new(&Admins::DESCRIPTOR);
    let err = ResourceClient::<Admins>::list(&client, &query).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "login required");
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_login_begins_session_and_logout_ends_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "operator", "password": "hunter22"})))
        .respond_with(ok(json!({
            "token": "fresh-token",
            "user": {"id": 1, "username": "operator", "is_super_admin": true}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::new());
    let client = ApiClient::new(mock_api_url(&server), session.clone()).unwrap();

    let login = client
        .login(&*session, &Credentials::new("operator", "hunter22"))
        .await
        .unwrap();
    assert_eq!(login.token.as_str(), "fresh-token");
    assert!(login.user.unwrap().is_super_admin);
    assert!(session.is_active());

    client.logout(&*session).await.unwrap();
    assert!(!session.is_active());
}

#[tokio::test]
async fn test_change_password_mismatch_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/change-password"))
        .respond_with(ok(Value::Null))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let change = PasswordChange::new("old-pass", "new-pass", "other-pass");
    let err = client.change_password(&change).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

// ============================================================================
// Supplementary operations
// ============================================================================

#[tokio::test]
async fn test_supplementary_operations() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/account/list"))
        .and(body_json(json!({"id": 5, "newPassword": "reset-me"})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/roles/3/permissions"))
        .and(body_json(json!({"permissionCodes": ["admin:read", "role:read"]})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/game-configs/sync"))
        .respond_with(ok(json!({"timestamp": 1_772_323_200_000_i64})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/sensitive-words/test"))
        .and(body_json(json!({"text": "you cheat"})))
        .respond_with(ok(json!({
            "originalText": "you cheat",
            "detection": {
                "hasSensitiveWord": true,
                "matchedWords": [],
                "maxLevel": 2,
                "shouldReject": false
            },
            "filterResult": {"filteredText": "you ***", "hasReplaced": true, "replaceCount": 1}
        })))
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);

    client.reset_admin_password(5, "reset-me").await.unwrap();
    client
        .assign_permissions(3, &["admin:read".to_string(), "role:read".to_string()])
        .await
        .unwrap();

    let receipt = client.sync_game_configs().await.unwrap();
    assert_eq!(receipt.timestamp.as_millis(), 1_772_323_200_000);

    let report = client.detect_sensitive_words("you cheat").await.unwrap();
    assert_eq!(report.filter_result.filtered_text, "you ***");

    assert!(client.reset_admin_password(5, "abc").await.is_err());
}

// ============================================================================
// Mutes and email
// ============================================================================

#[tokio::test]
async fn test_mute_list_add_and_remove() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mute/mute-list"))
        .respond_with(ok(json!({
            "list": [
                {"userId": "p1", "ttl": 600, "unlockTime": "10:10", "remainingTime": "10m"},
                {"userId": "p2", "ttl": 60, "unlockTime": "10:01", "remainingTime": "1m"},
                {"userId": "p3", "ttl": 5, "unlockTime": "10:00", "remainingTime": "5s"}
            ],
            "total": 3
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/mute/mute-list"))
        .and(body_json(json!({"userId": "p9", "duration": "2h", "reason": "spam"})))
        .respond_with(ok(json!({"userId": "p9", "duration": "2h", "unlockTime": "12:00"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/mute/mute-list"))
        .and(query_param("userId", "p2"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut mutes = ListController::<Mutes, _>::new(client.clone());
    assert_eq!(mutes.set_page(2, 2).await, FetchOutcome::Applied);
    assert_eq!(mutes.snapshot().total, 3);
    assert_eq!(mutes.snapshot().items[0].user_id, "p3");

    let draft = MuteDraft {
        user_id: "p9".into(),
        duration: "2h".into(),
        reason: Some("spam".into()),
    };
    let created = ResourceClient::<Mutes>::create(&client, &draft).await.unwrap();
    assert_eq!(created.unlock_time, "12:00");

    ResourceClient::<Mutes>::delete(&client, &"p2".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_batch_unmute_and_mute_logs() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/mute/mute-list"))
        .and(body_json(json!({"userIds": ["p1", "p2"]})))
        .respond_with(ok(json!({
            "results": [
                {"userId": "p1", "success": true},
                {"userId": "p2", "success": false, "message": "not muted"}
            ],
            "total": 2,
            "successCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/mute/mute-logs"))
        .and(query_param("type", "unmute"))
        .and(query_param("limit", "50"))
        .respond_with(ok(json!({
            "list": [{"userId": "p1", "adminId": 1, "timestamp": "2026-10-19 09:00:00"}],
            "total": 1,
            "type": "unmute"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/mute/mute-logs"))
        .and(query_param("type", "all"))
        .respond_with(ok(json!({"deletedCount": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);

    let report = client
        .batch_unmute(&["p1".to_string(), "p2".to_string()])
        .await
        .unwrap();
    assert_eq!(report.success_count, 1);
    assert_eq!(report.failures().count(), 1);

    let log = client.mute_logs(MuteLogKind::Unmute, 50).await.unwrap();
    assert_eq!(log.list[0].admin_id, Some(1));
    assert_eq!(log.kind, Some(MuteLogKind::Unmute));

    assert_eq!(client.clear_mute_logs(MuteLogKind::All).await.unwrap(), 12);
    assert!(client.batch_unmute(&[]).await.is_err());
}

#[tokio::test]
async fn test_email_create_send_and_delete_routes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/email/create"))
        .and(body_partial_json(json!({"title": "Patch notes", "type": "draft", "sender": 1})))
        .respond_with(ok(json!({
            "id": 31,
            "name": "Patch notes",
            "isElement": false,
            "subtitle": "",
            "goods": [],
            "aid": 1,
            "time": "2026-10-19"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/email/send"))
        .and(query_param("id", "31"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/email/deleteEmail"))
        .and(query_param("id", "31"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/email/good"))
        .respond_with(ok(json!([
            {"uniqueId": "item_7", "itemId": 7, "category": "pill", "name": "Qi Pill"}
        ])))
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut draft = Emails::default_draft();
    draft.title = "Patch notes".into();
    draft.sender = Some(1);
    draft.kind = EmailKind::Draft;

    let email = ResourceClient::<Emails>::create(&client, &draft).await.unwrap();
    client.send_email(email.id).await.unwrap();
    ResourceClient::<Emails>::delete(&client, &email.id).await.unwrap();

    let goods = client.email_goods().await.unwrap();
    assert_eq!(goods.len(), 4);
    assert_eq!(goods[0].category, "money");
    assert_eq!(goods[3].name, "Qi Pill");
}

// ============================================================================
// Players and sects
// ============================================================================

#[tokio::test]
async fn test_game_users_read_nested_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/game/users"))
        .and(query_param("search", "lin"))
        .and(query_param("pageSize", "10"))
        .respond_with(ok(json!({
            "users": [{
                "id": 3,
                "name": "Lin",
                "bid": "b-3",
                "created_at": "2026-01-01",
                "updated_at": "2026-01-02"
            }],
            "pagination": {"current": 1, "pageSize": 10, "total": 21, "totalPages": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/game/users"))
        .and(query_param("id", "3"))
        .and(body_json(json!({"name": "Lin Feng", "bid": "b-3"})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut users = ListController::<GameUsers, _>::new(client.clone());
    users.set_filter("search", "lin").unwrap();
    users.refresh().await;
    assert_eq!(users.snapshot().total, 21);
    assert_eq!(users.snapshot().total_pages, 3);

    let mut draft = GameUsers::draft_from(&users.snapshot().items[0]);
    draft.name = "Lin Feng".into();
    ResourceClient::<GameUsers>::update(&client, &3, &draft)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_player_feedback_reply_and_delete_carry_body_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/feedbacks"))
        .and(body_json(json!({"id": 4, "reply": "Fixed"})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/feedbacks"))
        .and(body_json(json!({"id": 4})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let draft = PlayerFeedbackDraft {
        reply: "Fixed".into(),
        content: None,
        category_id: None,
    };
    ResourceClient::<PlayerFeedbacks>::update(&client, &4, &draft)
        .await
        .unwrap();
    ResourceClient::<PlayerFeedbacks>::delete(&client, &4)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sect_update_and_status_are_posts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/guilds"))
        .and(body_partial_json(json!({"id": 8, "name": "Azure Cloud", "intro": null})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/guilds/status"))
        .and(body_json(json!({"id": 8, "status": 1})))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut draft = Sects::default_draft();
    draft.name = "Azure Cloud".into();
    ResourceClient::<Sects>::update(&client, &8, &draft).await.unwrap();
    ResourceClient::<Sects>::set_status(&client, &8, &PublishStatus::Closed)
        .await
        .unwrap();
}

// ============================================================================
// Recharge, sensitive words and stats
// ============================================================================

#[tokio::test]
async fn test_charge_and_refund() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recharge/charge"))
        .and(body_json(json!({"uid": 1001, "packageId": 2})))
        .respond_with(ok(json!({
            "id": 55,
            "uid": 1001,
            "packageId": 2,
            "orderId": "R20261019-55",
            "status": "SUCCESS",
            "payAmount": 30.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/recharge/refunds"))
        .and(body_json(json!({"orderId": 55, "reason": "Charged twice"})))
        .respond_with(ok(json!({
            "id": 9,
            "orderId": 55,
            "reason": "Charged twice",
            "status": "PENDING",
            "createdAt": "2026-10-19"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let order = client
        .recharge_charge(&ChargeRequest {
            uid: 1001,
            package_id: 2,
        })
        .await
        .unwrap();
    assert!(order.refundable());

    let refund = client
        .request_refund(&RefundRequest {
            order_id: order.id,
            reason: "Charged twice".into(),
        })
        .await
        .unwrap();
    assert_eq!(refund.status, RefundStatus::Pending);

    let blank = RefundRequest {
        order_id: order.id,
        reason: String::new(),
    };
    assert!(matches!(
        client.request_refund(&blank).await.unwrap_err(),
        Error::Validation(_)
    ));
}

#[tokio::test]
async fn test_word_import_export_and_logs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sensitive-words/batch-import"))
        .and(body_partial_json(json!({"words": [{"word": "scam"}, {"word": "hack"}]})))
        .respond_with(ok(json!({"success": 1, "failed": 0, "duplicate": 1})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sensitive-words/export"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(b"word,type\nscam,cheat\n".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sensitive-words/logs"))
        .and(query_param("userId", "1001"))
        .respond_with(ok(json!({
            "items": [{
                "id": 1,
                "userId": 1001,
                "content": "scam link",
                "matchedWords": "scam",
                "actionTaken": "reject",
                "source": "chat",
                "platform": "android",
                "createdAt": "2026-10-19"
            }],
            "total": 1,
            "page": 1,
            "pageSize": 20,
            "totalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let words: Vec<_> = ["scam", "hack"]
        .iter()
        .map(|w| {
            let mut draft = SensitiveWords::default_draft();
            draft.word = w.to_string();
            draft
        })
        .collect();
    let report = client.import_sensitive_words(&words).await.unwrap();
    assert_eq!((report.success, report.duplicate), (1, 1));

    let mut invalid = words.clone();
    invalid[1].word.clear();
    let err = client.import_sensitive_words(&invalid).await.unwrap_err();
    assert!(err.user_message().contains("word 2"));

    let file = client.export_sensitive_words().await.unwrap();
    assert!(file.starts_with(b"word,type"));

    let mut logs = ListController::<SensitiveWordLogs, _>::new(client.clone());
    logs.set_filter("userId", "1001").unwrap();
    logs.refresh().await;
    assert_eq!(logs.snapshot().items[0].action_taken, "reject");
}

#[tokio::test]
async fn test_stats_and_rankings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/summary"))
        .respond_with(ok(json!({"playerTotal": 10, "advancedPlayerTotal": 2, "sectTotal": 1})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/player-rank"))
        .and(query_param("limit", "30"))
        .respond_with(ok(json!([{"rank": 1, "name": "Mo Yun", "realm": "Nascent Soul"}])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sect-rank"))
        .and(query_param("limit", "5"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    assert_eq!(client.stat_summary().await.unwrap().player_total, 10);

    let players = client.player_rank(RankLimit::default()).await.unwrap();
    assert_eq!(players[0].realm, "Nascent Soul");

    let sects = client.sect_rank(RankLimit::new(5).unwrap()).await.unwrap();
    assert!(sects.is_empty());
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_delete_with_optimistic_merge_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/account/list"))
        .respond_with(ok(json!({
            "list": (1..=10).map(admin_json).collect::<Vec<_>>(),
            "total": 23,
            "page": 1,
            "pageSize": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/account/list"))
        .and(query_param("id", "5"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_with_token(&server);
    let mut page = ResourcePage::<Admins, _>::new(client, Reconcile::Optimistic);

    assert_eq!(page.load().await, FetchOutcome::Applied);
    page.delete(&5).await.unwrap();

    let snapshot = page.list().snapshot();
    assert_eq!(snapshot.len(), 9);
    assert!(snapshot.items.iter().all(|a| a.id != 5));
    assert_eq!(snapshot.total, 22);
}

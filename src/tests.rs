//! Integration tests for the Gloria backend.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::companion::FAILURE_MESSAGE;
use crate::config::{Config, DEFAULT_COMPANION_ENDPOINT};
use crate::{create_router, AppState};

const PASSWORD: &str = "test-password";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        Self::start(temp_dir, config(db_path)).await
    }

    async fn start(temp_dir: TempDir, config: Config) -> Self {
        let state = AppState::build(config).await.expect("Failed to build state");
        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (u16, Value) {
        let resp = self.client.delete(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn login(&self) {
        let (status, body) = self
            .post("/api/admin/login", json!({ "password": PASSWORD }))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["authorized"], true);
    }
}

fn config(db_path: std::path::PathBuf) -> Config {
    Config {
        admin_password: PASSWORD.to_string(),
        db_path,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        persist_empty: false,
        submit_delay: Duration::from_millis(50),
        success_display: Duration::from_millis(200),
        companion_api_key: None,
        companion_model: "test-model".to_string(),
        companion_endpoint: DEFAULT_COMPANION_ENDPOINT.to_string(),
    }
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Health & Site Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_site_snapshot_serves_seed_content() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/site").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let site = &body["data"];
    assert_eq!(site["admin"], false);
    assert_eq!(site["slides"].as_array().unwrap().len(), 3);
    assert_eq!(site["gallery"].as_array().unwrap().len(), 3);
    assert_eq!(site["members"].as_array().unwrap().len(), 17);
    assert_eq!(site["events"].as_array().unwrap().len(), 5);
    assert_eq!(site["intro"]["welcome"], "Welcome");
    assert!(site["slides"][0]["imageSrc"].is_string());
}

// ============================================================================
// Admin Session Tests
// ============================================================================

#[tokio::test]
async fn test_login_and_logout() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get("/api/admin/session").await;
    assert_eq!(body["data"]["authorized"], false);

    fixture.login().await;
    let (_, body) = fixture.get("/api/admin/session").await;
    assert_eq!(body["data"]["authorized"], true);

    let (status, body) = fixture.post("/api/admin/logout", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["authorized"], false);

    let (_, body) = fixture.get("/api/site").await;
    assert_eq!(body["data"]["admin"], false);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/admin/login", json!({ "password": "1234" }))
        .await;
    assert_eq!(status, 401);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_PASSWORD");
    assert_eq!(body["error"]["message"], "Incorrect password");

    let (_, body) = fixture.get("/api/admin/session").await;
    assert_eq!(body["data"]["authorized"], false);
}

#[tokio::test]
async fn test_edits_require_admin_session() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/members", json!({ "name": "새 단원", "part": "Tenor" }))
        .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = fixture.delete("/api/slides/1?confirm=true").await;
    assert_eq!(status, 401);

    let (status, _) = fixture.get("/api/calendar/2030/3/15/draft").await;
    assert_eq!(status, 401);

    // Nothing changed
    let (_, body) = fixture.get("/api/members").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 17);
    let (_, body) = fixture.get("/api/slides").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_crud() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (_, before) = fixture.get("/api/members").await;
    let revision = before["revisionId"].as_i64().unwrap();

    let (status, body) = fixture
        .post(
            "/api/members",
            json!({ "name": " 이새벽 ", "role": "", "part": "Tenor", "bio": "새로 온 테너" }),
        )
        .await;
    assert_eq!(status, 200);
    let created = &body["data"];
    let id = created["id"].as_i64().unwrap();
    assert!(id > 17);
    assert_eq!(created["name"], "이새벽");
    assert!(created.get("role").is_none());
    assert!(body["revisionId"].as_i64().unwrap() > revision);

    let (status, body) = fixture
        .put(
            &format!("/api/members/{}", id),
            json!({ "name": "이새벽", "role": "총무", "part": "Bass", "bio": "" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["part"], "Bass");
    assert_eq!(body["data"]["role"], "총무");

    // Delete needs confirmation
    let (status, body) = fixture.delete(&format!("/api/members/{}", id)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "CONFIRMATION_REQUIRED");
    let (_, body) = fixture.get("/api/members").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 18);

    let (status, body) = fixture
        .delete(&format!("/api/members/{}?confirm=true", id))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn test_update_unknown_member_is_not_found() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, body) = fixture
        .put("/api/members/999999", json!({ "name": "없는 사람" }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (_, body) = fixture.get("/api/members").await;
    assert!(!names(&body["data"]).contains(&"없는 사람".to_string()));
}

#[tokio::test]
async fn test_member_validation() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, body) = fixture
        .post("/api/members", json!({ "name": "   " }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_sort_part_moves_sorted_part_to_end() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, _) = fixture
        .post("/api/members/parts/alto/sort", json!({}))
        .await;
    assert_eq!(status, 400);

    let (status, body) = fixture
        .post("/api/members/parts/alto/sort?confirm=true", json!({}))
        .await;
    assert_eq!(status, 200);

    let members = names(&body["data"]);
    assert_eq!(members.len(), 17);
    assert_eq!(
        &members[13..],
        &["강민지", "윤서연", "정미경", "한예슬"].map(str::to_string)
    );

    let (status, _) = fixture
        .post("/api/members/parts/choir/sort?confirm=true", json!({}))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_content_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.sqlite");

    {
        let state = AppState::build(config(db_path.clone())).await.unwrap();
        state.gate.login(PASSWORD).await.unwrap();
        state.members.remove(1).await.unwrap();
    }

    // Same database, fresh process state
    let fixture = TestFixture::start(temp_dir, config(db_path)).await;
    let (_, body) = fixture.get("/api/members").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 16);

    // The admin flag is session scoped and does not survive
    let (_, body) = fixture.get("/api/admin/session").await;
    assert_eq!(body["data"]["authorized"], false);
}

// ============================================================================
// Media Tests
// ============================================================================

#[tokio::test]
async fn test_media_editor_targets_collection_by_kind() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, body) = fixture
        .post(
            "/api/media",
            json!({ "kind": "slide", "imageSrc": "data:image/png;base64,AAAA", "title": "봄 음악회" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["kind"], "slide");
    let slide_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = fixture
        .post(
            "/api/media",
            json!({
                "kind": "gallery",
                "imageSrc": "https://example.org/p.jpg",
                "title": "수련회",
                "category": "행사",
                "date": "2024년 8월"
            }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["kind"], "gallery");

    let (_, slides) = fixture.get("/api/slides").await;
    assert_eq!(slides["data"].as_array().unwrap().len(), 4);
    let (_, gallery) = fixture.get("/api/gallery").await;
    assert_eq!(gallery["data"].as_array().unwrap().len(), 4);

    // A slide id is unknown to the gallery
    let (status, _) = fixture
        .put(
            &format!("/api/media/{}", slide_id),
            json!({ "kind": "gallery", "imageSrc": "x", "title": "t" }),
        )
        .await;
    assert_eq!(status, 404);

    let (status, body) = fixture
        .put(
            &format!("/api/media/{}", slide_id),
            json!({ "kind": "slide", "imageSrc": "x", "title": "여름 음악회", "desc": "d" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "여름 음악회");

    let (status, _) = fixture
        .post("/api/media", json!({ "kind": "slide", "imageSrc": "", "title": "t" }))
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_deleting_last_slide_falls_back_to_seed_on_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.sqlite");

    {
        let state = AppState::build(config(db_path.clone())).await.unwrap();
        for id in [1, 2, 3] {
            state.slides.remove(id).await.unwrap();
        }
        assert!(state.slides.list().await.is_empty());
    }

    let fixture = TestFixture::start(temp_dir, config(db_path)).await;
    let (_, body) = fixture.get("/api/slides").await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    // Last non-empty snapshot held only slide 3
    assert_eq!(ids, vec![3]);
}

// ============================================================================
// Event & Calendar Tests
// ============================================================================

#[tokio::test]
async fn test_events_stay_in_date_order() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, body) = fixture
        .post(
            "/api/events",
            json!({ "year": 2000, "month": 1, "day": 2, "title": "창단 예배" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["dateStr"], "2000. 01. 02");
    let id = body["data"]["id"].as_i64().unwrap();
    assert_ne!(id, 0);

    let (_, body) = fixture.get("/api/events").await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0]["id"].as_i64().unwrap(), id);

    // Moving it into the future puts it last
    let (status, _) = fixture
        .put(
            &format!("/api/events/{}", id),
            json!({ "year": 2999, "month": 12, "day": 31, "title": "먼 훗날" }),
        )
        .await;
    assert_eq!(status, 200);
    let (_, body) = fixture.get("/api/events").await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events[5]["id"].as_i64().unwrap(), id);
    assert_eq!(events[5]["dateStr"], "2999. 12. 31");

    let (status, body) = fixture
        .post(
            "/api/events",
            json!({ "year": 2025, "month": 2, "day": 30, "title": "없는 날" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_event_ids_stay_unique_past_largest_id() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, body) = fixture
        .post(
            "/api/events",
            json!({ "id": i64::MAX, "year": 2030, "month": 5, "day": 1, "title": "끝 번호" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"].as_i64().unwrap(), i64::MAX);

    let (status, body) = fixture
        .post(
            "/api/events",
            json!({ "year": 2030, "month": 5, "day": 2, "title": "다음 행사" }),
        )
        .await;
    assert_eq!(status, 200);
    let id = body["data"]["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_ne!(id, i64::MAX);

    let (_, body) = fixture.get("/api/events").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_calendar_month_view() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    for day in [15, 3, 15] {
        fixture
            .post(
                "/api/events",
                json!({ "year": 2030, "month": 3, "day": day, "title": "연습" }),
            )
            .await;
    }

    let (status, body) = fixture.get("/api/calendar/2030/3").await;
    assert_eq!(status, 200);
    let view = &body["data"];
    assert_eq!(view["daysInMonth"], 31);
    assert_eq!(view["firstWeekday"], 5);
    assert_eq!(view["eventDays"], json!([3, 15]));
    assert_eq!(view["prev"], json!({ "year": 2030, "month": 2 }));
    assert_eq!(view["next"], json!({ "year": 2030, "month": 4 }));

    let (status, _) = fixture.get("/api/calendar/2030/13").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_calendar_draft_for_editors() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let (status, body) = fixture.get("/api/calendar/2030/3/15/draft").await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"],
        json!({ "id": 0, "year": 2030, "month": 3, "day": 15, "title": "", "desc": "" })
    );

    let (status, _) = fixture.get("/api/calendar/2030/2/30/draft").await;
    assert_eq!(status, 400);
}

// ============================================================================
// Intro Tests
// ============================================================================

#[tokio::test]
async fn test_intro_update() {
    let fixture = TestFixture::new().await;
    fixture.login().await;

    let intro = json!({ "welcome": "환영합니다", "title": "새 제목", "content": "본문" });
    let (status, body) = fixture.put("/api/intro", intro.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], intro);

    let (_, body) = fixture.get("/api/intro").await;
    assert_eq!(body["data"], intro);
}

// ============================================================================
// Form Tests
// ============================================================================

#[tokio::test]
async fn test_contact_form_lifecycle() {
    let fixture = TestFixture::new().await;
    let form = json!({ "name": "홍길동", "email": "hong@example.com", "message": "문의" });

    let (status, body) = fixture.post("/api/forms/contact", form.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "submitting");

    // Second submit while in flight is rejected
    let (status, body) = fixture.post("/api/forms/contact", form).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], "CONFLICT");

    tokio::time::sleep(Duration::from_millis(150)).await;
    let (_, body) = fixture.get("/api/forms/contact/status").await;
    assert_eq!(body["data"]["status"], "success");

    // Auto-reset after the display period
    tokio::time::sleep(Duration::from_millis(300)).await;
    let (_, body) = fixture.get("/api/forms/contact/status").await;
    assert_eq!(body["data"]["status"], "idle");
}

#[tokio::test]
async fn test_application_form_waits_for_reset() {
    let fixture = TestFixture::new().await;
    let form = json!({
        "name": "김하늘",
        "phone": "010-1234-5678",
        "part": "Alto",
        "experience": "청년부 찬양팀 3년"
    });

    let (status, _) = fixture.post("/api/forms/application", form).await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(400)).await;
    let (_, body) = fixture.get("/api/forms/application/status").await;
    assert_eq!(body["data"]["status"], "success");

    let (status, body) = fixture.post("/api/forms/application/reset", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "idle");
}

#[tokio::test]
async fn test_form_validation() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/forms/contact",
            json!({ "name": "홍길동", "email": "", "message": "문의" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = fixture
        .post("/api/forms/contact", json!({ "name": "홍길동" }))
        .await;
    assert_eq!(status, 400);

    let (status, _) = fixture.get("/api/forms/newsletter/status").await;
    assert_eq!(status, 404);

    let (_, body) = fixture.get("/api/forms/contact/status").await;
    assert_eq!(body["data"]["status"], "idle");
}

// ============================================================================
// Companion Tests
// ============================================================================

#[tokio::test]
async fn test_companion_without_key_degrades() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/companion/ask", json!({ "input": "요즘 너무 지쳐요" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["text"], FAILURE_MESSAGE);
    assert_eq!(
        body["data"]["segments"],
        json!([{ "type": "text", "text": FAILURE_MESSAGE }])
    );
}

#[tokio::test]
async fn test_companion_feedback() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/companion/feedback",
            json!({ "originalInput": "지쳐요", "type": "rating", "rating": "up" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["rating"], "up");
    assert!(body["data"]["id"].is_string());

    let (status, body) = fixture
        .post(
            "/api/companion/feedback",
            json!({ "originalInput": "지쳐요", "type": "voice_note", "text": "  " }),
        )
        .await;
    assert_eq!(status, 200);
    assert!(body["data"].is_null());
}

//! Drives the router end to end with an in-memory claim store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anonpoll_application::SurveyUseCase;
use anonpoll_core::avatar::{AvatarStore, ClaimSet, MemoryAvatarStore};
use anonpoll_core::notify::{NotificationError, Notifier};
use anonpoll_core::reservation::ReservationService;
use anonpoll_server::{AppState, router};
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use tower::ServiceExt;

#[derive(Default)]
struct OutboxNotifier {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send(&self, _subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

struct Harness {
    state: Arc<AppState>,
    store: Arc<MemoryAvatarStore>,
    outbox: Arc<OutboxNotifier>,
}

impl Harness {
    fn new(claims: ClaimSet) -> Self {
        let store = Arc::new(MemoryAvatarStore::with_claims(claims));
        let outbox = Arc::new(OutboxNotifier::default());
        let survey = SurveyUseCase::new(
            ReservationService::new(store.clone()),
            outbox.clone(),
            Duration::from_secs(3600),
        );
        Self {
            state: AppState::new(survey).unwrap(),
            store,
            outbox,
        }
    }

    async fn new_sid(&self) -> String {
        self.state.survey.start_session().await.unwrap().sid
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.call(request).await
    }

    async fn post(&self, uri: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = router(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

fn encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let harness = Harness::new(ClaimSet::new());

    let (status, body) = harness.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn index_renders_board_with_claimed_avatars_disabled() {
    let harness = Harness::new(ClaimSet::from_tokens(["🦇"]));

    let (status, body) = harness.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("avatar-card used_by_other"));
    assert!(body.contains("Noch 38 von 39 Tieren frei."));
    assert!(body.contains("name=\"sid\""));
}

#[tokio::test]
async fn unknown_sid_starts_a_new_session() {
    let harness = Harness::new(ClaimSet::new());

    let (status, _) = harness.get("/survey?sid=does-not-exist").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.state.survey.sessions().len().await, 1);
}

#[tokio::test]
async fn pick_then_reserve_claims_the_avatar() {
    let harness = Harness::new(ClaimSet::new());
    let sid = harness.new_sid().await;

    let (status, body) = harness
        .post("/avatar/pick", &[("sid", sid.as_str()), ("token", "🦦")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Reservieren"));
    assert!(harness.store.load().is_empty());

    let (status, body) = harness
        .post("/avatar/reserve", &[("sid", sid.as_str()), ("token", "🦦")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Dein Avatar ist: 🦦"));
    assert!(harness.store.load().contains("🦦"));
}

#[tokio::test]
async fn reserving_a_taken_avatar_asks_for_another() {
    let harness = Harness::new(ClaimSet::from_tokens(["🐢"]));
    let sid = harness.new_sid().await;

    let (status, body) = harness
        .post("/avatar/reserve", &[("sid", sid.as_str()), ("token", "🐢")])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("nicht mehr frei"));
}

#[tokio::test]
async fn invalid_token_is_a_bad_request() {
    let harness = Harness::new(ClaimSet::new());
    let sid = harness.new_sid().await;

    let (status, body) = harness
        .post("/avatar/pick", &[("sid", sid.as_str()), ("token", "🦊")])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("kein Avatar dieser Umfrage"));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let harness = Harness::new(ClaimSet::new());

    let (status, _) = harness
        .post("/avatar/pick", &[("sid", "gone"), ("token", "🦦")])
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn answers_preview_shows_payload() {
    let harness = Harness::new(ClaimSet::new());
    let sid = harness.new_sid().await;

    let (status, body) = harness
        .post(
            "/answers",
            &[
                ("sid", sid.as_str()),
                ("motives", "1"),
                ("motives_other", "Mehr Grün"),
                ("action", "preview"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("class=\"preview\""));
    assert!(body.contains("Klima- und Umweltschutz"));
    assert!(body.contains("Mehr Grün"));
}

#[tokio::test]
async fn too_many_answers_are_refused() {
    let harness = Harness::new(ClaimSet::new());
    let sid = harness.new_sid().await;

    let (status, body) = harness
        .post(
            "/answers",
            &[
                ("sid", sid.as_str()),
                ("obstacles", "0"),
                ("obstacles", "1"),
                ("obstacles", "2"),
                ("obstacles", "3"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("höchstens 3"));
}

#[tokio::test]
async fn send_is_gated_on_reservation_and_opt_in() {
    let harness = Harness::new(ClaimSet::new());
    let sid = harness.new_sid().await;

    let (status, _) = harness
        .post("/send", &[("sid", sid.as_str()), ("opt_in", "on")])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    harness
        .post("/avatar/reserve", &[("sid", sid.as_str()), ("token", "🦦")])
        .await;

    let (status, _) = harness.post("/send", &[("sid", sid.as_str())]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(harness.outbox.sent.lock().unwrap().is_empty());

    let (status, body) = harness
        .post("/send", &[("sid", sid.as_str()), ("opt_in", "on")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Vielen Dank!"));

    let sent = harness.outbox.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("\"avatar\": \"🦦\""));
}

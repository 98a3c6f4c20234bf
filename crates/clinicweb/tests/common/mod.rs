//! Common test utilities
//!
//! Shared by the HTTP integration tests: fake catalog and messenger, a
//! fixed doctor directory and request helpers driving the router in-process.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use clinicore::telegram::RelayError;
use clinicore::{
    ContactPipeline, DoctorDirectory, Messenger, PendingChat, ScriptIntake, Settings, SubjectCatalog, SubjectTag,
};
use clinicweb::{create_router, WebState};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

pub const DOCTORS_JSON: &str = r#"[
    {"id": 1, "name": "Dr. X", "email": "x@y.com", "phone": "+380441112233", "telegramChatId": "555", "tags": [3]},
    {"id": 2, "name": "Dr. Y", "email": "y@y.com", "tags": [1, 3]},
    {"id": 3, "name": "Dr. Z", "telegramChatId": 777, "tags": [5]}
]"#;

pub const BOT_TOKEN: &str = "123456:TEST";

/// Catalog with a handful of fixed names.
pub struct MapCatalog(HashMap<(&'static str, &'static str), &'static str>);

impl MapCatalog {
    pub fn urology() -> Self {
        Self(HashMap::from([(("uk", "3"), "Urology"), (("en", "3"), "Urology (en)")]))
    }
}

impl SubjectCatalog for MapCatalog {
    fn subject_name(&self, locale: &str, subject_id: &str) -> Option<String> {
        self.0
            .iter()
            .find(|((l, id), _)| *l == locale && *id == subject_id)
            .map(|(_, name)| name.to_string())
    }

    fn subjects(&self, locale: &str) -> Option<Vec<SubjectTag>> {
        let mut tags: Vec<SubjectTag> = self
            .0
            .iter()
            .filter(|((l, _), _)| *l == locale)
            .filter_map(|((_, id), name)| {
                Some(SubjectTag {
                    id: id.parse().ok()?,
                    name: name.to_string(),
                })
            })
            .collect();
        if tags.is_empty() {
            return None;
        }
        tags.sort_by_key(|tag| tag.id);
        Some(tags)
    }
}

/// Messenger that records sends and serves a fixed set of pending chats.
#[derive(Default)]
pub struct StubMessenger {
    pub sent: Mutex<Vec<(String, String)>>,
    pub chats: Vec<PendingChat>,
    pub fail_updates: bool,
}

impl StubMessenger {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits up to a second for detached relays to land.
    pub async fn wait_for_sends(&self, expected: usize) -> Vec<(String, String)> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Messenger for StubMessenger {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), RelayError> {
        self.sent.lock().unwrap().push((chat_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn pending_chats(&self) -> Result<Vec<PendingChat>, RelayError> {
        if self.fail_updates {
            return Err(RelayError::InvalidChatId("unreachable".to_string()));
        }
        Ok(self.chats.clone())
    }
}

/// Settings with the fixed directory, pointing the intake at `intake_url`.
pub fn settings(intake_url: Option<&str>) -> Settings {
    Settings {
        doctors: Some(DoctorDirectory::from_json(DOCTORS_JSON).unwrap()),
        intake_url: intake_url.map(|raw| Url::parse(raw).unwrap()),
        bot_token: Some(SecretString::from(BOT_TOKEN.to_string())),
        intake_timeout: Duration::from_secs(2),
        ..Settings::default()
    }
}

/// Router wired with a real HTTP intake client and the given collaborators.
pub fn router_with(
    settings: Settings,
    catalog: Arc<dyn SubjectCatalog>,
    messenger: Option<Arc<dyn Messenger>>,
) -> Router {
    let intake = Arc::new(ScriptIntake::new(settings.intake_timeout).unwrap());
    let mut pipeline = ContactPipeline::new(Arc::new(settings), intake, catalog.clone());
    if let Some(messenger) = &messenger {
        pipeline = pipeline.with_messenger(messenger.clone());
    }
    create_router(Arc::new(WebState::new(pipeline, catalog, messenger)))
}

pub fn router(settings: Settings) -> Router {
    router_with(settings, Arc::new(MapCatalog::urology()), None)
}

pub fn contact_body(doctor_id: &str, subject: &str, locale: &str) -> Value {
    serde_json::json!({
        "name": "Olena Petrenko",
        "phone": "+380501234567",
        "email": "olena@example.com",
        "birthDate": "1990-04-01",
        "subject": subject,
        "message": "Pain <after> surgery",
        "doctorId": doctor_id,
        "locale": locale
    })
}

pub async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    post_with_type(app, uri, "application/json", body).await
}

pub async fn post_with_type(app: Router, uri: &str, content_type: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

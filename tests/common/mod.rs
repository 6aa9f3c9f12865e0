//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shiftdesk::config::Config;
use shiftdesk::db::Store;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password";

pub struct TestApp {
    pub app: Router,
    pub store: Store,
}

pub async fn spawn_app(name: &str) -> TestApp {
    let db_path = std::env::temp_dir().join(format!(
        "shiftdesk-{name}-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = shiftdesk::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let store = state.store().clone();

    TestApp {
        app: shiftdesk::api::router(state),
        store,
    }
}

impl TestApp {
    /// Sends a request and returns the status plus the decoded JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, json) = self.send_raw(method, uri, cookie, body).await;
        (status, json)
    }

    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, headers, json)
    }

    /// Logs in and returns the `Cookie` header value for the new session.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, headers, body) = self
            .send_raw(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        let set_cookie = headers
            .get(header::SET_COOKIE)
            .expect("login did not set a session cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Creates an operator through the API and returns `(id, cookie)`.
    pub async fn operator(&self, admin: &str, username: &str) -> (i32, String) {
        let password = format!("{username}-secret");
        let (status, body) = self
            .send(
                "POST",
                "/api/users",
                Some(admin),
                Some(json!({
                    "username": username,
                    "password": password,
                    "full_name": format!("Operator {username}"),
                    "role": "operator",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "user create failed: {body}");

        let id = i32::try_from(body["id"].as_i64().unwrap()).unwrap();
        let cookie = self.login(username, &password).await;
        (id, cookie)
    }

    pub async fn create_event_title(&self, admin: &str, title: &str) -> i32 {
        let (status, body) = self
            .send(
                "POST",
                "/api/event-titles",
                Some(admin),
                Some(json!({ "title": title })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "event title create failed: {body}");
        i32::try_from(body["id"].as_i64().unwrap()).unwrap()
    }

    pub async fn create_shift_hours(&self, admin: &str, name: &str, start: &str, end: &str) -> i32 {
        let (status, body) = self
            .send(
                "POST",
                "/api/shift-hours",
                Some(admin),
                Some(json!({ "name": name, "start_time": start, "end_time": end })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "shift hours create failed: {body}");
        i32::try_from(body["id"].as_i64().unwrap()).unwrap()
    }

    pub async fn create_report(&self, cookie: &str, report: Value) -> i32 {
        let (status, body) = self
            .send("POST", "/api/reports", Some(cookie), Some(report))
            .await;
        assert_eq!(status, StatusCode::OK, "report create failed: {body}");
        i32::try_from(body["id"].as_i64().unwrap()).unwrap()
    }
}

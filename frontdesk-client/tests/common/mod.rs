// frontdesk-client/tests/common/mod.rs
// Scripted in-memory transport and fixtures shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use frontdesk_client::http::error_from_body;
use frontdesk_client::{BookingApi, ClientConfig, ClientResult, Clock, FixedClock, HttpClient};
use http::StatusCode;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Every test runs on 30 July 2025
pub fn today() -> NaiveDate {
    date(2025, 7, 30)
}

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(today()))
}

/// No artificial spinner delay; default debounce window
pub fn config() -> ClientConfig {
    ClientConfig::new("http://frontdesk.test").with_min_spinner_ms(0)
}

/// One recorded request
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Value),
    Fail(StatusCode, String),
}

/// Transport replaying scripted replies per path (query string ignored)
///
/// The last reply for a path repeats once the script runs out. Each call is
/// recorded before the reply is produced, then yields once so concurrent
/// triggers overlap.
#[derive(Default)]
pub struct ScriptedHttp {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
    delay: Duration,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ok(self, path: &str, value: Value) -> Self {
        self.push(path, Reply::Ok(value));
        self
    }

    pub fn fail(self, path: &str, status: StatusCode, body: Value) -> Self {
        self.push(path, Reply::Fail(status, body.to_string()));
        self
    }

    pub fn fail_raw(self, path: &str, status: StatusCode, body: &str) -> Self {
        self.push(path, Reply::Fail(status, body.to_string()));
        self
    }

    pub fn push(&self, path: &str, reply: Reply) {
        self.routes
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| route_of(&c.path) == path)
            .collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls_to(path).len()
    }

    fn next_reply(&self, path: &str) -> Reply {
        let mut routes = self.routes.lock();
        match routes.get_mut(route_of(path)) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Reply::Fail(StatusCode::NOT_FOUND, "<html>Not Found</html>".into()),
        }
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<T> {
        self.calls.lock().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }
        match self.next_reply(path) {
            Reply::Ok(value) => Ok(serde_json::from_value(value)?),
            Reply::Fail(status, text) => Err(error_from_body(status, text)),
        }
    }
}

fn route_of(path: &str) -> &str {
    path.split_once('?').map_or(path, |(route, _)| route)
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.exchange("GET", path, None).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let query = serde_json::to_value(query)?;
        self.exchange("GET", path, Some(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.exchange("POST", path, Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.exchange("POST", path, None).await
    }

    async fn post_form<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.exchange("POST", path, Some(body)).await
    }
}

/// Api over a shared scripted transport, so the test keeps a handle on it
pub fn api(http: ScriptedHttp) -> (BookingApi<ScriptedHttp>, Arc<ScriptedHttp>) {
    let http = Arc::new(http);
    (BookingApi::from_arc(http.clone()), http)
}

// ==================== Fixtures ====================

pub fn room(id: i64, number: &str, room_type: &str, price: f64) -> Value {
    json!({
        "id": id,
        "room_number": number,
        "room_type": room_type,
        "price": price,
        "status": "available"
    })
}

pub fn booking(id: i64, reference: &str, status: &str, payment: &str) -> Value {
    json!({
        "id": id,
        "booking_reference": reference,
        "guest": {
            "id": 11,
            "full_name": "Ama Mensah",
            "email": "ama@example.com",
            "phone": "0244000000"
        },
        "room": {"id": 3, "room_number": "201", "room_type": "Double", "price": 450.0},
        "check_in_date": "2025-08-01",
        "check_out_date": "2025-08-03",
        "status": status,
        "payment_status": payment
    })
}

pub fn page(current: u32, total: u32) -> Value {
    json!({"current_page": current, "total_pages": total})
}

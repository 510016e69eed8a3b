#![allow(dead_code)]

use {
    async_trait::async_trait,
    axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    },
    chrono::{TimeZone, Utc},
    classpay::{
        AppState,
        domain::{
            error::GatewayError,
            payment::{NewPayment, Payment, PaymentAmount, PaymentFilter, PaymentPatch},
            store::PaymentStore,
        },
    },
    rust_decimal_macros::dec,
    std::sync::{
        Arc, Mutex,
        atomic::{AtomicI64, Ordering},
    },
    tower::ServiceExt,
    uuid::Uuid,
};

/// In-memory stand-in for the remote `payments` collection. Filtering and
/// ordering follow the same contract as the Postgres store; `created_at` is
/// a strictly increasing synthetic clock so ordering tests are
/// deterministic.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Payment>>,
    clock: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn select(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, GatewayError> {
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Payment> =
            rows.iter().filter(|p| filter.matches(p)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn insert(&self, new: &NewPayment) -> Result<Payment, GatewayError> {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let payment = Payment {
            id: Uuid::now_v7(),
            class_id: new.class_id,
            enrollment_id: new.enrollment_id,
            student_id: new.student_id,
            amount: new.amount,
            status: new.status.clone(),
            payment_date: Some(new.payment_date),
            created_at: Utc.timestamp_opt(1_700_000_000 + tick, 0).unwrap(),
        };
        self.rows.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &PaymentPatch,
    ) -> Result<Option<Payment>, GatewayError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(status) = &patch.status {
            row.status = status.clone();
        }
        if let Some(payment_date) = patch.payment_date {
            row.payment_date = Some(payment_date);
        }
        if let Some(amount) = patch.amount {
            row.amount = amount;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GatewayError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

/// Store double where every call fails, for exercising the 400 mapping.
pub struct FailingStore;

#[async_trait]
impl PaymentStore for FailingStore {
    async fn select(&self, _: &PaymentFilter) -> Result<Vec<Payment>, GatewayError> {
        Err(GatewayError::Client("store unavailable".to_string()))
    }

    async fn insert(&self, _: &NewPayment) -> Result<Payment, GatewayError> {
        Err(GatewayError::Client("store unavailable".to_string()))
    }

    async fn update(&self, _: Uuid, _: &PaymentPatch) -> Result<Option<Payment>, GatewayError> {
        Err(GatewayError::Client("store unavailable".to_string()))
    }

    async fn delete(&self, _: Uuid) -> Result<bool, GatewayError> {
        Err(GatewayError::Client("store unavailable".to_string()))
    }
}

/// Insert record with an explicit status, for seeding filter scenarios.
pub fn draft(class_id: Uuid, enrollment_id: Uuid, student_id: Uuid, status: &str) -> NewPayment {
    NewPayment {
        class_id,
        enrollment_id,
        student_id,
        amount: PaymentAmount::new(dec!(100)).unwrap(),
        status: status.to_string(),
        payment_date: Utc::now().date_naive(),
    }
}

// ── HTTP helpers ───────────────────────────────────────────────────────────

pub fn app_with(store: Arc<dyn PaymentStore>) -> Router {
    Router::new()
        .nest("/payments", classpay::adapters::http::router())
        .with_state(AppState { store })
}

pub fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_with(store.clone()), store)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is not json")
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn patch_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::GatewayError,
            payment::{Payment, PaymentAmount, PaymentPatch},
        },
        services::gateway,
    },
    axum::{
        Json, Router,
        extract::{Path, Query, State, rejection::JsonRejection},
        routing::get,
    },
    serde::Deserialize,
    uuid::Uuid,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub class_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub status: Option<String>,
}

/// `status` and `payment_date` are server-assigned on create; supplying
/// them (or anything else) is rejected by the schema, never forwarded.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePaymentRequest {
    pub class_id: Uuid,
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub amount: PaymentAmount,
}

/// Routes for the payments collection; nest under the path prefix.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/enrollment/{enrollment_id}", get(payment_for_enrollment))
        .route(
            "/{id}",
            get(get_payment).patch(update_payment).delete(delete_payment),
        )
}

async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = gateway::list_payments(
        state.store.as_ref(),
        params.class_id,
        params.student_id,
        params.status,
    )
    .await?;
    Ok(Json(payments))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, ApiError> {
    let payment = gateway::get_payment(state.store.as_ref(), id).await?;
    Ok(Json(payment))
}

async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<Payment>, ApiError> {
    let Json(req) = payload.map_err(|rej| GatewayError::Client(rej.body_text()))?;
    let created = gateway::create_payment(
        state.store.as_ref(),
        req.class_id,
        req.enrollment_id,
        req.student_id,
        req.amount,
    )
    .await?;
    Ok(Json(created))
}

async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<PaymentPatch>, JsonRejection>,
) -> Result<Json<Payment>, ApiError> {
    let Json(patch) = payload.map_err(|rej| GatewayError::Client(rej.body_text()))?;
    let updated = gateway::update_payment(state.store.as_ref(), id, &patch).await?;
    Ok(Json(updated))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    gateway::delete_payment(state.store.as_ref(), id).await?;
    Ok(Json(serde_json::json!({"message": "payment deleted"})))
}

async fn payment_for_enrollment(
    State(state): State<AppState>,
    Path(enrollment_id): Path<Uuid>,
) -> Result<Json<Option<Payment>>, ApiError> {
    let payment = gateway::payment_for_enrollment(state.store.as_ref(), enrollment_id).await?;
    Ok(Json(payment))
}

//! Payment query gateway: translates each request into one filtered store
//! call and maps the result (or absence of one) into a typed response or
//! failure. No state is held across calls.

use {
    crate::domain::{
        error::GatewayError,
        payment::{NewPayment, Payment, PaymentAmount, PaymentFilter, PaymentPatch},
        store::PaymentStore,
    },
    uuid::Uuid,
};

/// List payments, applying an equality condition for each supplied filter.
/// Absent filters impose no condition; no match means an empty list.
pub async fn list_payments(
    store: &dyn PaymentStore,
    class_id: Option<Uuid>,
    student_id: Option<Uuid>,
    status: Option<String>,
) -> Result<Vec<Payment>, GatewayError> {
    store
        .select(&PaymentFilter {
            class_id,
            student_id,
            status,
            ..PaymentFilter::default()
        })
        .await
}

/// Fetch by exact id. Zero rows is NotFound; with more than one (the store
/// should prevent this), the first row wins.
pub async fn get_payment(store: &dyn PaymentStore, id: Uuid) -> Result<Payment, GatewayError> {
    store
        .select(&PaymentFilter::by_id(id))
        .await?
        .into_iter()
        .next()
        .ok_or(GatewayError::NotFound)
}

/// Record a payment. Status and payment date are server-assigned — see
/// [`NewPayment::recorded_now`].
pub async fn create_payment(
    store: &dyn PaymentStore,
    class_id: Uuid,
    enrollment_id: Uuid,
    student_id: Uuid,
    amount: PaymentAmount,
) -> Result<Payment, GatewayError> {
    let created = store
        .insert(&NewPayment::recorded_now(
            class_id,
            enrollment_id,
            student_id,
            amount,
        ))
        .await?;
    tracing::info!(payment_id = %created.id, enrollment_id = %enrollment_id, "payment recorded");
    Ok(created)
}

/// Partial update: only the supplied fields change. An empty patch is
/// rejected before touching the store, since there is nothing to set.
pub async fn update_payment(
    store: &dyn PaymentStore,
    id: Uuid,
    patch: &PaymentPatch,
) -> Result<Payment, GatewayError> {
    if patch.is_empty() {
        return Err(GatewayError::Client("no fields to update".to_string()));
    }
    store
        .update(id, patch)
        .await?
        .ok_or(GatewayError::NotFound)
}

/// Delete by id. Returns only an acknowledgement, not the deleted record.
pub async fn delete_payment(store: &dyn PaymentStore, id: Uuid) -> Result<(), GatewayError> {
    if store.delete(id).await? {
        tracing::info!(payment_id = %id, "payment deleted");
        Ok(())
    } else {
        Err(GatewayError::NotFound)
    }
}

/// Fetch the payment for an enrollment, if any. Unlike [`get_payment`],
/// absence is a successful `None` — an enrollment may not have been paid yet.
pub async fn payment_for_enrollment(
    store: &dyn PaymentStore,
    enrollment_id: Uuid,
) -> Result<Option<Payment>, GatewayError> {
    Ok(store
        .select(&PaymentFilter::by_enrollment(enrollment_id))
        .await?
        .into_iter()
        .next())
}

use {
    super::error::GatewayError,
    super::payment::{NewPayment, Payment, PaymentFilter, PaymentPatch},
    async_trait::async_trait,
    uuid::Uuid,
};

/// The remote `payments` collection, injected as a capability so a test
/// double can stand in for the managed store.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Apply every supplied filter field as an equality condition
    /// (conjunction), ordered by `created_at` descending. An empty result
    /// is not an error.
    async fn select(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, GatewayError>;

    /// Insert one row and return it, including the store-assigned `id`
    /// and `created_at`.
    async fn insert(&self, new: &NewPayment) -> Result<Payment, GatewayError>;

    /// Apply only the supplied patch fields. `None` when zero rows matched.
    async fn update(
        &self,
        id: Uuid,
        patch: &PaymentPatch,
    ) -> Result<Option<Payment>, GatewayError>;

    /// `false` when zero rows were deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, GatewayError>;
}

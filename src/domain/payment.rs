use {
    super::error::GatewayError,
    chrono::{DateTime, NaiveDate, Utc},
    derive_more::Display,
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Status written by this layer when a payment is recorded. The column is
/// free-form text; callers may move it elsewhere via update.
pub const STATUS_PAID: &str = "paid";

/// Non-negative decimal amount. Validated at construction and on
/// deserialize, so a negative amount never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct PaymentAmount(Decimal);

impl PaymentAmount {
    pub fn new(value: Decimal) -> Result<Self, GatewayError> {
        if value < Decimal::ZERO {
            return Err(GatewayError::Client(format!(
                "amount cannot be negative, got: {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PaymentAmount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PaymentAmount> for Decimal {
    fn from(amount: PaymentAmount) -> Decimal {
        amount.0
    }
}

/// Full payment record as held by the store (for reads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub class_id: Uuid,
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub amount: PaymentAmount,
    pub status: String,
    pub payment_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// For INSERT — `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub class_id: Uuid,
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub amount: PaymentAmount,
    pub status: String,
    pub payment_date: NaiveDate,
}

impl NewPayment {
    /// A payment recorded at request time: status is forced to `"paid"` and
    /// the payment date to the current date. Creation models "payment
    /// recorded now as paid" — callers cannot override either field.
    pub fn recorded_now(
        class_id: Uuid,
        enrollment_id: Uuid,
        student_id: Uuid,
        amount: PaymentAmount,
    ) -> Self {
        Self {
            class_id,
            enrollment_id,
            student_id,
            amount,
            status: STATUS_PAID.to_string(),
            payment_date: Utc::now().date_naive(),
        }
    }
}

/// Partial update with exclude-unset semantics: absent fields are left
/// untouched, never nulled. Unknown fields (including the immutable
/// identifiers) are rejected by the schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaymentPatch {
    pub status: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<PaymentAmount>,
}

impl PaymentPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.payment_date.is_none() && self.amount.is_none()
    }
}

/// Equality conditions applied conjunctively; an absent field imposes no
/// condition. `matches` is the reference semantics every store
/// implementation must follow.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub enrollment_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub status: Option<String>,
}

impl PaymentFilter {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_enrollment(enrollment_id: Uuid) -> Self {
        Self {
            enrollment_id: Some(enrollment_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        self.id.is_none_or(|id| payment.id == id)
            && self.class_id.is_none_or(|c| payment.class_id == c)
            && self
                .enrollment_id
                .is_none_or(|e| payment.enrollment_id == e)
            && self.student_id.is_none_or(|s| payment.student_id == s)
            && self.status.as_deref().is_none_or(|s| payment.status == s)
    }
}

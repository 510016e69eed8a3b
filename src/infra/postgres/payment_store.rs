use {
    crate::domain::{
        error::GatewayError,
        payment::{NewPayment, Payment, PaymentAmount, PaymentFilter, PaymentPatch},
        store::PaymentStore,
    },
    async_trait::async_trait,
    chrono::{DateTime, NaiveDate, Utc},
    rust_decimal::Decimal,
    sqlx::{PgPool, Postgres, QueryBuilder},
    uuid::Uuid,
};

const COLUMNS: &str =
    "id, class_id, enrollment_id, student_id, amount, status, payment_date, created_at";

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    class_id: Uuid,
    enrollment_id: Uuid,
    student_id: Uuid,
    amount: Decimal,
    status: String,
    payment_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = GatewayError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: row.id,
            class_id: row.class_id,
            enrollment_id: row.enrollment_id,
            student_id: row.student_id,
            // CHECK (amount >= 0) holds in the table; this re-validates on
            // the way out so the invariant never leaks past the boundary.
            amount: PaymentAmount::new(row.amount)?,
            status: row.status,
            payment_date: row.payment_date,
            created_at: row.created_at,
        })
    }
}

/// `PaymentStore` backed by the managed Postgres instance.
pub struct PgPaymentStore {
    pool: PgPool,
}

impl PgPaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStore for PgPaymentStore {
    async fn select(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, GatewayError> {
        // TRUE anchors the optional conjuncts.
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM payments WHERE TRUE"));
        if let Some(id) = filter.id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(class_id) = filter.class_id {
            qb.push(" AND class_id = ").push_bind(class_id);
        }
        if let Some(enrollment_id) = filter.enrollment_id {
            qb.push(" AND enrollment_id = ").push_bind(enrollment_id);
        }
        if let Some(student_id) = filter.student_id {
            qb.push(" AND student_id = ").push_bind(student_id);
        }
        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
        qb.push(" ORDER BY created_at DESC");

        let rows: Vec<PaymentRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn insert(&self, new: &NewPayment) -> Result<Payment, GatewayError> {
        let row: PaymentRow = sqlx::query_as(
            r#"
            INSERT INTO payments (class_id, enrollment_id, student_id, amount, status, payment_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, class_id, enrollment_id, student_id, amount, status, payment_date, created_at
            "#,
        )
        .bind(new.class_id)
        .bind(new.enrollment_id)
        .bind(new.student_id)
        .bind(new.amount.value())
        .bind(&new.status)
        .bind(new.payment_date)
        .fetch_one(&self.pool)
        .await?;

        Payment::try_from(row)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &PaymentPatch,
    ) -> Result<Option<Payment>, GatewayError> {
        // The gateway rejects empty patches before this point; an empty SET
        // list would be invalid SQL and surfaces as a store error.
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE payments SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(status) = &patch.status {
                set.push("status = ").push_bind_unseparated(status.clone());
            }
            if let Some(payment_date) = patch.payment_date {
                set.push("payment_date = ")
                    .push_bind_unseparated(payment_date);
            }
            if let Some(amount) = patch.amount {
                set.push("amount = ").push_bind_unseparated(amount.value());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {COLUMNS}"));

        let row: Option<PaymentRow> = qb.build_query_as().fetch_optional(&self.pool).await?;
        row.map(Payment::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GatewayError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

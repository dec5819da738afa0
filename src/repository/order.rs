//! Order, payment and payment-method repository

use crate::domain::{NewOrder, Order, OrderWithPayment, Payment, PaymentMethod};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_payment_method(&self, id: &str) -> Result<Option<PaymentMethod>>;
    async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>>;
    /// Inserts the order and, when present, its payment in one transaction
    async fn create(&self, input: &NewOrder) -> Result<OrderWithPayment>;
    async fn list(&self) -> Result<Vec<OrderWithPayment>>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<OrderWithPayment>>;
}

pub struct OrderRepositoryImpl {
    pool: MySqlPool,
}

impl OrderRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn attach_payments(&self, orders: Vec<Order>) -> Result<Vec<OrderWithPayment>> {
        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let payment = sqlx::query_as::<_, Payment>(
                r#"
                SELECT id, order_id, payment_method_id, provider_transaction_id, amount, created_at
                FROM payments
                WHERE order_id = ?
                "#,
            )
            .bind(order.id)
            .fetch_optional(&self.pool)
            .await?;
            result.push(OrderWithPayment { order, payment });
        }
        Ok(result)
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn find_payment_method(&self, id: &str) -> Result<Option<PaymentMethod>> {
        let method =
            sqlx::query_as::<_, PaymentMethod>("SELECT id, provider FROM payment_methods WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(method)
    }

    async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        let methods =
            sqlx::query_as::<_, PaymentMethod>("SELECT id, provider FROM payment_methods ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(methods)
    }

    async fn create(&self, input: &NewOrder) -> Result<OrderWithPayment> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (user_id, course_id, amount, status, created_at)
            VALUES (?, ?, ?, ?, NOW())
            "#,
        )
        .bind(input.user_id)
        .bind(input.course_id)
        .bind(input.amount)
        .bind(input.status)
        .execute(&mut *tx)
        .await?;
        let order_id = result.last_insert_id() as i64;

        if let Some(payment) = &input.payment {
            sqlx::query(
                r#"
                INSERT INTO payments (order_id, payment_method_id, provider_transaction_id, amount, created_at)
                VALUES (?, ?, ?, ?, NOW())
                "#,
            )
            .bind(order_id)
            .bind(&payment.payment_method_id)
            .bind(&payment.provider_transaction_id)
            .bind(input.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, course_id, amount, status, created_at FROM orders WHERE id = ?",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create order")))?;

        self.attach_payments(vec![order])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create order")))
    }

    async fn list(&self) -> Result<Vec<OrderWithPayment>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, course_id, amount, status, created_at FROM orders ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_payments(orders).await
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<OrderWithPayment>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, course_id, amount, status, created_at
            FROM orders
            WHERE user_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_payments(orders).await
    }
}

//! Order placement and payment-method reads

use crate::domain::{CreateOrderInput, NewOrder, NewPayment, OrderWithPayment, PaymentMethod};
use crate::error::{AppError, Result};
use crate::repository::{CourseRepository, OrderRepository};
use metrics::counter;
use std::sync::Arc;
use validator::Validate;

pub struct OrderService<O: OrderRepository, C: CourseRepository> {
    repo: Arc<O>,
    course_repo: Arc<C>,
}

impl<O: OrderRepository, C: CourseRepository> OrderService<O, C> {
    pub fn new(repo: Arc<O>, course_repo: Arc<C>) -> Self {
        Self { repo, course_repo }
    }

    /// Place an order for a course at its current price.
    ///
    /// A payment row is written with the order only when both the payment
    /// method and the provider transaction id are supplied.
    pub async fn create(&self, user_id: i64, input: CreateOrderInput) -> Result<OrderWithPayment> {
        input.validate()?;

        let course = self
            .course_repo
            .find_by_id(input.course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if let Some(method_id) = input.payment_method_id.as_deref() {
            if self.repo.find_payment_method(method_id).await?.is_none() {
                return Err(AppError::BadRequest("Invalid payment method".to_string()));
            }
        }

        let payment = match (input.payment_method_id, input.provider_transaction_id) {
            (Some(payment_method_id), Some(provider_transaction_id)) => Some(NewPayment {
                payment_method_id,
                provider_transaction_id,
            }),
            _ => None,
        };

        let new_order = NewOrder {
            user_id,
            course_id: course.id,
            amount: course.price,
            status: input.status.unwrap_or_default(),
            payment,
        };
        let created = self.repo.create(&new_order).await?;

        counter!("lms_orders_total", "status" => created.order.status.to_string()).increment(1);
        tracing::info!(
            order_id = created.order.id,
            user_id,
            course_id = course.id,
            "Order created"
        );

        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<OrderWithPayment>> {
        self.repo.list().await
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<OrderWithPayment>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        self.repo.list_payment_methods().await
    }
}

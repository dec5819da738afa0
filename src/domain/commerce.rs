//! Orders, payments, carts and wishlists

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "failed" => Ok(OrderStatus::Failed),
            "refunded" => Ok(OrderStatus::Refunded),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Failed => write!(f, "failed"),
            OrderStatus::Refunded => write!(f, "refunded"),
        }
    }
}

crate::impl_mysql_string_enum!(OrderStatus);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub payment_method_id: String,
    pub provider_transaction_id: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PaymentMethod {
    pub id: String,
    pub provider: String,
}

/// Payment methods inserted by `lms-core seed`
pub const DEFAULT_PAYMENT_METHODS: [(&str, &str); 3] = [
    ("paypal", "PayPal"),
    ("stripe", "Stripe"),
    ("bank_transfer", "Bank Transfer"),
];

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderInput {
    #[validate(range(min = 1, message = "Course ID must be an integer"))]
    pub course_id: i64,
    pub status: Option<OrderStatus>,
    pub payment_method_id: Option<String>,
    pub provider_transaction_id: Option<String>,
}

/// Order row plus its optional payment, written in one transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub course_id: i64,
    pub amount: i64,
    pub status: OrderStatus,
    pub payment: Option<NewPayment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub payment_method_id: String,
    pub provider_transaction_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithPayment {
    #[serde(flatten)]
    pub order: Order,
    pub payment: Option<Payment>,
}

// ============================================================
// Cart and wishlist
// ============================================================

/// Which per-user course set a membership row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavedListKind {
    Cart,
    Wishlist,
}

impl SavedListKind {
    pub fn table(&self) -> &'static str {
        match self {
            SavedListKind::Cart => "user_carts",
            SavedListKind::Wishlist => "wishlists",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SavedListKind::Cart => "cart",
            SavedListKind::Wishlist => "wishlist",
        }
    }
}

/// (user, course) membership row of a cart or wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SavedCourse {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavedCourseInput {
    #[validate(range(min = 1, message = "course_id is required"))]
    pub course_id: i64,
}

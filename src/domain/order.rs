use chrono::{DateTime, Utc};

use super::errors::DomainError;

#[derive(Debug, Clone)]
pub struct Widget {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub inventory_level: i32,
    /// Price in minor currency units.
    pub price: i64,
    pub image: String,
    pub is_recurring: bool,
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    pub id: i32,
    pub amount: i64,
    pub currency: String,
    pub last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub payment_intent: String,
    pub bank_return_code: String,
}

/// An order joined with its widget, transaction and customer. The nested
/// records are `None` when the reference is null or dangling.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub widget_id: i32,
    pub transaction_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub status_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub widget: Option<WidgetSummary>,
    pub transaction: Option<TransactionSummary>,
    pub customer: Option<Customer>,
}

/// Orders are split by the recurring flag of the widget they were placed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Order,
    Subscription,
}

impl OrderKind {
    pub fn is_recurring(self) -> bool {
        matches!(self, OrderKind::Subscription)
    }
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub current_page: i64,
    pub page_size: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl OrderPage {
    /// `last_page` is `total_records / page_size`, truncated.
    pub fn new(orders: Vec<Order>, current_page: i64, page_size: i64, total_records: i64) -> Self {
        Self {
            orders,
            current_page,
            page_size,
            last_page: total_records / page_size,
            total_records,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Cleared = 1,
    Refunded = 2,
    Cancelled = 3,
}

impl OrderStatus {
    pub fn id(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = DomainError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(OrderStatus::Cleared),
            2 => Ok(OrderStatus::Refunded),
            3 => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending = 1,
    PendingCapture = 2,
    Cleared = 3,
    Declined = 4,
    Refunded = 5,
}

impl TransactionStatus {
    pub fn id(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: i64,
    pub currency: String,
    pub last_four: String,
    pub bank_return_code: String,
    pub status: TransactionStatus,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub payment_intent: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub widget_id: i32,
    pub transaction_id: i32,
    pub customer_id: i32,
    pub status: OrderStatus,
    pub quantity: i32,
    pub amount: i64,
}

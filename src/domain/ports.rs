use async_trait::async_trait;

use super::errors::DomainError;
use super::order::{NewCustomer, NewOrder, NewTransaction, Order, OrderKind, OrderStatus, Widget};
use super::payment::{PaymentIntent, PaymentMethod};
use super::user::{NewUser, User};

/// Storage for widgets and the records a checkout produces.
///
/// Implementations are blocking; callers on the async side must move calls
/// onto a blocking thread.
pub trait OrderRepository: Send + Sync + 'static {
    fn get_widget(&self, id: i32) -> Result<Option<Widget>, DomainError>;
    fn insert_customer(&self, customer: NewCustomer) -> Result<i32, DomainError>;
    fn insert_transaction(&self, txn: NewTransaction) -> Result<i32, DomainError>;
    fn insert_order(&self, order: NewOrder) -> Result<i32, DomainError>;
    fn find_order(&self, id: i32) -> Result<Option<Order>, DomainError>;
    fn list_orders(&self, kind: OrderKind) -> Result<Vec<Order>, DomainError>;
    /// Returns up to `limit` orders starting at `offset`, and the total number
    /// of matching orders.
    fn list_orders_page(
        &self,
        kind: OrderKind,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Order>, i64), DomainError>;
    fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<(), DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    fn insert_user(&self, user: NewUser) -> Result<i32, DomainError>;
    fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), DomainError>;
}

/// Read access to the external payment processor.
#[async_trait]
pub trait PaymentProcessor: Send + Sync + 'static {
    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, DomainError>;
    async fn retrieve_payment_method(&self, id: &str) -> Result<PaymentMethod, DomainError>;
}

//! In-memory ports and mocks shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    Customer, NewCustomer, NewOrder, NewTransaction, Order, OrderKind, OrderStatus,
    TransactionSummary, Widget, WidgetSummary,
};
use crate::domain::payment::{PaymentIntent, PaymentMethod};
use crate::domain::ports::{OrderRepository, PaymentProcessor, UserRepository};
use crate::domain::user::{NewUser, User};

mock! {
    pub Processor {}

    #[async_trait]
    impl PaymentProcessor for Processor {
        async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, DomainError>;
        async fn retrieve_payment_method(&self, id: &str) -> Result<PaymentMethod, DomainError>;
    }
}

#[derive(Default)]
struct Tables {
    widgets: Vec<Widget>,
    customers: Vec<(i32, NewCustomer)>,
    transactions: Vec<(i32, NewTransaction)>,
    orders: Vec<(i32, NewOrder, i32)>,
    fail_order_inserts: bool,
}

/// Keeps rows in vectors; ids start at 1 per table like a fresh sequence.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    tables: Mutex<Tables>,
}

impl InMemoryOrderRepository {
    pub fn with_widgets(widgets: Vec<Widget>) -> Self {
        let repo = Self::default();
        repo.tables.lock().unwrap().widgets = widgets;
        repo
    }

    pub fn fail_order_inserts(&self) {
        self.tables.lock().unwrap().fail_order_inserts = true;
    }

    pub fn customers(&self) -> Vec<(i32, NewCustomer)> {
        self.tables.lock().unwrap().customers.clone()
    }

    pub fn transactions(&self) -> Vec<(i32, NewTransaction)> {
        self.tables.lock().unwrap().transactions.clone()
    }

    pub fn orders(&self) -> Vec<(i32, NewOrder)> {
        self.tables
            .lock()
            .unwrap()
            .orders
            .iter()
            .map(|(id, order, _)| (*id, order.clone()))
            .collect()
    }

    fn joined(tables: &Tables, id: i32, order: &NewOrder, status_id: i32) -> Order {
        let now = Utc::now();
        Order {
            id,
            widget_id: order.widget_id,
            transaction_id: Some(order.transaction_id),
            customer_id: Some(order.customer_id),
            status_id,
            quantity: order.quantity,
            amount: order.amount,
            created_at: now,
            updated_at: now,
            widget: tables
                .widgets
                .iter()
                .find(|w| w.id == order.widget_id)
                .map(|w| WidgetSummary {
                    id: w.id,
                    name: w.name.clone(),
                }),
            transaction: tables
                .transactions
                .iter()
                .find(|(tid, _)| *tid == order.transaction_id)
                .map(|(tid, t)| TransactionSummary {
                    id: *tid,
                    amount: t.amount,
                    currency: t.currency.clone(),
                    last_four: t.last_four.clone(),
                    expiry_month: t.expiry_month,
                    expiry_year: t.expiry_year,
                    payment_intent: t.payment_intent.clone(),
                    bank_return_code: t.bank_return_code.clone(),
                }),
            customer: tables
                .customers
                .iter()
                .find(|(cid, _)| *cid == order.customer_id)
                .map(|(cid, c)| Customer {
                    id: *cid,
                    first_name: c.first_name.clone(),
                    last_name: c.last_name.clone(),
                    email: c.email.clone(),
                }),
        }
    }

    fn matching(&self, kind: OrderKind) -> Vec<Order> {
        let tables = self.tables.lock().unwrap();
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .map(|(id, order, status_id)| Self::joined(&tables, *id, order, *status_id))
            .filter(|o| {
                o.widget
                    .as_ref()
                    .and_then(|w| tables.widgets.iter().find(|x| x.id == w.id))
                    .is_some_and(|w| w.is_recurring == kind.is_recurring())
            })
            .collect();
        // Newest first; ids grow with insertion time here.
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        orders
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get_widget(&self, id: i32) -> Result<Option<Widget>, DomainError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .widgets
            .iter()
            .find(|w| w.id == id)
            .cloned())
    }

    fn insert_customer(&self, customer: NewCustomer) -> Result<i32, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.customers.len() as i32 + 1;
        tables.customers.push((id, customer));
        Ok(id)
    }

    fn insert_transaction(&self, txn: NewTransaction) -> Result<i32, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.transactions.len() as i32 + 1;
        tables.transactions.push((id, txn));
        Ok(id)
    }

    fn insert_order(&self, order: NewOrder) -> Result<i32, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.fail_order_inserts {
            return Err(DomainError::Internal(
                "insert or update on table \"orders\" violates foreign key constraint".to_string(),
            ));
        }
        let id = tables.orders.len() as i32 + 1;
        let status_id = order.status.id();
        tables.orders.push((id, order, status_id));
        Ok(id)
    }

    fn find_order(&self, id: i32) -> Result<Option<Order>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .find(|(oid, _, _)| *oid == id)
            .map(|(oid, order, status_id)| Self::joined(&tables, *oid, order, *status_id)))
    }

    fn list_orders(&self, kind: OrderKind) -> Result<Vec<Order>, DomainError> {
        Ok(self.matching(kind))
    }

    fn list_orders_page(
        &self,
        kind: OrderKind,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Order>, i64), DomainError> {
        let all = self.matching(kind);
        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect();
        Ok((items, total))
    }

    fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .orders
            .iter_mut()
            .find(|(oid, _, _)| *oid == id)
            .ok_or(DomainError::NotFound("Order"))?;
        row.2 = status.id();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn password_of(&self, user_id: i32) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.password.clone())
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    fn insert_user(&self, user: NewUser) -> Result<i32, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::InvalidInput(format!(
                "{} already exists",
                user.email
            )));
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        users.push(User {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password: user.password,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(DomainError::NotFound("User"))?;
        user.password = password_hash.to_string();
        Ok(())
    }
}

pub fn widget(id: i32, name: &str, is_recurring: bool) -> Widget {
    let now = Utc::now();
    Widget {
        id,
        name: name.to_string(),
        description: format!("{name} description"),
        inventory_level: 10,
        price: 1000,
        image: String::new(),
        is_recurring,
        plan_id: if is_recurring {
            "price_bronze".to_string()
        } else {
            String::new()
        },
        created_at: now,
        updated_at: now,
    }
}

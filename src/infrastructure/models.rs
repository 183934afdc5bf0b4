use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::order::{Customer, Order, TransactionSummary, Widget, WidgetSummary};
use crate::domain::user::User;
use crate::schema::{customers, orders, transactions, users, widgets};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = widgets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WidgetRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub inventory_level: i32,
    pub price: i64,
    pub image: Option<String>,
    pub is_recurring: bool,
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WidgetRow> for Widget {
    fn from(w: WidgetRow) -> Self {
        Widget {
            id: w.id,
            name: w.name,
            description: w.description,
            inventory_level: w.inventory_level,
            price: w.price,
            image: w.image.unwrap_or_default(),
            is_recurring: w.is_recurring,
            plan_id: w.plan_id,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = widgets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WidgetSummaryRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionSummaryRow {
    pub id: i32,
    pub amount: i64,
    pub currency: String,
    pub last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub payment_intent: String,
    pub bank_return_code: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransactionRow {
    pub amount: i64,
    pub currency: String,
    pub last_four: String,
    pub bank_return_code: String,
    pub transaction_status_id: i32,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub payment_intent: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub widget_id: i32,
    pub transaction_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub status_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub widget_id: i32,
    pub transaction_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub status_id: i32,
    pub quantity: i32,
    pub amount: i64,
}

/// One row of `orders LEFT JOIN widgets LEFT JOIN transactions LEFT JOIN customers`.
pub type OrderJoinRow = (
    OrderRow,
    Option<WidgetSummaryRow>,
    Option<TransactionSummaryRow>,
    Option<CustomerRow>,
);

pub fn order_from_join((o, w, t, c): OrderJoinRow) -> Order {
    Order {
        id: o.id,
        widget_id: o.widget_id,
        transaction_id: o.transaction_id,
        customer_id: o.customer_id,
        status_id: o.status_id,
        quantity: o.quantity,
        amount: o.amount,
        created_at: o.created_at,
        updated_at: o.updated_at,
        widget: w.map(|w| WidgetSummary {
            id: w.id,
            name: w.name,
        }),
        transaction: t.map(|t| TransactionSummary {
            id: t.id,
            amount: t.amount,
            currency: t.currency,
            last_four: t.last_four,
            expiry_month: t.expiry_month,
            expiry_year: t.expiry_year,
            payment_intent: t.payment_intent,
            bank_return_code: t.bank_return_code,
        }),
        customer: c.map(|c| Customer {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
        }),
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<UserRow> for User {
    fn from(u: UserRow) -> Self {
        User {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            password: u.password,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

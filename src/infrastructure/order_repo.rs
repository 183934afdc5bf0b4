use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewCustomer, NewOrder, NewTransaction, Order, OrderKind, OrderStatus, Widget};
use crate::domain::ports::OrderRepository;
use crate::schema::{customers, orders, transactions, widgets};

use super::models::{
    order_from_join, CustomerRow, NewCustomerRow, NewOrderRow, NewTransactionRow, OrderJoinRow,
    OrderRow, TransactionSummaryRow, WidgetRow, WidgetSummaryRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DomainError::InvalidInput(info.message().to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn get_widget(&self, id: i32) -> Result<Option<Widget>, DomainError> {
        let mut conn = self.pool.get()?;

        let widget = widgets::table
            .find(id)
            .select(WidgetRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(widget.map(Widget::from))
    }

    fn insert_customer(&self, customer: NewCustomer) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                first_name: customer.first_name,
                last_name: customer.last_name,
                email: customer.email,
            })
            .returning(customers::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn insert_transaction(&self, txn: NewTransaction) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(transactions::table)
            .values(&NewTransactionRow {
                amount: txn.amount,
                currency: txn.currency,
                last_four: txn.last_four,
                bank_return_code: txn.bank_return_code,
                transaction_status_id: txn.status.id(),
                expiry_month: txn.expiry_month,
                expiry_year: txn.expiry_year,
                payment_intent: txn.payment_intent,
                payment_method: txn.payment_method,
            })
            .returning(transactions::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn insert_order(&self, order: NewOrder) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                widget_id: order.widget_id,
                transaction_id: Some(order.transaction_id),
                customer_id: Some(order.customer_id),
                status_id: order.status.id(),
                quantity: order.quantity,
                amount: order.amount,
            })
            .returning(orders::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn find_order(&self, id: i32) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .left_join(widgets::table)
            .left_join(transactions::table)
            .left_join(customers::table)
            .filter(orders::id.eq(id))
            .select((
                OrderRow::as_select(),
                Option::<WidgetSummaryRow>::as_select(),
                Option::<TransactionSummaryRow>::as_select(),
                Option::<CustomerRow>::as_select(),
            ))
            .first::<OrderJoinRow>(&mut conn)
            .optional()?;

        Ok(row.map(order_from_join))
    }

    fn list_orders(&self, kind: OrderKind) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .left_join(widgets::table)
            .left_join(transactions::table)
            .left_join(customers::table)
            .filter(widgets::is_recurring.eq(kind.is_recurring()))
            .order(orders::created_at.desc())
            .select((
                OrderRow::as_select(),
                Option::<WidgetSummaryRow>::as_select(),
                Option::<TransactionSummaryRow>::as_select(),
                Option::<CustomerRow>::as_select(),
            ))
            .load::<OrderJoinRow>(&mut conn)?;

        Ok(rows.into_iter().map(order_from_join).collect())
    }

    fn list_orders_page(
        &self,
        kind: OrderKind,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Order>, i64), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = orders::table
                .left_join(widgets::table)
                .left_join(transactions::table)
                .left_join(customers::table)
                .filter(widgets::is_recurring.eq(kind.is_recurring()))
                .order(orders::created_at.desc())
                .select((
                    OrderRow::as_select(),
                    Option::<WidgetSummaryRow>::as_select(),
                    Option::<TransactionSummaryRow>::as_select(),
                    Option::<CustomerRow>::as_select(),
                ))
                .limit(limit)
                .offset(offset)
                .load::<OrderJoinRow>(conn)?;

            let total: i64 = orders::table
                .left_join(widgets::table)
                .filter(widgets::is_recurring.eq(kind.is_recurring()))
                .count()
                .get_result(conn)?;

            Ok((rows.into_iter().map(order_from_join).collect(), total))
        })
    }

    fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(orders::table.find(id))
            .set((
                orders::status_id.eq(status.id()),
                orders::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(DomainError::NotFound("Order"));
        }
        Ok(())
    }
}

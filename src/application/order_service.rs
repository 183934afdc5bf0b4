use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderKind, OrderPage, OrderStatus, Widget};
use crate::domain::ports::OrderRepository;

/// Largest page a listing returns; bigger requests are capped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Widget lookups and order reporting.
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    pub fn get_widget(&self, id: i32) -> Result<Widget, DomainError> {
        self.repo
            .get_widget(id)?
            .ok_or(DomainError::NotFound("Widget"))
    }

    /// Like [`get_widget`](Self::get_widget), but only for recurring widgets.
    pub fn get_plan(&self, id: i32) -> Result<Widget, DomainError> {
        let widget = self.get_widget(id)?;
        if !widget.is_recurring {
            return Err(DomainError::InvalidInput(format!(
                "widget {id} is not a subscription plan"
            )));
        }
        Ok(widget)
    }

    pub fn list_orders(&self, kind: OrderKind) -> Result<Vec<Order>, DomainError> {
        self.repo.list_orders(kind)
    }

    pub fn list_orders_paginated(
        &self,
        kind: OrderKind,
        page: i64,
        page_size: i64,
    ) -> Result<OrderPage, DomainError> {
        if page < 1 {
            return Err(DomainError::InvalidInput("page must be at least 1".into()));
        }
        if page_size < 1 {
            return Err(DomainError::InvalidInput(
                "page_size must be at least 1".into(),
            ));
        }
        let page_size = page_size.min(MAX_PAGE_SIZE);
        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| DomainError::InvalidInput(format!("page {page} is out of range")))?;

        let (orders, total) = self.repo.list_orders_page(kind, offset, page_size)?;
        Ok(OrderPage::new(orders, page, page_size, total))
    }

    pub fn get_order(&self, id: i32) -> Result<Order, DomainError> {
        self.repo.find_order(id)?.ok_or(DomainError::NotFound("Order"))
    }

    pub fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<(), DomainError> {
        self.repo.update_order_status(id, status)
    }
}

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::order::{
    Customer, Order, OrderKind, OrderPage, OrderStatus, TransactionSummary, Widget, WidgetSummary,
};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WidgetResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub inventory_level: i32,
    /// Price in minor currency units, e.g. cents.
    pub price: i64,
    pub image: String,
    pub is_recurring: bool,
    pub plan_id: String,
}

impl From<Widget> for WidgetResponse {
    fn from(w: Widget) -> Self {
        Self {
            id: w.id,
            name: w.name,
            description: w.description,
            inventory_level: w.inventory_level,
            price: w.price,
            image: w.image,
            is_recurring: w.is_recurring,
            plan_id: w.plan_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WidgetSummaryResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub amount: i64,
    pub currency: String,
    pub last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub payment_intent: String,
    pub bank_return_code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub widget_id: i32,
    pub transaction_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub status_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub created_at: String,
    pub updated_at: String,
    pub widget: Option<WidgetSummaryResponse>,
    pub transaction: Option<TransactionResponse>,
    pub customer: Option<CustomerResponse>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            widget_id: o.widget_id,
            transaction_id: o.transaction_id,
            customer_id: o.customer_id,
            status_id: o.status_id,
            quantity: o.quantity,
            amount: o.amount,
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
            widget: o
                .widget
                .map(|WidgetSummary { id, name }| WidgetSummaryResponse { id, name }),
            transaction: o.transaction.map(|t: TransactionSummary| TransactionResponse {
                id: t.id,
                amount: t.amount,
                currency: t.currency,
                last_four: t.last_four,
                expiry_month: t.expiry_month,
                expiry_year: t.expiry_year,
                payment_intent: t.payment_intent,
                bank_return_code: t.bank_return_code,
            }),
            customer: o.customer.map(|c: Customer| CustomerResponse {
                id: c.id,
                first_name: c.first_name,
                last_name: c.last_name,
                email: c.email,
            }),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of orders per page. Defaults to 10, capped at 100.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedOrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub current_page: i64,
    pub page_size: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl From<OrderPage> for PaginatedOrdersResponse {
    fn from(p: OrderPage) -> Self {
        Self {
            orders: p.orders.into_iter().map(OrderResponse::from).collect(),
            current_page: p.current_page,
            page_size: p.page_size,
            last_page: p.last_page,
            total_records: p.total_records,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// 1 = cleared, 2 = refunded, 3 = cancelled
    pub status_id: i32,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/widget/{id}
#[utoipa::path(
    get,
    path = "/api/widget/{id}",
    params(
        ("id" = i32, Path, description = "Widget id"),
    ),
    responses(
        (status = 200, description = "Widget found", body = WidgetResponse),
        (status = 404, description = "Widget not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "widgets"
)]
pub async fn get_widget(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let widget = web::block(move || state.orders.get_widget(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(WidgetResponse::from(widget)))
}

async fn list_all(state: web::Data<AppState>, kind: OrderKind) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.list_orders(kind))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn list_page(
    state: web::Data<AppState>,
    kind: OrderKind,
    params: PageParams,
) -> Result<HttpResponse, AppError> {
    let page = web::block(move || {
        state
            .orders
            .list_orders_paginated(kind, params.page, params.page_size)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PaginatedOrdersResponse::from(page)))
}

/// GET /api/admin/orders
///
/// All one-off orders, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    list_all(state, OrderKind::Order).await
}

/// GET /api/admin/orders/paginated
#[utoipa::path(
    get,
    path = "/api/admin/orders/paginated",
    params(PageParams),
    responses(
        (status = 200, description = "One page of orders", body = PaginatedOrdersResponse),
        (status = 400, description = "Invalid page or page size"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders_paginated(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    list_page(state, OrderKind::Order, query.into_inner()).await
}

/// GET /api/admin/subscriptions
///
/// All orders placed for recurring widgets, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/subscriptions",
    responses(
        (status = 200, description = "All subscriptions", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_subscriptions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    list_all(state, OrderKind::Subscription).await
}

/// GET /api/admin/subscriptions/paginated
#[utoipa::path(
    get,
    path = "/api/admin/subscriptions/paginated",
    params(PageParams),
    responses(
        (status = 200, description = "One page of subscriptions", body = PaginatedOrdersResponse),
        (status = 400, description = "Invalid page or page size"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_subscriptions_paginated(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    list_page(state, OrderKind::Subscription, query.into_inner()).await
}

/// GET /api/admin/orders/{id}
#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let order = web::block(move || state.orders.get_order(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /api/admin/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = OrderStatus::try_from(body.status_id)?;

    web::block(move || state.orders.update_order_status(id, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}

pub mod auth;
pub mod checkout;
pub mod orders;
pub mod pages;

use actix_web::web;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::get_widget,
        orders::list_orders,
        orders::list_orders_paginated,
        orders::list_subscriptions,
        orders::list_subscriptions_paginated,
        orders::get_order,
        orders::update_order_status,
        auth::authenticate,
    ),
    components(schemas(
        orders::WidgetResponse,
        orders::OrderResponse,
        orders::PaginatedOrdersResponse,
        orders::UpdateOrderStatusRequest,
        auth::AuthenticateRequest,
        auth::AuthenticateResponse,
    )),
    tags(
        (name = "widgets", description = "Sellable widgets and plans"),
        (name = "orders", description = "Order and subscription reporting"),
        (name = "auth", description = "Back-office authentication"),
    )
)]
pub struct ApiDoc;

/// Registers every page and API route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, req| {
        log::error!("Rejected form posted to {}: {}", req.path(), err);
        err.into()
    }))
    .route("/", web::get().to(pages::home))
    .route("/virtual-terminal", web::get().to(pages::virtual_terminal))
    .route("/widget/{id}", web::get().to(pages::charge_once))
    .route("/plans/{id}", web::get().to(pages::plan))
    .route("/payment-succeeded", web::post().to(checkout::payment_succeeded))
    .route("/receipt", web::get().to(checkout::receipt))
    .service(
        web::scope("/api")
            .route("/widget/{id}", web::get().to(orders::get_widget))
            .route("/authenticate", web::post().to(auth::authenticate))
            .service(
                web::scope("/admin")
                    .route("/orders", web::get().to(orders::list_orders))
                    .route(
                        "/orders/paginated",
                        web::get().to(orders::list_orders_paginated),
                    )
                    .route("/orders/{id}", web::get().to(orders::get_order))
                    .route(
                        "/orders/{id}/status",
                        web::put().to(orders::update_order_status),
                    )
                    .route("/subscriptions", web::get().to(orders::list_subscriptions))
                    .route(
                        "/subscriptions/paginated",
                        web::get().to(orders::list_subscriptions_paginated),
                    ),
            ),
    );
}

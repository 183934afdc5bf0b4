use std::sync::Arc;

use crate::application::checkout_service::CheckoutService;
use crate::application::order_service::OrderService;
use crate::application::user_service::UserService;
use crate::domain::ports::{OrderRepository, PaymentProcessor, UserRepository};

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub checkout: CheckoutService,
    pub orders: OrderService,
    pub users: UserService,
    /// Publishable processor key handed to pages that load the card form.
    pub publishable_key: String,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        processor: Arc<dyn PaymentProcessor>,
        publishable_key: impl Into<String>,
    ) -> Self {
        Self {
            checkout: CheckoutService::new(Arc::clone(&orders), processor),
            orders: OrderService::new(orders),
            users: UserService::new(users),
            publishable_key: publishable_key.into(),
        }
    }
}

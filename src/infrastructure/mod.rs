pub mod models;
pub mod order_repo;
pub mod stripe;
pub mod user_repo;

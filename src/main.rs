use std::io;
use std::sync::Arc;

use dotenvy::dotenv;
use widget_checkout::config::AppConfig;
use widget_checkout::infrastructure::order_repo::DieselOrderRepository;
use widget_checkout::infrastructure::stripe::StripeClient;
use widget_checkout::infrastructure::user_repo::DieselUserRepository;
use widget_checkout::{build_server, create_pool, run_migrations, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let stripe = StripeClient::new(&config.stripe_api_base, &config.stripe_secret)
        .map_err(io::Error::other)?;

    let state = AppState::new(
        Arc::new(DieselOrderRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(stripe),
        config.stripe_key.clone(),
    );

    if let Some(admin) = &config.admin {
        let user_id = state
            .users
            .ensure_user("Admin", "User", &admin.email, &admin.password)
            .map_err(io::Error::other)?;
        log::info!("Back-office account ready (user {})", user_id);
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, config.session_key(), &config.host, config.port)?.await
}

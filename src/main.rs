use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

use quiz_relay::{
    app_state::AppState, config::Config, handlers::configure_routes,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if let Some(var) = config.missing_credentials() {
        log::warn!("{} is not set; quiz generation will fail until it is", var);
    }

    let state = Arc::new(AppState::new(config.clone()).await.map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e.to_string())
    })?);

    log::info!(
        "Server running on {}:{}",
        config.web_server_host,
        config.web_server_port
    );
    log::info!("Config: {} - {}", config.provider, config.model);

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&state)))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(|cfg| configure_routes(cfg, &static_dir))
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}

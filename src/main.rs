use actix_web::{App, HttpServer, middleware, web};

use valentine::auth::session::AdminAuth;
use valentine::config::AppConfig;
use valentine::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let store = match db::open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open response store: {e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let auth = web::Data::new(AdminAuth::from_config(&config));
    let store = web::Data::from(store);
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");
    log::info!("Admin login lives at /{}", config.admin_route_slug);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(auth.clone())
            .app_data(config.clone())
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}

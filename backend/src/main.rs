use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use log::{error, info};
use rent_backend::config::ServerConfig;
use rent_backend::{cors, inference, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Starting San Francisco Rental Price Prediction API");

    let config = ServerConfig::from_env();

    // Chargement du modèle
    let model = match inference::load_model(&config.model_path) {
        Ok(model) => {
            info!(
                "✅ Model {} loaded from {}",
                model.version(),
                config.model_path.display()
            );
            model
        }
        Err(e) => {
            error!("❌ {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let model_data = web::Data::from(model);
    let bind_address = config.bind_address();
    let allowed_origins = config.allowed_origins.clone();

    info!("🌐 Listening on http://{}", bind_address);
    info!("👷 Workers: {}", config.workers);
    if allowed_origins.is_empty() {
        info!("🔒 CORS: no cross-origin access (ALLOWED_ORIGINS empty)");
    } else {
        info!("🔓 CORS origins: {}", allowed_origins.join(", "));
    }
    info!("🔧 Endpoints:");
    info!("   GET  /         - Home");
    info!("   GET  /health   - Health check");
    info!("   POST /predict  - Rent prediction");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors(&allowed_origins))
            .app_data(model_data.clone())
            .configure(routes::configure)
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}

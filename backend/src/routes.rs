use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder, ResponseError};
use log::{error, info, warn};
use rent_schema::PredictionRequest;

use crate::error::ApiError;
use crate::inference::RentModel;
use crate::models::{HealthResponse, HomeResponse, PredictionResponse};

/// Taille maximale d'un corps JSON accepté.
const JSON_LIMIT: usize = 4 * 1024;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(HomeResponse::new())
}

#[get("/health")]
pub async fn health_check(model: web::Data<dyn RentModel>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::ok(model.version()))
}

#[post("/predict")]
pub async fn predict(
    model: web::Data<dyn RentModel>,
    input: web::Json<PredictionRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = input.into_inner();
    info!("Received input: {:?}", request);

    if let Err(e) = request.validate() {
        warn!("Invalid input: {}", e);
        return Err(e.into());
    }

    let model = model.into_inner();
    let version = model.version().to_string();

    let predicted_rent = web::block(move || model.predict(&request))
        .await
        .map_err(|e| {
            error!("Blocking task failed: {}", e);
            ApiError::Internal
        })?
        .map_err(|e| {
            error!("Prediction failed: {}", e);
            ApiError::Internal
        })?;

    info!("Prediction result: {:.2}", predicted_rent);
    Ok(HttpResponse::Ok().json(PredictionResponse::success(predicted_rent, &version)))
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    warn!("No route for {} {}", req.method(), req.path());
    ApiError::NotFound.error_response()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            warn!("Invalid input: {}", err);
            ApiError::InvalidInput(err.to_string()).into()
        })
}

/// Enregistre les routes de l'API ; le modèle doit être fourni via `app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(home)
        .service(health_check)
        .service(predict)
        .default_service(web::route().to(not_found));
}

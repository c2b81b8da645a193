use crate::error::ApiError;
use actix_web::{get, http::header::ContentType, web, HttpResponse, Responder};
use serde_json::json;
use stockpair_common::{Dashboard, Selection};
use tracing::debug;

/// The single page: four widgets and one chart area.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Registers every route, plus a JSON body for malformed query strings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default().error_handler(|err, _req| ApiError::from(err).into()),
    )
    .service(index)
    .service(options)
    .service(figure)
    .service(health);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Options and initial values of the widgets
///
/// ```json
/// {
///     "symbols": ["AAPL", "MSFT"],
///     "years": [2016, 2017],
///     "modes": ["open-close", "volume"],
///     "defaults": { "symbol_a": "AAPL", "symbol_b": "MSFT", "year": 2016, "mode": "open-close" }
/// }
/// ```
#[get("/api/options")]
async fn options(dashboard: web::Data<Dashboard>) -> impl Responder {
    HttpResponse::Ok().json(dashboard.controls())
}

/// Chart for the current selection, e.g.,
///
/// ```text
/// /api/figure?symbol_a=AAPL&symbol_b=MSFT&year=2016&mode=volume
/// ```
#[get("/api/figure")]
async fn figure(
    dashboard: web::Data<Dashboard>,
    selection: web::Query<Selection>,
) -> impl Responder {
    debug!("selection changed: {:?}", *selection);
    HttpResponse::Ok().json(dashboard.on_selection_changed(&selection))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

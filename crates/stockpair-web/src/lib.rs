pub mod config;
pub mod error;
pub mod routes;

use actix_web::{middleware::Logger, web, App, HttpServer};
use stockpair_common::Dashboard;
use tracing::info;

pub use config::ServerConfig;
pub use error::ApiError;

/// Serves the dashboard until the process is stopped.
pub async fn serve(dashboard: Dashboard, config: &ServerConfig) -> std::io::Result<()> {
    let dashboard = web::Data::new(dashboard);

    info!(
        "Dashboard listening on http://{}:{}",
        config.host, config.port
    );

    // run server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(dashboard.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

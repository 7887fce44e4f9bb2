//! Web API shell (actix-web)

pub mod handlers;

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use tracing::info;

use crate::config::Config;

/// Shared per-worker application state
pub struct AppState {
    pub config: Arc<Config>,
}

/// Run the web API until the process is terminated
pub async fn run(config: Config) -> std::io::Result<()> {
    let listen_addr = config.listen_addr.clone();
    let state = web::Data::new(AppState {
        config: Arc::new(config),
    });

    info!("listening on http://{listen_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(web::resource("/").route(web::get().to(handlers::index)))
            .service(web::resource("/api/info").route(web::post().to(handlers::info)))
            .service(web::resource("/api/download").route(web::post().to(handlers::download)))
            .service(
                web::resource("/api/get-file/{filename}")
                    .route(web::get().to(handlers::get_file)),
            )
    })
    .bind(listen_addr.as_str())?
    .run()
    .await
}

//! HTTP API surface: routes the wire protocol onto the simulation core.

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod state;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use state::AppState;
use std::sync::Arc;

/// Builds and runs the HTTP server. Blocks until the server shuts down.
pub async fn run(state: Arc<AppState>, bind_addr: &str, workers: usize) -> std::io::Result<()> {
    HttpServer::new(move || {
        let www_root = state.www_root.clone();
        App::new()
            .app_data(web::Data::from(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(
                web::resource("/api/v1/maps")
                    .route(web::get().to(handlers::list_maps))
                    .route(web::head().to(handlers::list_maps))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/maps/{id}")
                    .route(web::get().to(handlers::get_map))
                    .route(web::head().to(handlers::get_map))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/game/join")
                    .route(web::post().to(handlers::join))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/game/players")
                    .route(web::get().to(handlers::players))
                    .route(web::head().to(handlers::players))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/game/state")
                    .route(web::get().to(handlers::state))
                    .route(web::head().to(handlers::state))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/game/player/action")
                    .route(web::post().to(handlers::player_action))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/game/tick")
                    .route(web::post().to(handlers::tick))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/api/v1/game/records")
                    .route(web::get().to(handlers::records))
                    .route(web::head().to(handlers::records))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(Files::new("/", www_root).index_file("index.html"))
            .default_service(web::route().to(not_found))
    })
    .workers(workers)
    .bind(bind_addr)?
    .run()
    .await
}

async fn not_found() -> actix_web::HttpResponse {
    errors::bad_request_body("no such endpoint")
}

async fn method_not_allowed() -> actix_web::HttpResponse {
    errors::method_not_allowed_body()
}

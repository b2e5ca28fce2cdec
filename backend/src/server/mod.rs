//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
use state_builders::build_http_state;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::{courses, replies, topics, users};
use crate::middleware::Trace;

/// Build and start the HTTP server. Readiness flips once the listener is
/// bound.
///
/// # Errors
/// Returns an [`std::io::Error`] when the listener cannot be bound.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config.db_pool));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(users::register_user)
            .service(users::list_users)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user)
            .service(courses::register_course)
            .service(courses::list_courses)
            .service(courses::get_course)
            .service(courses::update_course)
            .service(courses::delete_course)
            .service(topics::open_topic)
            .service(topics::list_topics)
            .service(topics::get_topic)
            .service(topics::update_topic)
            .service(topics::delete_topic)
            .service(replies::post_reply)
            .service(replies::list_replies)
            .service(replies::get_reply)
            .service(replies::update_reply)
            .service(replies::delete_reply);

        let mut app = App::new()
            .app_data(http_state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    Ok(server.run())
}

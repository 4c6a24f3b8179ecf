//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod follows;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod state;
pub mod timeline;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/v1` API and its JSON error handling on `cfg`.
///
/// Callers provide `web::Data<HttpState>` on the surrounding `App`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(
            web::scope("/v1")
                .service(posts::create_post)
                .service(timeline::timeline)
                .service(follows::follow)
                .service(follows::unfollow)
                .service(users::user_posts)
                .service(users::following)
                .service(users::followers),
        );
}

/// Register health probes on `cfg`.
///
/// Callers provide `web::Data<HealthState>` on the surrounding `App`.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::healthz)
        .service(health::ready)
        .service(health::live);
}

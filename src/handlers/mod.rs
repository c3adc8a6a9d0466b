pub mod health;
pub mod report;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(report::page_config).service(
        web::scope("/api/v1")
            .configure(health::config)
            .configure(report::api_config),
    );
}

use actix_web::{error, web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::services::ReportService;

/// 健康检查结果
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// 报告目录
    pub reports_dir: String,
    /// 目录中可用的报告数
    pub report_count: usize,
}

pub async fn health_check(service: web::Data<ReportService>) -> Result<HttpResponse> {
    let service = service.get_ref().clone();
    let result = web::block(move || {
        service.report_ids().map(|ids| HealthStatus {
            status: "healthy",
            reports_dir: service.store().dir().display().to_string(),
            report_count: ids.len(),
        })
    })
    .await
    .map_err(error::ErrorInternalServerError)?;

    Ok(ApiResponse::respond(result))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

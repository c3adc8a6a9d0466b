//! 报告接口处理器
//!
//! ## 页面
//! - GET / - 最新报告页面
//! - GET /reports/{id} - 指定报告页面
//!
//! ## JSON 接口
//! - GET /api/v1/reports - 报告 id 列表（从新到旧）
//! - GET /api/v1/reports/latest - 最新报告数据

use actix_web::{error, http::header::ContentType, web, HttpResponse, Result};

use crate::models::{ApiResponse, Report};
use crate::services::ReportService;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

/// 最新报告页面
///
/// GET /
pub async fn latest_page(service: web::Data<ReportService>) -> Result<HttpResponse> {
    let service = service.get_ref().clone();
    let body = web::block(move || service.latest_page())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(html(body))
}

/// 指定报告页面
///
/// GET /reports/{id}
///
/// # 参数
/// - id: 报告 id（如 report_2024_01_05）
pub async fn report_page(
    path: web::Path<String>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let service = service.get_ref().clone();

    let page = web::block(move || match service.page_for(&id) {
        Ok(Some(body)) => Ok(body),
        Ok(None) => Err(service.placeholder_page()),
        Err(e) => {
            log::warn!("{}", e);
            Err(service.placeholder_page())
        }
    })
    .await
    .map_err(error::ErrorInternalServerError)?;

    match page {
        Ok(body) => Ok(html(body)),
        Err(body) => Ok(HttpResponse::NotFound()
            .content_type(ContentType::html())
            .body(body)),
    }
}

/// 报告 id 列表
///
/// GET /api/v1/reports
pub async fn list_reports(service: web::Data<ReportService>) -> Result<HttpResponse> {
    let service = service.get_ref().clone();
    let ids = web::block(move || service.report_ids())
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(ApiResponse::respond(ids))
}

/// 最新报告数据
///
/// GET /api/v1/reports/latest
pub async fn latest_report(service: web::Data<ReportService>) -> Result<HttpResponse> {
    let service = service.get_ref().clone();
    let report: Report = web::block(move || service.latest_report())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

pub fn page_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(latest_page))
        .route("/reports/{id}", web::get().to(report_page));
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("", web::get().to(list_reports))
            .route("/latest", web::get().to(latest_report)),
    );
}

//! 每日技术分析报告服务
//!
//! 读取报告目录中最新的 `report_<日期>.json`，按分类渲染为 HTML 表格

mod config;     // 配置加载
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::middleware::CorsHeaders;
use crate::services::ReportService;

/// 应用程序入口
///
/// 加载配置后启动 HTTP 服务器，默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    let service = web::Data::new(ReportService::new(&config.reports));
    log::info!(
        "启动报告服务，报告目录: {}",
        service.store().dir().display()
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())  // 请求日志
            .wrap(CorsHeaders)        // 跨域响应头
            .configure(handlers::config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    log::info!("监听 {}", config.bind_addr());
    server.bind(config.bind_addr())?.run().await?;
    Ok(())
}

//! 通用 API 响应模型
//!
//! 定义 JSON 接口统一的响应格式

use actix_web::HttpResponse;
use chrono::Utc;
use chrono_tz::Asia::Kolkata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 获取印度标准时间（UTC+5:30）
///
/// JSON 接口的时间戳固定使用 IST，与 `reports.timezone` 无关；
/// 后者只决定页面页脚的年份
fn get_ist_time() -> chrono::DateTime<chrono_tz::Tz> {
    Utc::now().with_timezone(&Kolkata)
}

/// 统一 API 响应结构
///
/// 所有 JSON 接口返回统一格式，包含：
/// - success: 请求是否成功
/// - data: 响应数据（成功时有值）
/// - message: 响应消息
/// - timestamp: 响应时间戳（印度标准时间）
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 请求是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
    /// 响应消息
    pub message: String,
    /// 响应时间戳（ISO 8601 格式）
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
            timestamp: get_ist_time().to_rfc3339(),
        }
    }

    /// 创建错误响应
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
            timestamp: get_ist_time().to_rfc3339(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// 按服务结果生成 HTTP 响应，失败时返回 500 和错误信息
    pub fn respond<E: fmt::Display>(result: Result<T, E>) -> HttpResponse {
        match result {
            Ok(data) => HttpResponse::Ok().json(Self::success(data)),
            Err(e) => HttpResponse::InternalServerError().json(Self::error(e.to_string())),
        }
    }
}

//! 业务逻辑服务模块
//!
//! 封装报告文件的读取和页面渲染

pub mod render;         // HTML 页面渲染
pub mod report_service; // 报告服务
pub mod report_store;   // 报告文件存储

pub use report_service::ReportService;

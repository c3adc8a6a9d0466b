//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，部分字段可由环境变量覆盖

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 报告配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// 报告 JSON 文件所在目录
    #[serde(default = "default_reports_dir")]
    pub dir: PathBuf,
    /// 页面引用的静态资源前缀（style.css / script.js）
    #[serde(default = "default_assets_base")]
    pub assets_base: String,
    /// 页脚显示的站点名
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// 页脚年份使用的时区（IANA 名称）
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 报告配置
    #[serde(default)]
    pub reports: ReportsConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_reports_dir() -> PathBuf { PathBuf::from("reports") }
fn default_assets_base() -> String { "assets".to_string() }
fn default_site_name() -> String { "ismarket.in".to_string() }
fn default_timezone() -> String { "Asia/Kolkata".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            dir: default_reports_dir(),
            assets_base: default_assets_base(),
            site_name: default_site_name(),
            timezone: default_timezone(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ReportsConfig {
    /// 解析页脚时区，无效时回退到 UTC
    pub fn tz(&self) -> Tz {
        self.timezone.parse::<Tz>().unwrap_or_else(|_| {
            log::warn!("无效的时区 {}，使用 UTC", self.timezone);
            Tz::UTC
        })
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置：使用第一个存在的配置文件，没有则使用默认值，最后应用环境变量覆盖
    ///
    /// 在日志初始化之前调用，配置文件无效时直接返回错误
    pub fn load() -> anyhow::Result<Self> {
        let config_paths = ["config.json", "config/config.json"];

        let mut config = match config_paths.iter().find(|path| Path::new(path).exists()) {
            Some(path) => Self::from_file(path)
                .map_err(|e| anyhow::anyhow!("加载配置文件 {} 失败: {}", path, e))?,
            None => Self::default(),
        };

        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// 应用环境变量覆盖（REPORTS_DIR、PORT）
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("REPORTS_DIR").filter(|d| !d.is_empty()) {
            self.reports.dir = PathBuf::from(dir);
        }
        if let Some(port) = lookup("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"reports": {"dir": "/data/reports"}}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.reports.dir, PathBuf::from("/data/reports"));
        assert_eq!(config.reports.assets_base, "assets");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [("REPORTS_DIR", "/srv/reports"), ("PORT", "9000")]
            .into_iter()
            .collect();
        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.reports.dir, PathBuf::from("/srv/reports"));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_bad_port_env_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.reports.dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_timezone_fallback() {
        let mut reports = ReportsConfig::default();
        assert_eq!(reports.tz(), chrono_tz::Asia::Kolkata);

        reports.timezone = "Mars/Olympus".to_string();
        assert_eq!(reports.tz(), Tz::UTC);
    }
}

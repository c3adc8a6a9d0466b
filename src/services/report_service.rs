//! 报告服务
//!
//! 组合报告存储与页面渲染，供 HTTP 处理器使用

use chrono::{Datelike, Utc};
use chrono_tz::Tz;

use crate::config::ReportsConfig;
use crate::models::{Report, PLACEHOLDER_LABEL};
use crate::services::render::{render_report_page, PageOptions};
use crate::services::report_store::{ReportError, ReportStore};

#[derive(Debug, Clone)]
pub struct ReportService {
    store: ReportStore,
    assets_base: String,
    site_name: String,
    tz: Tz,
}

impl ReportService {
    pub fn new(config: &ReportsConfig) -> Self {
        Self {
            store: ReportStore::new(config.dir.clone()),
            assets_base: config.assets_base.clone(),
            site_name: config.site_name.clone(),
            tz: config.tz(),
        }
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// 当前页面参数，年份按配置时区计算
    fn page_options(&self) -> PageOptions {
        PageOptions {
            assets_base: self.assets_base.clone(),
            site_name: self.site_name.clone(),
            year: Utc::now().with_timezone(&self.tz).year(),
        }
    }

    /// 最新报告（无报告或读取失败时为空报告）
    pub fn latest_report(&self) -> Report {
        self.store.latest_report()
    }

    /// 最新报告页面
    pub fn latest_page(&self) -> String {
        render_report_page(&self.latest_report(), &self.page_options())
    }

    /// 指定 id 的报告页面，id 不在目录中时返回 None
    pub fn page_for(&self, id: &str) -> Result<Option<String>, ReportError> {
        let Some(file) = self.store.find(id)? else {
            return Ok(None);
        };
        let report = self.store.load_or_empty(&file);
        Ok(Some(render_report_page(&report, &self.page_options())))
    }

    /// 找不到报告时的页面
    pub fn placeholder_page(&self) -> String {
        render_report_page(&Report::empty(PLACEHOLDER_LABEL), &self.page_options())
    }

    /// 所有报告 id，从新到旧
    pub fn report_ids(&self) -> Result<Vec<String>, ReportError> {
        Ok(self.store.list()?.into_iter().map(|f| f.id).collect())
    }
}

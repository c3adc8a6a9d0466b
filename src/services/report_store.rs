//! 报告文件存储
//!
//! 报告由外部流程写入目录，文件名形如 `report_<日期或编号>.json`，
//! 写入后不再修改。文件名按字典序倒序即为从新到旧。

use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::models::{Report, ReportFile, PLACEHOLDER_LABEL};

fn report_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^report_.+\.json$").unwrap())
}

/// 报告读取错误
#[derive(Debug)]
pub enum ReportError {
    /// 读取目录或文件失败
    Io { path: PathBuf, source: io::Error },
    /// 文件内容不是合法的报告 JSON
    Parse { path: PathBuf, detail: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Io { path, source } => {
                write!(f, "读取 {} 失败: {}", path.display(), source)
            }
            ReportError::Parse { path, detail } => {
                write!(f, "解析报告 {} 失败: {}", path.display(), detail)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            ReportError::Parse { .. } => None,
        }
    }
}

/// 报告目录
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 列出所有报告文件，从新到旧
    ///
    /// 目录不存在时返回空列表
    pub fn list(&self) -> Result<Vec<ReportFile>, ReportError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("报告目录 {} 不存在", self.dir.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ReportError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ReportError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !report_name_re().is_match(&name) || !path.is_file() {
                continue;
            }
            let id = name.strip_suffix(".json").unwrap_or(&name).to_string();
            files.push((name, ReportFile { id, path }));
        }

        // 按完整文件名倒序
        files.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(files.into_iter().map(|(_, file)| file).collect())
    }

    /// 选择最新的报告文件
    pub fn latest(&self) -> Result<Option<ReportFile>, ReportError> {
        Ok(self.list()?.into_iter().next())
    }

    /// 按 id 查找报告文件，只匹配目录中已存在的报告
    pub fn find(&self, id: &str) -> Result<Option<ReportFile>, ReportError> {
        Ok(self.list()?.into_iter().find(|f| f.id == id))
    }

    /// 读取并解析报告文件
    pub fn load(&self, file: &ReportFile) -> Result<Report, ReportError> {
        let content = fs::read_to_string(&file.path).map_err(|source| ReportError::Io {
            path: file.path.clone(),
            source,
        })?;

        Report::parse(file.id.clone(), &content).map_err(|e| ReportError::Parse {
            path: file.path.clone(),
            detail: e.to_string(),
        })
    }

    /// 读取报告，失败时降级为同标签的空报告
    pub fn load_or_empty(&self, file: &ReportFile) -> Report {
        self.load(file).unwrap_or_else(|e| {
            log::warn!("{}，按空报告渲染", e);
            Report::empty(file.id.clone())
        })
    }

    /// 最新报告；没有可用报告时返回占位标签的空报告
    pub fn latest_report(&self) -> Report {
        match self.latest() {
            Ok(Some(file)) => {
                log::debug!("选择最新报告 {}", file.path.display());
                self.load_or_empty(&file)
            }
            Ok(None) => Report::empty(PLACEHOLDER_LABEL),
            Err(e) => {
                log::warn!("{}，按无报告处理", e);
                Report::empty(PLACEHOLDER_LABEL)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("nope"));

        assert!(store.list().unwrap().is_empty());
        assert!(store.latest().unwrap().is_none());
        assert_eq!(store.latest_report(), Report::empty(PLACEHOLDER_LABEL));
    }

    #[test]
    fn test_latest_is_greatest_name() {
        let dir = tempfile::tempdir().unwrap();
        // 写入顺序与日期顺序相反
        write(dir.path(), "report_2024_01_07.json", "{}");
        write(dir.path(), "report_2024_01_05.json", "{}");
        write(dir.path(), "report_2024_01_06.json", "{}");

        let store = ReportStore::new(dir.path());
        for _ in 0..3 {
            let latest = store.latest().unwrap().unwrap();
            assert_eq!(latest.id, "report_2024_01_07");
        }

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(
            ids,
            vec!["report_2024_01_07", "report_2024_01_06", "report_2024_01_05"]
        );
    }

    #[test]
    fn test_ignores_non_matching_entries() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "report_2024_01_01.json", "{}");
        write(dir.path(), "report_2099_01_01.txt", "{}");
        write(dir.path(), "summary_2099.json", "{}");
        write(dir.path(), "report_.json", "{}");
        write(dir.path(), "report_2023_12_31.json.json", "{}");
        fs::create_dir(dir.path().join("report_2099_12_31.json")).unwrap();

        let store = ReportStore::new(dir.path());
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["report_2024_01_01", "report_2023_12_31.json"]);
    }

    #[test]
    fn test_load_report() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "report_2024_01_05.json",
            r#"{"Top Gainers": [{"Stock Name": "ACME", "Price": "10.5", "%Chg": "+1.2", "Volume": "1000", "Symbol": "ACME.X"}]}"#,
        );

        let store = ReportStore::new(dir.path());
        let report = store.latest_report();
        assert_eq!(report.label, "report_2024_01_05");
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].name, "Top Gainers");
        assert_eq!(report.categories[0].rows[0].symbol, CellValue::from("ACME.X"));
    }

    #[test]
    fn test_malformed_report_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "report_2024_01_05.json", "{\"Top\": [");

        let store = ReportStore::new(dir.path());
        let file = store.latest().unwrap().unwrap();
        assert!(matches!(store.load(&file), Err(ReportError::Parse { .. })));

        let report = store.latest_report();
        assert_eq!(report, Report::empty("report_2024_01_05"));
    }

    #[test]
    fn test_find_only_listed_ids() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "report_2024_01_05.json", "{}");
        let store = ReportStore::new(dir.path());

        assert!(store.find("report_2024_01_05").unwrap().is_some());
        assert!(store.find("report_2024_01_06").unwrap().is_none());
        assert!(store.find("../report_2024_01_05").unwrap().is_none());
    }

    #[test]
    fn test_unreadable_report_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report_2024_01_05.json"), [0xff, 0xfe]).unwrap();

        let store = ReportStore::new(dir.path());
        let file = store.latest().unwrap().unwrap();
        assert!(matches!(store.load(&file), Err(ReportError::Io { .. })));
        assert_eq!(store.latest_report(), Report::empty("report_2024_01_05"));
    }

    #[test]
    fn test_dir_that_is_a_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports");
        fs::write(&path, "").unwrap();

        let store = ReportStore::new(&path);
        assert!(matches!(store.list(), Err(ReportError::Io { .. })));
        assert_eq!(store.latest_report(), Report::empty(PLACEHOLDER_LABEL));
    }
}

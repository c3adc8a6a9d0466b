//! 报告数据模型
//!
//! 报告文件内容为 JSON 对象：键为分类名，值为股票行数组。
//! 分类顺序与文件中的键顺序一致。

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// 没有可用报告时页面显示的标签
pub const PLACEHOLDER_LABEL: &str = "No reports found";

/// 表头字段，顺序即渲染顺序
pub const COLUMNS: [&str; 5] = ["Stock Name", "Price", "%Chg", "Volume", "Symbol"];

/// 报告目录中的一个报告文件
///
/// `id` 为文件名去掉 `.json` 后缀，例如 `report_2024_01_05`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub id: String,
    pub path: PathBuf,
}

/// 单元格值
///
/// 上游写入的字段可能是字符串也可能是数字。数字保留文件中的原始文本，
/// `10.50` 不会变成 `10.5`，`1e3` 也不会变成 `1000.0`。
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    Text(String),
    /// 数字的原始 JSON 文本
    Number(String),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// 由单个 JSON 标量的原始文本构造
    fn from_raw(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        match value {
            Value::String(s) => Ok(CellValue::Text(s)),
            Value::Number(_) => Ok(CellValue::Number(raw.to_string())),
            Value::Bool(b) => Ok(CellValue::Bool(b)),
            Value::Null => Ok(CellValue::Empty),
            Value::Array(_) | Value::Object(_) => {
                Err(format!("单元格必须是标量，实际为 {}", raw))
            }
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        CellValue::from_raw(raw.get()).map_err(de::Error::custom)
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => RawValue::from_string(n.clone())
                .map_err(<S::Error as ser::Error>::custom)?
                .serialize(serializer),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::Number(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// 股票行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    /// 股票名称
    #[serde(rename = "Stock Name", default)]
    pub stock_name: CellValue,
    /// 价格
    #[serde(rename = "Price", default)]
    pub price: CellValue,
    /// 涨跌幅
    #[serde(rename = "%Chg", default)]
    pub change: CellValue,
    /// 成交量
    #[serde(rename = "Volume", default)]
    pub volume: CellValue,
    /// 代码
    #[serde(rename = "Symbol", default)]
    pub symbol: CellValue,
}

impl StockRow {
    /// 按表头顺序返回五个单元格
    pub fn cells(&self) -> [&CellValue; 5] {
        [&self.stock_name, &self.price, &self.change, &self.volume, &self.symbol]
    }
}

/// 报告中的一个分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub rows: Vec<StockRow>,
}

/// 已解析的报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// 页面标签（报告 id，或占位文本）
    pub label: String,
    pub categories: Vec<Category>,
}

impl Report {
    /// 空报告，用于无报告或解析失败时
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            categories: Vec::new(),
        }
    }

    /// 解析报告 JSON
    pub fn parse(label: impl Into<String>, content: &str) -> serde_json::Result<Self> {
        let Categories(categories) = serde_json::from_str(content)?;
        Ok(Self {
            label: label.into(),
            categories,
        })
    }
}

/// 顶层对象按键出现顺序读出的分类列表
struct Categories(Vec<Category>);

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = Categories;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to stock rows")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::new();
                while let Some((name, rows)) = map.next_entry::<String, Vec<StockRow>>()? {
                    categories.push(Category { name, rows });
                }
                Ok(Categories(categories))
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}

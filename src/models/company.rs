use serde::Serialize;

/// 公司代码记录，直接来自 CSV 的 SYMBOL 与 NAME OF COMPANY 列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    pub symbol: String,
    pub name: String,
}

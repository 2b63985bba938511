use crate::errors::{ChartError, Result};
use crate::models::company::CompanyRecord;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::path::{Path, PathBuf};

const SYMBOL_COLUMN: &str = "SYMBOL";
const NAME_COLUMN: &str = "NAME OF COMPANY";

/// 公司代码搜索，每次请求都重新读取 CSV 数据集
pub struct CompanySearch {
    dataset: PathBuf,
    limit: usize,
}

impl CompanySearch {
    pub fn new(dataset: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            dataset: dataset.into(),
            limit,
        }
    }

    pub fn dataset(&self) -> &Path {
        &self.dataset
    }

    /// Case-insensitive substring match against the SYMBOL column, in file order,
    /// capped at the configured limit.
    pub fn search(&self, query: &str) -> Result<Vec<CompanyRecord>> {
        let needle = query.trim().to_uppercase();

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_path(&self.dataset)
            .map_err(|e| {
                ChartError::DatasetUnavailable(format!("{}: {}", self.dataset.display(), e))
            })?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                ChartError::DatasetUnavailable(format!(
                    "{} has no {} column",
                    self.dataset.display(),
                    name
                ))
            })
        };
        let symbol_idx = column(SYMBOL_COLUMN)?;
        let name_idx = column(NAME_COLUMN)?;

        let mut results = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping malformed row {} in {}: {}", line + 2, self.dataset.display(), e);
                    continue;
                }
            };

            let (symbol, name) = match (record.get(symbol_idx), record.get(name_idx)) {
                (Some(symbol), Some(name)) => (symbol, name),
                _ => {
                    warn!("Skipping short row {} in {}", line + 2, self.dataset.display());
                    continue;
                }
            };

            if symbol.to_uppercase().contains(&needle) {
                if results.len() >= self.limit {
                    break;
                }
                results.push(CompanyRecord {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                });
            }
        }

        debug!("搜索 {:?} 命中 {} 条记录", query, results.len());
        Ok(results)
    }
}

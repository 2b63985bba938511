use std::env;
use std::path::Path;

fn main() {
    // 获取项目根目录
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());

    // 检查默认的公司数据集是否存在
    let dataset = Path::new(&manifest_dir).join("data").join("EQUITY_L.csv");
    if !dataset.exists() {
        println!("cargo:warning=data/EQUITY_L.csv not found. /search/ will answer 500 until STOCKCHART_DATASET points at a CSV file.");
    } else {
        println!("cargo:rerun-if-changed=data/EQUITY_L.csv");
    }
}

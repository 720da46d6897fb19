use crate::error::{MigrateError, MigrateResult};
use crate::models::question::BankEntry;
use std::path::Path;
use tokio::fs;

/// 检查必需的输入文件是否存在
pub async fn ensure_exists(path: &Path) -> MigrateResult<()> {
    match fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(MigrateError::missing_input(path)),
        Err(e) => Err(MigrateError::io(path, e)),
    }
}

/// 读取一场考试的原始文本（PDF 提取结果，UTF-8）
pub async fn load_raw_text(path: &Path) -> MigrateResult<String> {
    ensure_exists(path).await?;
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| MigrateError::io(path, e))?;
    tracing::debug!("读取原始文本 {}: {} 字符", path.display(), raw.chars().count());
    Ok(raw)
}

/// 读取题库 JSON 数组
///
/// 每条记录按原样保留，不补全缺失字段，也不改变键顺序。
pub async fn load_bank(path: &Path) -> MigrateResult<Vec<BankEntry>> {
    ensure_exists(path).await?;
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| MigrateError::io(path, e))?;

    let bank: Vec<BankEntry> =
        serde_json::from_str(&content).map_err(|source| MigrateError::BankParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!("成功加载题库 {}: {} 道题目", path.display(), bank.len());
    Ok(bank)
}

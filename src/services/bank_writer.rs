//! 题库写入服务
//!
//! 整个文件重写：先写同目录下的临时文件，再重命名覆盖目标文件。

use crate::error::{MigrateError, MigrateResult};
use crate::models::question::BankEntry;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 题库写入服务
pub struct BankWriter {
    bank_path: PathBuf,
}

impl BankWriter {
    pub fn new(bank_path: impl Into<PathBuf>) -> Self {
        Self {
            bank_path: bank_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.bank_path
    }

    /// 序列化为 2 空格缩进的 JSON，非 ASCII 字符不转义
    pub fn render(bank: &[BankEntry]) -> MigrateResult<String> {
        Ok(serde_json::to_string_pretty(bank)?)
    }

    /// 写入题库
    ///
    /// 失败时目标文件保持原样。
    pub async fn write(&self, bank: &[BankEntry]) -> MigrateResult<()> {
        let content = Self::render(bank)?;
        let tmp_path = self.tmp_path();

        debug!(
            "写入临时文件: {} ({} 字节)",
            tmp_path.display(),
            content.len()
        );
        fs::write(&tmp_path, content.as_bytes())
            .await
            .map_err(|e| MigrateError::io(&tmp_path, e))?;

        if let Err(e) = fs::rename(&tmp_path, &self.bank_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(MigrateError::io(&self.bank_path, e));
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .bank_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "questions.json".into());
        name.push(".tmp");
        self.bank_path.with_file_name(name)
    }
}

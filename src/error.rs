use std::path::PathBuf;
use thiserror::Error;

/// 迁移过程中的错误类型
///
/// 格式异常的题目块不属于错误，它们只会记录到 `ParseReport` 中。
#[derive(Debug, Error)]
pub enum MigrateError {
    /// 必需的输入文件不存在
    #[error("输入文件不存在: {}", path.display())]
    MissingInput { path: PathBuf },

    /// 读写文件失败
    #[error("文件操作失败 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 题库 JSON 解析失败
    #[error("题库解析失败 ({}): {source}", path.display())]
    BankParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 题库序列化失败
    #[error("题库序列化失败: {0}")]
    BankSerialize(#[from] serde_json::Error),

    /// 配置文件解析失败
    #[error("配置文件解析失败 ({}): {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// 分类区间表不合法
    #[error("分类区间表不合法: {0}")]
    InvalidCategoryTable(String),

    /// 正则表达式编译失败
    #[error("正则表达式编译失败: {0}")]
    Pattern(#[from] regex::Error),
}

impl MigrateError {
    /// 创建文件读写错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建输入缺失错误
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        MigrateError::MissingInput { path: path.into() }
    }

    /// 是否为输入缺失
    pub fn is_missing_input(&self) -> bool {
        matches!(self, MigrateError::MissingInput { .. })
    }
}

/// 迁移结果类型
pub type MigrateResult<T> = Result<T, MigrateError>;

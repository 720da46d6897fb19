use crate::error::{MigrateError, MigrateResult};
use crate::models::category::CategoryTable;
use crate::services::bank_merger::PremiumPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "migrate.toml";

/// 程序配置
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库 JSON 文件
    pub bank_path: PathBuf,
    /// 只解析不写回题库
    pub dry_run: bool,
    /// 输入文件缺失时跳过该场次，而不是中止整个运行
    pub skip_missing_inputs: bool,
    /// 新题目的 is_premium 策略
    pub premium: PremiumPolicy,
    /// 本次要导入的考试场次
    pub sittings: Vec<SittingConfig>,
}

/// 单场考试的导入配置
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SittingConfig {
    /// 原始文本文件（PDF 提取结果）
    pub raw_text_path: PathBuf,
    /// 写入题库的 year 字段，例如 "2018_04"
    pub year: String,
    /// 场次的日文名称，用于兜底解说，例如 "平成30年4月"
    pub display_name: String,
    /// 解析前把全角数字统一为半角
    #[serde(default)]
    pub normalize_digits: bool,
    /// 删除提取器写入的 `--- Page N ---` 分页行
    #[serde(default)]
    pub strip_page_markers: bool,
    /// 题号到分类的对照表
    #[serde(default)]
    pub categories: CategoryTable,
}

impl SittingConfig {
    pub fn new(
        raw_text_path: impl Into<PathBuf>,
        year: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            raw_text_path: raw_text_path.into(),
            year: year.into(),
            display_name: display_name.into(),
            normalize_digits: false,
            strip_page_markers: false,
            categories: CategoryTable::standard(),
        }
    }

    pub fn with_normalize_digits(mut self, enabled: bool) -> Self {
        self.normalize_digits = enabled;
        self
    }

    pub fn with_categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    /// 解说缺失时使用的兜底文字
    pub fn fallback_summary(&self) -> String {
        format!("{}公表問題の公式解説を簡略化した要約です。", self.display_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_path: PathBuf::from("assets/json/questions.json"),
            dry_run: false,
            skip_missing_inputs: false,
            premium: PremiumPolicy::Locked,
            sittings: vec![
                SittingConfig::new("raw_text.txt", "2020_04", "令和2年4月")
                    .with_categories(CategoryTable::short_labels()),
                SittingConfig::new("raw_text_2018_04.txt", "2018_04", "平成30年4月"),
                SittingConfig::new("raw_text_2019_10.txt", "2019_2", "令和元年10月")
                    .with_normalize_digits(true),
                SittingConfig::new("raw_text_2019_04.txt", "2019_1", "平成31年4月")
                    .with_normalize_digits(true),
                SittingConfig::new("raw_text_2018_10.txt", "2018_2", "平成30年10月")
                    .with_normalize_digits(true),
            ],
        }
    }
}

impl Config {
    /// 加载配置：配置文件（若存在）+ 环境变量覆盖
    ///
    /// 配置文件路径取自 `MIGRATE_CONFIG`，默认为 `migrate.toml`。
    /// 文件不存在时使用内置的场次列表。
    pub async fn load() -> MigrateResult<Self> {
        let path = std::env::var("MIGRATE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let config = if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            info!("📄 读取配置文件: {}", path.display());
            Self::from_file(&path).await?
        } else {
            info!("📄 未找到配置文件 {}，使用内置场次列表", path.display());
            Self::default()
        };

        config.apply_env()
    }

    /// 从 TOML 文件读取配置
    pub async fn from_file(path: &Path) -> MigrateResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MigrateError::io(path, e))?;
        Self::from_toml_str(&content, path)
    }

    /// 解析 TOML 文本，`origin` 只用于报错
    pub fn from_toml_str(content: &str, origin: &Path) -> MigrateResult<Self> {
        let config: Config = toml::from_str(content).map_err(|source| MigrateError::Config {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// 环境变量覆盖
    pub fn apply_env(self) -> MigrateResult<Self> {
        let mut config = self;
        if let Ok(v) = std::env::var("QUESTION_BANK_PATH") {
            config.bank_path = PathBuf::from(v);
        }
        config.dry_run = std::env::var("DRY_RUN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.dry_run);
        config.skip_missing_inputs = std::env::var("SKIP_MISSING_INPUTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.skip_missing_inputs);
        Ok(config)
    }
}

//! 迁移运行器 - 编排层
//!
//! ## 职责
//!
//! 1. **预检**：写入前确认题库和所有原始文本都存在
//! 2. **逐场处理**：按配置顺序解析并合并
//! 3. **一次写回**：全部成功后整体重写题库
//! 4. **统计输出**：每场的解析/跳过数量和最终总数

use crate::config::{Config, SittingConfig};
use crate::error::MigrateError;
use crate::models::loaders::{ensure_exists, load_bank};
use crate::orchestrator::sitting_processor::process_sitting;
use crate::services::{merge_into_bank, BankWriter, ExamParser, MergeReport, ParseReport};
use crate::utils::logging::{log_sitting_merged, log_startup, print_final_stats};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// 单场考试的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct SittingReport {
    pub year: String,
    pub raw_text_path: PathBuf,
    /// 输入缺失而被跳过时为 None
    pub parse: Option<ParseReport>,
    pub merge: MergeReport,
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub sittings: Vec<SittingReport>,
    pub appended: usize,
    pub bank_total: usize,
    /// 是否写回了题库
    pub written: bool,
}

impl RunReport {
    /// 所有场次中被丢弃的题目块数量
    pub fn skipped_blocks(&self) -> usize {
        self.sittings
            .iter()
            .filter_map(|s| s.parse.as_ref())
            .map(ParseReport::skipped_count)
            .sum()
    }
}

/// 迁移应用
pub struct App {
    config: Config,
    parser: ExamParser,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let parser = ExamParser::new().context("初始化解析器失败")?;
        log_startup(config.sittings.len(), config.dry_run);
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行迁移
    pub async fn run(&self) -> Result<RunReport> {
        let runnable = self.preflight().await?;

        let mut bank = load_bank(&self.config.bank_path)
            .await
            .with_context(|| format!("无法加载题库: {}", self.config.bank_path.display()))?;

        let mut reports = Vec::with_capacity(self.config.sittings.len());
        let mut appended = 0;

        for (sitting, present) in self.config.sittings.iter().zip(runnable) {
            if !present {
                reports.push(SittingReport {
                    year: sitting.year.clone(),
                    raw_text_path: sitting.raw_text_path.clone(),
                    parse: None,
                    merge: MergeReport::default(),
                });
                continue;
            }

            let outcome = process_sitting(&self.parser, sitting)
                .await
                .with_context(|| format!("处理场次 {} 失败", sitting.year))?;
            let merge = merge_into_bank(&mut bank, outcome.questions, &self.config.premium)?;
            log_sitting_merged(&sitting.year, &merge);

            appended += merge.appended;
            reports.push(SittingReport {
                year: sitting.year.clone(),
                raw_text_path: sitting.raw_text_path.clone(),
                parse: Some(outcome.report),
                merge,
            });
        }

        let written = if self.config.dry_run {
            false
        } else {
            let writer = BankWriter::new(&self.config.bank_path);
            writer
                .write(&bank)
                .await
                .with_context(|| format!("无法写入题库: {}", writer.path().display()))?;
            true
        };

        let report = RunReport {
            sittings: reports,
            appended,
            bank_total: bank.len(),
            written,
        };

        let bank_path = self.config.bank_path.display().to_string();
        print_final_stats(
            report.appended,
            report.skipped_blocks(),
            report.bank_total,
            written.then_some(bank_path.as_str()),
        );

        Ok(report)
    }

    /// 预检所有输入，返回每个场次是否可处理
    ///
    /// 任何必需输入缺失时直接返回错误，此时尚未写入任何文件。
    async fn preflight(&self) -> Result<Vec<bool>> {
        ensure_exists(&self.config.bank_path).await?;

        let mut runnable = Vec::with_capacity(self.config.sittings.len());
        for sitting in &self.config.sittings {
            runnable.push(self.check_sitting(sitting).await?);
        }

        if !runnable.iter().any(|&present| present) {
            warn!("⚠️ 没有可导入的原始文本");
        }
        Ok(runnable)
    }

    async fn check_sitting(&self, sitting: &SittingConfig) -> Result<bool> {
        match ensure_exists(&sitting.raw_text_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_missing_input() && self.config.skip_missing_inputs => {
                warn!("⏭️ 跳过 {}: 原始文本不存在 {}", sitting.year, sitting.raw_text_path.display());
                Ok(false)
            }
            Err(e) => {
                info!("💡 请先从 PDF 提取场次 {} 的原始文本", sitting.year);
                Err(e.into())
            }
        }
    }
}

/// 从运行错误中取出“输入缺失”的路径
pub fn missing_input_path(err: &anyhow::Error) -> Option<&std::path::Path> {
    match err.downcast_ref::<MigrateError>() {
        Some(MigrateError::MissingInput { path }) => Some(path.as_path()),
        _ => None,
    }
}

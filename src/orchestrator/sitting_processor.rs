//! 单场考试处理器 - 编排层
//!
//! 读取一场考试的原始文本并解析，输出解析报告。不接触题库。

use crate::config::SittingConfig;
use crate::error::MigrateResult;
use crate::models::loaders::load_raw_text;
use crate::services::{ExamParser, ParseOutcome};
use crate::utils::logging::{log_sitting_parsed, truncate_text};
use tracing::debug;

/// 处理单场考试
///
/// # 参数
/// - `parser`: 解析器（正则已编译）
/// - `sitting`: 场次配置
///
/// # 返回
/// 解析出的题目和解析报告
pub async fn process_sitting(
    parser: &ExamParser,
    sitting: &SittingConfig,
) -> MigrateResult<ParseOutcome> {
    let raw = load_raw_text(&sitting.raw_text_path).await?;
    let outcome = parser.parse(&raw, sitting);

    for question in &outcome.questions {
        debug!(
            "[{} 問{}] {}",
            question.year,
            question.question_number,
            truncate_text(&question.question_text, 40)
        );
    }

    let file_name = sitting
        .raw_text_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| sitting.raw_text_path.display().to_string());
    log_sitting_parsed(&file_name, &outcome.report);

    Ok(outcome)
}

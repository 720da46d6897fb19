/// 日志工具模块
///
/// 提供运行横幅和统计输出的辅助函数
use crate::services::{MergeReport, ParseReport};
use tracing::{info, warn};

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 记录程序启动信息
///
/// # 参数
/// - `sittings`: 待导入场次数
/// - `dry_run`: 是否只解析不写回
pub fn log_startup(sittings: usize, dry_run: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 题库迁移启动 - {}", now());
    info!("📋 待导入场次: {}", sittings);
    if dry_run {
        info!("💡 DRY RUN: 只解析，不写回题库");
    }
    info!("{}", "=".repeat(60));
}

/// 记录单场解析结果，例如 `raw_text_2019_10.txt → 2019_2: 44 問`
pub fn log_sitting_parsed(file_name: &str, report: &ParseReport) {
    info!("{} → {}: {} 問", file_name, report.year, report.parsed);
    for (reason, count) in report.skipped_by_reason() {
        warn!("  ⚠️ {}: {} 块", reason, count);
    }
}

/// 记录单场合并结果
pub fn log_sitting_merged(year: &str, merge: &MergeReport) {
    match (merge.first_id, merge.last_id) {
        (Some(first), Some(last)) => {
            info!("✓ [{}] 追加 {} 道题目 (id {}..={})", year, merge.appended, first, last)
        }
        _ => info!("[{}] 没有可追加的题目", year),
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `appended`: 本次追加数量
/// - `skipped_blocks`: 丢弃的题目块数量
/// - `bank_total`: 题库总数
/// - `written_to`: 写入的题库路径（dry run 时为 None）
pub fn print_final_stats(
    appended: usize,
    skipped_blocks: usize,
    bank_total: usize,
    written_to: Option<&str>,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 迁移完成统计");
    info!("完成时间: {}", now());
    info!("{}", "=".repeat(60));
    info!("✅ 追加: {} 问", appended);
    info!("⏭️ 跳过的题目块: {}", skipped_blocks);
    info!("📚 题库总数: {}", bank_total);
    info!("{}", "=".repeat(60));
    match written_to {
        Some(path) => info!("\n题库已保存至: {}", path),
        None => info!("\n未写回题库 (dry run)"),
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 题库合并服务
///
/// 把新解析的题目追加到题库末尾，分配 id 和 is_premium。
/// 不做去重：重复运行同一场次会产生重复记录，这里只统计并告警。
use crate::error::MigrateResult;
use crate::models::question::{BankEntry, ParsedQuestion, QuestionRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// 新题目的 is_premium 策略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PremiumPolicy {
    /// 全部锁定（历史场次的默认做法）
    #[default]
    Locked,
    /// 全部免费
    Free,
    /// year 以任一前缀开头的题目免费，其余锁定
    FreeForYears { prefixes: Vec<String> },
}

impl PremiumPolicy {
    pub fn is_premium(&self, year: &str) -> bool {
        match self {
            PremiumPolicy::Locked => true,
            PremiumPolicy::Free => false,
            PremiumPolicy::FreeForYears { prefixes } => {
                !prefixes.iter().any(|prefix| year.starts_with(prefix.as_str()))
            }
        }
    }
}

/// 合并统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// 追加的记录数
    pub appended: usize,
    /// 本次分配的第一个 id（未追加时为 None）
    pub first_id: Option<u64>,
    pub last_id: Option<u64>,
    /// (year, question_text) 已存在于题库中的新记录数
    pub possible_duplicates: usize,
}

/// 题库中已有的最大 id，空题库为 0
///
/// 缺少 `id` 或 `id` 不是非负整数的记录按 0 计。
pub fn max_id(bank: &[BankEntry]) -> u64 {
    bank.iter()
        .filter_map(|q| q.get("id").and_then(Value::as_u64))
        .max()
        .unwrap_or(0)
}

fn duplicate_key(entry: &BankEntry) -> Option<(&str, &str)> {
    Some((
        entry.get("year")?.as_str()?,
        entry.get("question_text")?.as_str()?,
    ))
}

/// 把解析结果追加到题库
///
/// 新记录按解析顺序获得 `max_id + 1, +2, ...`，已有记录不做任何修改。
pub fn merge_into_bank(
    bank: &mut Vec<BankEntry>,
    parsed: Vec<ParsedQuestion>,
    policy: &PremiumPolicy,
) -> MigrateResult<MergeReport> {
    let mut report = MergeReport::default();
    let existing: HashSet<(String, String)> = bank
        .iter()
        .filter_map(duplicate_key)
        .map(|(year, text)| (year.to_string(), text.to_string()))
        .collect();

    let mut next_id = max_id(bank) + 1;
    let mut appended = Vec::with_capacity(parsed.len());

    for question in parsed {
        if existing.contains(&(question.year.clone(), question.question_text.clone())) {
            debug!("疑似重复: {}", question);
            report.possible_duplicates += 1;
        }

        let is_premium = policy.is_premium(&question.year);
        let record = QuestionRecord::from_parsed(question, next_id, is_premium);
        appended.push(serde_json::to_value(record)?);

        report.first_id.get_or_insert(next_id);
        report.last_id = Some(next_id);
        report.appended += 1;
        next_id += 1;
    }
    bank.extend(appended);

    if report.possible_duplicates > 0 {
        warn!(
            "⚠️ {} 道题目的 year + 题干已存在于题库中，可能是重复导入",
            report.possible_duplicates
        );
    }

    Ok(report)
}

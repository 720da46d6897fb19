//! 试题文本解析 - 业务能力层
//!
//! 把一场考试的原始文本解析为题目列表。纯函数，不做任何文件读写。
//!
//! ## 标记语法
//!
//! ```text
//! 问题标记   【 問 N 】            N 为全角或半角数字
//! 解说标题   ▶▶解説◀◀
//! 正解标记   ＊解答＊（N）         括号可以是全角或半角
//! 选项标记   （k） k = 1..5        括号、数字均可全角或半角
//! ```
//!
//! 无法同时得到正解编号和至少两个非空选项的块会被丢弃，
//! 丢弃原因记录在 [`ParseReport`] 中。

use crate::config::SittingConfig;
use crate::error::MigrateResult;
use crate::models::question::ParsedQuestion;
use crate::services::block_splitter::{Block, BlockSplitter};
use crate::services::text_normalizer::{normalize_space, parse_numeral, to_half_width_digits, truncate_chars};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// 解说标题
pub const EXPLANATION_HEADER: &str = "▶▶解説◀◀";
/// 正解标记
pub const ANSWER_MARKER: &str = "＊解答＊";
/// 解说摘要的最大字符数
pub const SUMMARY_MAX_CHARS: usize = 500;

/// 题目块被丢弃的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 没有 ＊解答＊ 标记
    MissingAnswer,
    /// 正解编号无法解析（含编号 0）
    UndecodableAnswer,
    /// 找不到选项 (1)
    MissingOptions,
    /// 非空选项少于 2 个
    TooFewOptions,
    /// 正解编号超出选项数量
    AnswerOutOfRange,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingAnswer => "缺少正解标记",
            SkipReason::UndecodableAnswer => "正解编号无法解析",
            SkipReason::MissingOptions => "缺少选项",
            SkipReason::TooFewOptions => "选项不足 2 个",
            SkipReason::AnswerOutOfRange => "正解编号超出选项范围",
        };
        f.write_str(text)
    }
}

/// 被丢弃的块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBlock {
    pub question_number: u32,
    pub reason: SkipReason,
}

/// 单场考试的解析报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub year: String,
    /// 找到的题目块数量
    pub blocks_found: usize,
    /// 成功解析的题目数量
    pub parsed: usize,
    pub skipped: Vec<SkippedBlock>,
}

impl ParseReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// 按原因统计丢弃数量
    pub fn skipped_by_reason(&self) -> BTreeMap<SkipReason, usize> {
        let mut counts = BTreeMap::new();
        for skipped in &self.skipped {
            *counts.entry(skipped.reason).or_insert(0) += 1;
        }
        counts
    }
}

/// 解析结果
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub questions: Vec<ParsedQuestion>,
    pub report: ParseReport,
}

/// 试题解析器
///
/// 正则在构造时编译一次，可以复用于多场考试。
pub struct ExamParser {
    splitter: BlockSplitter,
    answer_marker: Regex,
    first_option: Regex,
    option_marker: Regex,
}

impl ExamParser {
    pub fn new() -> MigrateResult<Self> {
        Ok(Self {
            splitter: BlockSplitter::new()?,
            answer_marker: Regex::new(r"＊解答＊\s*[（(]([0-9０-９]+)[）)]")?,
            first_option: Regex::new(r"[（(][1１][）)]")?,
            option_marker: Regex::new(r"[（(][1-5１-５][）)]")?,
        })
    }

    /// 解析一场考试的原始文本
    pub fn parse(&self, raw: &str, sitting: &SittingConfig) -> ParseOutcome {
        let text: Cow<'_, str> = if sitting.strip_page_markers {
            self.splitter.strip_page_markers(raw)
        } else {
            Cow::Borrowed(raw)
        };
        let text: Cow<'_, str> = if sitting.normalize_digits {
            Cow::Owned(to_half_width_digits(&text))
        } else {
            text
        };

        let blocks = self.splitter.split(&text);
        let mut report = ParseReport {
            year: sitting.year.clone(),
            blocks_found: blocks.len(),
            ..Default::default()
        };
        let mut questions = Vec::with_capacity(blocks.len());

        for block in blocks {
            match self.parse_block(block, sitting) {
                Ok(question) => questions.push(question),
                Err(reason) => {
                    debug!("[{}] 問{} 已跳过: {}", sitting.year, block.question_number, reason);
                    report.skipped.push(SkippedBlock {
                        question_number: block.question_number,
                        reason,
                    });
                }
            }
        }

        report.parsed = questions.len();
        if !report.skipped.is_empty() {
            warn!(
                "[{}] ⚠️ {}/{} 个题目块格式异常，已跳过",
                sitting.year,
                report.skipped_count(),
                report.blocks_found
            );
        }

        ParseOutcome { questions, report }
    }

    /// 解析单个题目块
    pub fn parse_block(
        &self,
        block: Block<'_>,
        sitting: &SittingConfig,
    ) -> Result<ParsedQuestion, SkipReason> {
        let body = block.body;
        let (before_expl, expl_plus) = match body.split_once(EXPLANATION_HEADER) {
            Some((before, after)) => (before, Some(after)),
            None => (body, None),
        };
        // 没有解说标题时，正解标记之后的括号不能算作选项
        let before_expl = before_expl
            .split_once(ANSWER_MARKER)
            .map_or(before_expl, |(before, _)| before);

        let correct_index = self.decode_answer(body)?;

        let opt_start = self
            .first_option
            .find(before_expl)
            .ok_or(SkipReason::MissingOptions)?;
        let question_text = normalize_space(&before_expl[..opt_start.start()]);
        let options = self.extract_options(&before_expl[opt_start.start()..]);

        if options.len() < 2 {
            return Err(SkipReason::TooFewOptions);
        }
        if correct_index >= options.len() {
            return Err(SkipReason::AnswerOutOfRange);
        }

        let summary = expl_plus
            .map(|after| {
                let expl_body = after.split_once(ANSWER_MARKER).map_or(after, |(b, _)| b);
                truncate_chars(&normalize_space(expl_body), SUMMARY_MAX_CHARS)
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| sitting.fallback_summary());

        let category = sitting.categories.classify(block.question_number);

        Ok(ParsedQuestion {
            question_number: block.question_number,
            year: sitting.year.clone(),
            category: category.label.clone(),
            question_text,
            options,
            correct_index,
            explanation_summary: summary,
            mnemonic: String::new(),
            is_hazardous: category.hazardous,
        })
    }

    /// 提取正解编号并转换为 0 起始的索引
    fn decode_answer(&self, block: &str) -> Result<usize, SkipReason> {
        let caps = self
            .answer_marker
            .captures(block)
            .ok_or(SkipReason::MissingAnswer)?;
        let numeral = caps.get(1).map_or("", |m| m.as_str());
        match parse_numeral(numeral) {
            Some(n) if n >= 1 => Ok((n - 1) as usize),
            _ => Err(SkipReason::UndecodableAnswer),
        }
    }

    /// 按选项标记切分选项区域，丢弃空选项
    fn extract_options(&self, region: &str) -> Vec<String> {
        let markers: Vec<_> = self.option_marker.find_iter(region).collect();
        markers
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let end = markers.get(i + 1).map_or(region.len(), |next| next.start());
                normalize_space(&region[m.end()..end])
            })
            .filter(|text| !text.is_empty())
            .collect()
    }
}

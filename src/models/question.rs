use crate::utils::logging::truncate_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 题库中已有的一条记录
///
/// 按加载时的原样保存（字段、缺失项和键顺序都不变），只读取 `id` / `year` / `question_text`。
pub type BankEntry = Value;

/// 本次新追加的题目记录
///
/// 字段顺序即 JSON 输出顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    pub year: String,
    pub category: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation_summary: String,
    pub mnemonic: String,
    pub is_hazardous: bool,
    pub is_premium: bool,
}

impl QuestionRecord {
    /// 由解析结果生成题库记录
    pub fn from_parsed(parsed: ParsedQuestion, id: u64, is_premium: bool) -> Self {
        Self {
            id,
            year: parsed.year,
            category: parsed.category,
            question_text: parsed.question_text,
            options: parsed.options,
            correct_index: parsed.correct_index,
            explanation_summary: parsed.explanation_summary,
            mnemonic: parsed.mnemonic,
            is_hazardous: parsed.is_hazardous,
            is_premium,
        }
    }
}

/// 解析出的题目（尚未分配 id 和 is_premium）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuestion {
    /// 源文本中的问题编号，不写入题库
    #[serde(skip)]
    pub question_number: u32,
    pub year: String,
    pub category: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation_summary: String,
    pub mnemonic: String,
    pub is_hazardous: bool,
}

impl std::fmt::Display for ParsedQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} 問{}] {} ({} 个选项, 正解 {})",
            self.year,
            self.question_number,
            truncate_text(&self.question_text, 40),
            self.options.len(),
            self.correct_index + 1
        )
    }
}

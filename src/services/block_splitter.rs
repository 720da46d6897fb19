//! 题目块切分
//!
//! 一个块从 `【問N】` 标记开始，到下一个标记或文本末尾结束。
//! 标记内允许空白，编号可以是全角或半角数字。

use crate::error::MigrateResult;
use crate::services::text_normalizer::parse_numeral;
use regex::Regex;
use std::borrow::Cow;

/// 一道题对应的原始文本块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// 标记中的问题编号
    pub question_number: u32,
    /// 标记之后到下一个标记之前的文本
    pub body: &'a str,
}

pub struct BlockSplitter {
    question_marker: Regex,
    page_marker: Regex,
}

impl BlockSplitter {
    pub fn new() -> MigrateResult<Self> {
        Ok(Self {
            question_marker: Regex::new(r"【\s*問\s*([0-9０-９]{1,9})\s*】")?,
            page_marker: Regex::new(r"(?m)^--- Page [0-9]+ ---[ \t]*(?:\r?\n|$)")?,
        })
    }

    /// 切分为题目块，保持源文本顺序
    pub fn split<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        let markers: Vec<_> = self.question_marker.captures_iter(text).collect();
        let mut blocks = Vec::with_capacity(markers.len());

        for (i, caps) in markers.iter().enumerate() {
            let (Some(whole), Some(numeral)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());

            if let Some(question_number) = parse_numeral(numeral.as_str()) {
                blocks.push(Block {
                    question_number,
                    body: &text[whole.end()..end],
                });
            }
        }

        blocks
    }

    /// 删除 PDF 提取器写入的分页行
    pub fn strip_page_markers<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.page_marker.replace_all(text, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_question_markers() {
        let splitter = BlockSplitter::new().unwrap();
        let text = "前書き【問1】一つ目\n【 問 2 】二つ目【問１０】十番目";
        let blocks = splitter.split(text);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block { question_number: 1, body: "一つ目\n" });
        assert_eq!(blocks[1], Block { question_number: 2, body: "二つ目" });
        assert_eq!(blocks[2], Block { question_number: 10, body: "十番目" });
    }

    #[test]
    fn text_without_markers_has_no_blocks() {
        let splitter = BlockSplitter::new().unwrap();
        assert!(splitter.split("--- Page 1 ---\n表紙").is_empty());
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn last_block_runs_to_end() {
        let splitter = BlockSplitter::new().unwrap();
        let blocks = splitter.split("【問44】最後の問題（１）ア（２）イ");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "最後の問題（１）ア（２）イ");
    }

    #[test]
    fn strips_page_separator_lines() {
        let splitter = BlockSplitter::new().unwrap();
        let text = "--- Page 1 ---\n【問1】前半\n--- Page 2 ---\n後半\n";
        assert_eq!(splitter.strip_page_markers(text), "【問1】前半\n後半\n");
    }
}

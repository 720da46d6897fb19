//! 文本规范化
//!
//! 全角数字转换、空白折叠、按字符截断。

use phf::phf_map;

/// 全角数字 → 半角数字
static FULL_WIDTH_DIGITS: phf::Map<char, char> = phf_map! {
    '０' => '0',
    '１' => '1',
    '２' => '2',
    '３' => '3',
    '４' => '4',
    '５' => '5',
    '６' => '6',
    '７' => '7',
    '８' => '8',
    '９' => '9',
};

/// 把文本中的全角数字转换为半角，其余字符不变
pub fn to_half_width_digits(text: &str) -> String {
    text.chars()
        .map(|c| FULL_WIDTH_DIGITS.get(&c).copied().unwrap_or(c))
        .collect()
}

/// 解析全角或半角数字串，无法解析时返回 `None`
pub fn parse_numeral(numeral: &str) -> Option<u32> {
    let digits = to_half_width_digits(numeral);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// 空白规范化：全角空格转为普通空格，连续空白折叠为一个空格，去掉首尾空白
pub fn normalize_space(text: &str) -> String {
    text.replace('\u{3000}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 按字符（而非字节）截断
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

use crate::error::{MigrateError, MigrateResult};
use serde::{Deserialize, Serialize};

/// 分类区间：问题编号落在 `[first, last]` 内的题目归入该分类
///
/// `last` 为 `None` 表示开放区间（`first` 及以后）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRange {
    pub first: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
    pub label: String,
    pub hazardous: bool,
}

impl CategoryRange {
    pub fn new(first: u32, last: Option<u32>, label: impl Into<String>, hazardous: bool) -> Self {
        Self {
            first,
            last,
            label: label.into(),
            hazardous,
        }
    }

    /// 问题编号是否落在本区间
    pub fn contains(&self, question_number: u32) -> bool {
        question_number >= self.first && self.last.map_or(true, |last| question_number <= last)
    }
}

/// 某一场考试的“题号 → 分类”对照表
///
/// 反序列化同样经过 [`CategoryTable::new`] 校验，因此表一定非空且以开放区间结束。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CategoryRange>", into = "Vec<CategoryRange>")]
pub struct CategoryTable {
    ranges: Vec<CategoryRange>,
}

impl CategoryTable {
    /// 构建并校验分类表
    ///
    /// 区间必须从 1 开始、首尾相接，并以开放区间结束。
    pub fn new(ranges: Vec<CategoryRange>) -> MigrateResult<Self> {
        let table = Self { ranges };
        table.validate()?;
        Ok(table)
    }

    /// 大多数场次使用的五段标准分类
    pub fn standard() -> Self {
        Self {
            ranges: vec![
                CategoryRange::new(1, Some(10), "関係法令（有害業務）", true),
                CategoryRange::new(11, Some(20), "労働衛生（有害業務）", true),
                CategoryRange::new(21, Some(30), "関係法令（有害業務以外）", false),
                CategoryRange::new(31, Some(40), "労働衛生（有害業務以外）", false),
                CategoryRange::new(41, None, "労働生理", false),
            ],
        }
    }

    /// 令和2年4月使用的简写标签（21–40 不带“有害業務以外”）
    pub fn short_labels() -> Self {
        Self {
            ranges: vec![
                CategoryRange::new(1, Some(10), "関係法令（有害業務）", true),
                CategoryRange::new(11, Some(20), "労働衛生（有害業務）", true),
                CategoryRange::new(21, Some(30), "関係法令", false),
                CategoryRange::new(31, Some(40), "労働衛生", false),
                CategoryRange::new(41, None, "労働生理", false),
            ],
        }
    }

    pub fn ranges(&self) -> &[CategoryRange] {
        &self.ranges
    }

    /// 根据问题编号查找分类
    ///
    /// 不属于任何区间的编号（例如 0）落入最后的开放区间。
    pub fn classify(&self, question_number: u32) -> &CategoryRange {
        // 构造时已校验非空
        let tail = &self.ranges[self.ranges.len() - 1];
        self.ranges
            .iter()
            .find(|range| range.contains(question_number))
            .unwrap_or(tail)
    }

    pub fn validate(&self) -> MigrateResult<()> {
        let first = self
            .ranges
            .first()
            .ok_or_else(|| MigrateError::InvalidCategoryTable("分类表为空".to_string()))?;
        if first.first != 1 {
            return Err(MigrateError::InvalidCategoryTable(format!(
                "第一个区间必须从 1 开始，实际为 {}",
                first.first
            )));
        }

        let mut expected_next = 1u32;
        for (i, range) in self.ranges.iter().enumerate() {
            if range.first != expected_next {
                return Err(MigrateError::InvalidCategoryTable(format!(
                    "区间 {} ({}) 应从 {} 开始，实际为 {}",
                    i + 1,
                    range.label,
                    expected_next,
                    range.first
                )));
            }
            let is_last = i + 1 == self.ranges.len();
            match (range.last, is_last) {
                (None, true) => {}
                (None, false) => {
                    return Err(MigrateError::InvalidCategoryTable(format!(
                        "开放区间 ({}) 只能位于末尾",
                        range.label
                    )));
                }
                (Some(_), true) => {
                    return Err(MigrateError::InvalidCategoryTable(
                        "最后一个区间必须是开放区间".to_string(),
                    ));
                }
                (Some(last), false) => {
                    if last < range.first {
                        return Err(MigrateError::InvalidCategoryTable(format!(
                            "区间 ({}) 的结束编号 {} 小于起始编号 {}",
                            range.label, last, range.first
                        )));
                    }
                    expected_next = last.checked_add(1).ok_or_else(|| {
                        MigrateError::InvalidCategoryTable(format!(
                            "区间 ({}) 的结束编号 {} 超出范围",
                            range.label, last
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<CategoryRange>> for CategoryTable {
    type Error = MigrateError;

    fn try_from(ranges: Vec<CategoryRange>) -> MigrateResult<Self> {
        Self::new(ranges)
    }
}

impl From<CategoryTable> for Vec<CategoryRange> {
    fn from(table: CategoryTable) -> Self {
        table.ranges
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

//! # Add Exam Questions
//!
//! 把衛生管理者试题 PDF 的提取文本解析为选择题记录，并追加到 JSON 题库
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题库记录、分类区间表、文件读取
//!
//! ### ② 业务能力层（Services）
//! - `ExamParser` - 题目块切分与解析（纯函数，无 I/O）
//! - `merge_into_bank` - 分配 id / is_premium 并追加
//! - `BankWriter` - 整体重写题库文件
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/migration` - 预检、逐场处理、一次写回
//! - `orchestrator/sitting_processor` - 单场考试的读取与解析
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{Config, SittingConfig};
pub use error::{MigrateError, MigrateResult};
pub use models::{BankEntry, CategoryRange, CategoryTable, ParsedQuestion, QuestionRecord};
pub use orchestrator::{App, RunReport};
pub use services::{merge_into_bank, ExamParser, MergeReport, ParseReport, PremiumPolicy, SkipReason};

//! 编排层（Orchestration Layer）
//!
//! ```text
//! migration (处理 Vec<SittingConfig>，持有题库)
//!     ↓
//! sitting_processor (处理单场考试的原始文本)
//!     ↓
//! services (能力层：parse / merge / write)
//!     ↓
//! models::loaders (读文件)
//! ```
//!
//! 只有 `migration` 持有题库并负责写回。

pub mod migration;
pub mod sitting_processor;

pub use migration::{missing_input_path, App, RunReport, SittingReport};
pub use sitting_processor::process_sitting;

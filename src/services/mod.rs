pub mod bank_merger;
pub mod bank_writer;
pub mod block_splitter;
pub mod exam_parser;
pub mod text_normalizer;

pub use bank_merger::{merge_into_bank, MergeReport, PremiumPolicy};
pub use bank_writer::BankWriter;
pub use block_splitter::{Block, BlockSplitter};
pub use exam_parser::{ExamParser, ParseOutcome, ParseReport, SkipReason, SkippedBlock};

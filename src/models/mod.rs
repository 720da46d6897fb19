pub mod category;
pub mod loaders;
pub mod question;

pub use category::{CategoryRange, CategoryTable};
pub use loaders::{load_bank, load_raw_text};
pub use question::{BankEntry, ParsedQuestion, QuestionRecord};

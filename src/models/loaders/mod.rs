pub mod bank_loader;

pub use bank_loader::{ensure_exists, load_bank, load_raw_text};

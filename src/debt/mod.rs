//! Debt records and debt-list loading

mod data;
pub mod loader;

pub use data::{validate_debts, Debt};
pub use loader::{load_debts, load_debts_from_reader};

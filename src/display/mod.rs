//! Display formatting for terminal output

pub mod ledger;

pub use ledger::{
    format_account_list, format_budget_list, format_ledger, format_transaction_register,
    format_transaction_row,
};

//! Ledger display formatting
//!
//! Plain-text tables for the accounts, transactions and budgets of a user.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Account, Budget, Ledger, Transaction};

/// Format the account names, one per line
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let mut output = String::from("Accounts\n");
    output.push_str(&"-".repeat(30));
    output.push('\n');
    for account in accounts {
        output.push_str(&format!("  {}\n", account.name));
    }
    output
}

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, date_format: &str) -> String {
    let status_icon = if txn.settled { "✓" } else { " " };

    format!(
        "{} {:10} {:20} {:15} {:>14} {:4} {}",
        status_icon,
        format_date(txn.date, date_format),
        truncate(&txn.label, 20),
        truncate(&txn.account, 15),
        txn.amount.to_string(),
        txn.mode,
        txn.budget
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:10} {:20} {:15} {:>14} {:4} {}\n",
        "", "Date", "Label", "Account", "Amount", "Mode", "Budget"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, date_format));
        output.push('\n');
    }

    output
}

/// Format budgets with their cap and account
pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let label_width = budgets
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = format!(
        "{:<label_width$}  {:>12}  {}\n",
        "Label",
        "Cap",
        "Account",
        label_width = label_width
    );
    output.push_str(&format!(
        "{:-<label_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        label_width = label_width
    ));

    for budget in budgets {
        output.push_str(&format!(
            "{:<label_width$}  {:>12}  {}\n",
            budget.label,
            budget.cap.to_string(),
            budget.account,
            label_width = label_width
        ));
    }

    output
}

/// Format a whole ledger
pub fn format_ledger(ledger: &Ledger, date_format: &str) -> String {
    let mut output = format_account_list(&ledger.accounts);
    output.push('\n');
    output.push_str(&format_transaction_register(&ledger.transactions, date_format));
    output.push('\n');
    output.push_str(&format_budget_list(&ledger.budgets));
    output
}

/// Format a date, falling back to dd/mm/yyyy on an invalid format string
fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.format("%d/%m/%Y").to_string();
    }
    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

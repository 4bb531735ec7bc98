//! Record codec for the line-oriented user file
//!
//! Each line is a 3-letter tag followed by `*`-separated fields:
//!
//! ```text
//! CPT*<name>
//! OPE*<dd/mm/yyyy>*<label>*<account>*<amount>*<mode>*<True|False>*<budget>
//! BUD*<label>*<cap>*<account>
//! ```
//!
//! Decoding dispatches on the tag and requires the exact field count of that
//! tag. Callers drop lines that fail to decode.

use chrono::NaiveDate;
use thiserror::Error;

use crate::crypto::RECORD_SEPARATOR;
use crate::models::{Account, Budget, Money, MoneyParseError, Transaction};

pub const ACCOUNT_TAG: &str = "CPT";
pub const TRANSACTION_TAG: &str = "OPE";
pub const BUDGET_TAG: &str = "BUD";

/// Field counts, tag included
const ACCOUNT_ARITY: usize = 2;
const TRANSACTION_ARITY: usize = 8;
const BUDGET_ARITY: usize = 4;

const SETTLED_TOKEN: &str = "True";
const PENDING_TOKEN: &str = "False";

/// One decoded line of a user file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Account(Account),
    Transaction(Transaction),
    Budget(Budget),
}

/// Why a line could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown tag {0:?}")]
    UnknownTag(String),

    #[error("{tag} line has {found} fields, expected {expected}")]
    Arity {
        tag: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid date {0:?}")]
    InvalidDate(String),

    #[error(transparent)]
    InvalidAmount(#[from] MoneyParseError),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

/// A field that would break the line structure once written
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {value:?} {reason}")]
pub struct EncodeError {
    pub field: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl Record {
    /// Decode one revealed line, ignoring whitespace at either end
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let line = line.trim();
        let fields: Vec<&str> = line.split(RECORD_SEPARATOR).collect();

        match fields[0] {
            ACCOUNT_TAG => {
                check_arity(ACCOUNT_TAG, ACCOUNT_ARITY, &fields)?;
                let name = non_empty("account name", fields[1])?;
                Ok(Record::Account(Account::new(name)))
            }
            TRANSACTION_TAG => {
                check_arity(TRANSACTION_TAG, TRANSACTION_ARITY, &fields)?;
                Ok(Record::Transaction(Transaction {
                    date: decode_date(fields[1])?,
                    label: fields[2].to_string(),
                    account: fields[3].to_string(),
                    amount: Money::parse(fields[4])?,
                    mode: fields[5].to_string(),
                    settled: fields[6] == SETTLED_TOKEN,
                    budget: fields[7].to_string(),
                }))
            }
            BUDGET_TAG => {
                check_arity(BUDGET_TAG, BUDGET_ARITY, &fields)?;
                Ok(Record::Budget(Budget {
                    label: non_empty("budget label", fields[1])?.to_string(),
                    cap: Money::parse(fields[2])?,
                    account: fields[3].to_string(),
                }))
            }
            other => Err(DecodeError::UnknownTag(other.to_string())),
        }
    }

    /// Render the record as one line, without terminator
    pub fn encode(&self) -> String {
        match self {
            Record::Account(account) => encode_account(account),
            Record::Transaction(txn) => encode_transaction(txn),
            Record::Budget(budget) => encode_budget(budget),
        }
    }

    /// Check that every text field survives a write and re-read unchanged
    pub fn check_encodable(&self) -> Result<(), EncodeError> {
        match self {
            Record::Account(account) => check_last_field("account name", &account.name),
            Record::Transaction(txn) => {
                check_field("label", &txn.label)?;
                check_field("account", &txn.account)?;
                check_field("payment mode", &txn.mode)?;
                check_last_field("budget", &txn.budget)
            }
            Record::Budget(budget) => {
                check_field("budget label", &budget.label)?;
                check_last_field("account", &budget.account)
            }
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Record::Account(_) => ACCOUNT_TAG,
            Record::Transaction(_) => TRANSACTION_TAG,
            Record::Budget(_) => BUDGET_TAG,
        }
    }
}

pub fn encode_account(account: &Account) -> String {
    format!("{}*{}", ACCOUNT_TAG, account.name)
}

pub fn encode_transaction(txn: &Transaction) -> String {
    format!(
        "{}*{}*{}*{}*{}*{}*{}*{}",
        TRANSACTION_TAG,
        encode_date(txn.date),
        txn.label,
        txn.account,
        txn.amount,
        txn.mode,
        if txn.settled { SETTLED_TOKEN } else { PENDING_TOKEN },
        txn.budget
    )
}

pub fn encode_budget(budget: &Budget) -> String {
    format!(
        "{}*{}*{}*{}",
        BUDGET_TAG, budget.label, budget.cap, budget.account
    )
}

fn encode_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Read `dd/mm/yyyy` by fixed positions
fn decode_date(s: &str) -> Result<NaiveDate, DecodeError> {
    let invalid = || DecodeError::InvalidDate(s.to_string());

    let day: u32 = s.get(0..2).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let month: u32 = s.get(3..5).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let year: i32 = s.get(6..).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn check_arity(tag: &'static str, expected: usize, fields: &[&str]) -> Result<(), DecodeError> {
    if fields.len() != expected {
        return Err(DecodeError::Arity {
            tag,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DecodeError> {
    if value.trim().is_empty() {
        return Err(DecodeError::EmptyField(field));
    }
    Ok(value)
}

fn check_field(field: &'static str, value: &str) -> Result<(), EncodeError> {
    if value.contains([RECORD_SEPARATOR, crate::crypto::LINE_TERMINATOR, '\r']) {
        return Err(EncodeError {
            field,
            value: value.to_string(),
            reason: "contains a record separator or line break",
        });
    }
    Ok(())
}

/// The last field of a line also loses trailing whitespace on decode
fn check_last_field(field: &'static str, value: &str) -> Result<(), EncodeError> {
    check_field(field, value)?;
    if value.trim_end() != value {
        return Err(EncodeError {
            field,
            value: value.to_string(),
            reason: "ends with whitespace",
        });
    }
    Ok(())
}

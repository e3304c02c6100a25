use crate::engine::amount::AmountError;
use crate::engine::{AccountSnapshot, Amount, TransactionKind, TransactionRecord};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const NO_TRANSACTIONS: &str = "No transactions yet.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountOperationError {
    #[error("Insufficient funds.")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Amount),

    #[error("Amount operation failed: {0}")]
    Amount(#[from] AmountError),
}

/// Opaque account number, unique for the whole life of a ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cosmetic only, both types behave the same
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AccountType {
    #[default]
    Savings,
    Checking,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown account type: {0}")]
pub struct ParseAccountTypeError(pub String);

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "checking" => Ok(AccountType::Checking),
            _ => Err(ParseAccountTypeError(s.into())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => write!(f, "Savings"),
            AccountType::Checking => write!(f, "Checking"),
        }
    }
}

/// Confirmation of a successful deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub kind: TransactionKind,
    /// Always positive, the amount requested by the caller
    pub amount: Amount,
    pub balance: Amount,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            TransactionKind::Deposit => "Deposited",
            TransactionKind::Withdraw => "Withdrew",
        };
        write!(
            f,
            "{verb} ${}. New balance: ${}",
            self.amount, self.balance
        )
    }
}

/// Read-only view over an account's transactions.
/// Lines are only rendered when iterated, and the view can be iterated any number of times.
#[derive(Debug, Clone, Copy)]
pub struct History<'a> {
    records: &'a [TransactionRecord],
}

impl<'a> History<'a> {
    pub fn lines(&self) -> impl Iterator<Item = String> + use<'a> {
        self.records.iter().map(|record| record.to_string())
    }

    pub fn records(&self) -> &'a [TransactionRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for History<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(NO_TRANSACTIONS);
        }

        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

// Client Account
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    holder_name: String,
    balance: Amount,
    account_type: AccountType,
    created_at: NaiveDate,
    transactions: Vec<TransactionRecord>,
}

impl Account {
    /// The opening balance is not recorded as a transaction.
    pub fn new(
        id: AccountId,
        holder_name: impl Into<String>,
        opening_balance: Amount,
        account_type: AccountType,
    ) -> Self {
        Account {
            id,
            holder_name: holder_name.into(),
            balance: opening_balance,
            account_type,
            created_at: Local::now().date_naive(),
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<Receipt, AccountOperationError> {
        self.deposit_at(amount, Local::now().naive_local())
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<Receipt, AccountOperationError> {
        self.withdraw_at(amount, Local::now().naive_local())
    }

    pub fn deposit_at(
        &mut self,
        amount: Amount,
        timestamp: NaiveDateTime,
    ) -> Result<Receipt, AccountOperationError> {
        if amount.is_negative() {
            return Err(AccountOperationError::NegativeAmount(amount));
        }

        let balance = self.balance.add(&amount)?;
        self.commit(TransactionKind::Deposit, amount, balance, timestamp)?;

        log::debug!("Account {}: deposited {amount}, balance {balance}", self.id);
        Ok(Receipt {
            kind: TransactionKind::Deposit,
            amount,
            balance,
        })
    }

    pub fn withdraw_at(
        &mut self,
        amount: Amount,
        timestamp: NaiveDateTime,
    ) -> Result<Receipt, AccountOperationError> {
        if amount.is_negative() {
            return Err(AccountOperationError::NegativeAmount(amount));
        }
        if amount > self.balance {
            return Err(AccountOperationError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        let balance = self.balance.sub(&amount)?;
        self.commit(TransactionKind::Withdraw, amount, balance, timestamp)?;

        log::debug!("Account {}: withdrew {amount}, balance {balance}", self.id);
        Ok(Receipt {
            kind: TransactionKind::Withdraw,
            amount,
            balance,
        })
    }

    pub fn details(&self) -> AccountSnapshot {
        AccountSnapshot::from(self)
    }

    pub fn history(&self) -> History<'_> {
        History {
            records: &self.transactions,
        }
    }

    // Nothing is mutated unless every computation succeeded
    fn commit(
        &mut self,
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
        timestamp: NaiveDateTime,
    ) -> Result<(), AccountOperationError> {
        let signed = match kind {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdraw => amount.negate()?,
        };

        self.transactions.push(TransactionRecord {
            kind,
            amount: signed,
            timestamp,
        });
        self.balance = balance;
        Ok(())
    }
}

use crate::engine::{
    Account, AccountId, AccountOperationError, AccountSnapshot, AccountType, Amount, Ledger,
    LedgerError, ParseAccountTypeError, Receipt,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TellerError {
    #[error("Invalid input!")]
    InvalidInput,

    #[error("Invalid amount!")]
    InvalidAmount(String),

    #[error("{0}")]
    AccountType(#[from] ParseAccountTypeError),

    #[error("Account not found!")]
    AccountNotFound(String),

    #[error("{0}")]
    Account(#[from] AccountOperationError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

/// Successful outcome of a teller action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Created(AccountId),
    Details(AccountSnapshot),
    Receipt(Receipt),
    History(String),
    Closed(AccountId),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Created(id) => write!(f, "Account Created! Account Number: {id}"),
            Reply::Details(snapshot) => write!(f, "{snapshot}"),
            Reply::Receipt(receipt) => write!(f, "{receipt}"),
            Reply::History(history) => f.write_str(history),
            Reply::Closed(id) => write!(f, "Account {id} closed."),
        }
    }
}

/// Headless front desk: one method per user action, taking raw text the way a form would.
/// Owns the ledger, so nothing else can reach the accounts.
#[derive(Default)]
pub struct Teller {
    ledger: Ledger,
}

impl Teller {
    pub fn new(ledger: Ledger) -> Self {
        Teller { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn create_account(
        &mut self,
        name: &str,
        balance: &str,
        account_type: &str,
    ) -> Result<Reply, TellerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TellerError::InvalidInput);
        }
        let balance = parse_amount_input(balance).ok_or(TellerError::InvalidInput)?;
        let account_type = if account_type.trim().is_empty() {
            AccountType::default()
        } else {
            AccountType::from_str(account_type)?
        };

        let id = self.ledger.create_account(name, balance, account_type)?;
        Ok(Reply::Created(id))
    }

    pub fn account_details(&self, id: &str) -> Result<Reply, TellerError> {
        let account = self.find(id)?;
        Ok(Reply::Details(account.details()))
    }

    pub fn deposit(&mut self, id: &str, amount: &str) -> Result<Reply, TellerError> {
        let amount = parse_amount_input(amount)
            .ok_or_else(|| TellerError::InvalidAmount(amount.into()))?;
        let receipt = self.find_mut(id)?.deposit(amount)?;
        Ok(Reply::Receipt(receipt))
    }

    pub fn withdraw(&mut self, id: &str, amount: &str) -> Result<Reply, TellerError> {
        let amount = parse_amount_input(amount)
            .ok_or_else(|| TellerError::InvalidAmount(amount.into()))?;
        let receipt = self.find_mut(id)?.withdraw(amount)?;
        Ok(Reply::Receipt(receipt))
    }

    pub fn transaction_history(&self, id: &str) -> Result<Reply, TellerError> {
        let account = self.find(id)?;
        Ok(Reply::History(account.history().to_string()))
    }

    pub fn close_account(&mut self, id: &str) -> Result<Reply, TellerError> {
        match self.ledger.delete_account(id.trim()) {
            Some(account) => Ok(Reply::Closed(account.id().clone())),
            None => Err(TellerError::AccountNotFound(id.into())),
        }
    }

    fn find(&self, id: &str) -> Result<&Account, TellerError> {
        self.ledger
            .get_account(id.trim())
            .ok_or_else(|| TellerError::AccountNotFound(id.into()))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Account, TellerError> {
        self.ledger
            .get_account_mut(id.trim())
            .ok_or_else(|| TellerError::AccountNotFound(id.into()))
    }
}

/// Plain non-negative money text: digits, at most one '.', at most two decimals
fn parse_amount_input(text: &str) -> Option<Amount> {
    let text = text.trim();
    let (left, decimals) = match text.split_once('.') {
        Some((left, right)) => (left, right),
        None => (text, ""),
    };

    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if left.is_empty() || !digits(left) || !digits(decimals) || decimals.len() > 2 {
        return None;
    }

    Amount::from_str(text).ok()
}

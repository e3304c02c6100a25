use crate::engine::{Account, AccountId, AccountType, Amount};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A Snapshot of an Account to easily view the content
/// It is used for decoupling the details view from Account and easy serialisation
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub account: AccountId,
    pub holder: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Amount,
    pub created: NaiveDate,
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        AccountSnapshot {
            account: account.id().clone(),
            holder: account.holder_name().to_owned(),
            account_type: account.account_type(),
            balance: account.balance(),
            created: account.created_at(),
        }
    }
}

impl fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account: {}\nHolder: {}\nType: {}\nBalance: ${}\nCreated: {}",
            self.account,
            self.holder,
            self.account_type,
            self.balance,
            self.created.format("%Y-%m-%d")
        )
    }
}

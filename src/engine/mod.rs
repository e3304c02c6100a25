mod account;
mod account_snapshot;
mod amount;
mod ledger;
mod transaction;

pub use account::{
    Account, AccountId, AccountOperationError, AccountType, History, NO_TRANSACTIONS,
    ParseAccountTypeError, Receipt,
};
pub use account_snapshot::AccountSnapshot;
pub use amount::{Amount, AmountError};
pub use ledger::{IdGenerator, Ledger, LedgerError, RandomIds, SequentialIds};
pub use transaction::{
    TIMESTAMP_FORMAT, TIMESTAMP_MICROS_FORMAT, TransactionKind, TransactionRecord,
};

use crate::engine::{Account, AccountId, AccountSnapshot, AccountType, Amount};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Opening balance must not be negative: {0}")]
    NegativeOpeningBalance(Amount),
}

/// Source of fresh account numbers.
/// The ledger rejects any id it already issued, so generators only need to be collision resistant.
pub trait IdGenerator {
    fn next_id(&mut self) -> AccountId;
}

/// 8 hex chars taken from a v4 uuid
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> AccountId {
        let uuid = Uuid::new_v4().simple().to_string();
        AccountId::new(&uuid[..8])
    }
}

/// `acc00001`, `acc00002`, ... for reproducible runs
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> AccountId {
        self.last += 1;
        AccountId::new(format!("acc{:05}", self.last))
    }
}

pub struct Ledger {
    accounts: HashMap<AccountId, Account>,
    // Every id ever handed out, deleted accounts included
    issued: HashSet<AccountId>,
    ids: Box<dyn IdGenerator>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::with_id_generator(RandomIds)
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Ledger {
            accounts: HashMap::new(),
            issued: HashSet::new(),
            ids: Box::new(ids),
        }
    }

    pub fn create_account(
        &mut self,
        holder_name: impl Into<String>,
        opening_balance: Amount,
        account_type: AccountType,
    ) -> Result<AccountId, LedgerError> {
        if opening_balance.is_negative() {
            return Err(LedgerError::NegativeOpeningBalance(opening_balance));
        }

        let id = self.fresh_id();
        let account = Account::new(id.clone(), holder_name, opening_balance, account_type);
        log::debug!(
            "Created {account_type} account {id} with opening balance {opening_balance}"
        );

        self.accounts.insert(id.clone(), account);
        Ok(id)
    }

    pub fn get_account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn get_account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    /// The id stays retired after deletion
    pub fn delete_account(&mut self, id: &str) -> Option<Account> {
        let removed = self.accounts.remove(id);
        if removed.is_some() {
            log::debug!("Deleted account {id}");
        }
        removed
    }

    pub fn account_snapshots(&self) -> impl Iterator<Item = AccountSnapshot> + '_ {
        self.accounts.values().map(AccountSnapshot::from)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn fresh_id(&mut self) -> AccountId {
        loop {
            let id = self.ids.next_id();
            if self.issued.insert(id.clone()) {
                return id;
            }
            log::warn!("Generated account id {id} was already issued, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, Ledger, LedgerError, SequentialIds};
    use crate::engine::{AccountId, AccountType, Amount};
    use std::collections::HashSet;

    /// Replays a fixed list of ids, to force collisions
    struct ScriptedIds(Vec<&'static str>);

    impl IdGenerator for ScriptedIds {
        fn next_id(&mut self) -> AccountId {
            AccountId::new(self.0.remove(0))
        }
    }

    #[test]
    fn test_that_created_account_can_be_looked_up() {
        let mut ledger = Ledger::new();

        let id = ledger
            .create_account("Alice", Amount::units(100), AccountType::Savings)
            .unwrap();

        let details = ledger.get_account(id.as_str()).unwrap().details().to_string();
        assert!(details.contains("Alice"));
        assert!(details.contains("Savings"));
        assert!(details.contains("100.00"));
        assert_eq!(id.as_str().len(), 8);
    }

    #[test]
    fn test_that_every_created_account_has_unique_id() {
        let mut ledger = Ledger::new();
        let mut ids = HashSet::new();

        for i in 0..500 {
            let id = ledger
                .create_account(format!("holder {i}"), Amount::ZERO, AccountType::Checking)
                .unwrap();
            assert!(ids.insert(id));
        }

        assert_eq!(ledger.len(), 500);
    }

    #[test]
    fn test_that_deleted_account_is_absent() {
        let mut ledger = Ledger::with_id_generator(SequentialIds::default());
        let id = ledger
            .create_account("Bob", Amount::units(5), AccountType::Checking)
            .unwrap();

        let removed = ledger.delete_account(id.as_str());

        assert_eq!(removed.map(|a| a.balance()), Some(Amount::units(5)));
        assert!(ledger.get_account(id.as_str()).is_none());
        assert!(ledger.delete_account(id.as_str()).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_that_unknown_id_is_absent() {
        let mut ledger = Ledger::new();

        assert!(ledger.get_account("missing").is_none());
        assert!(ledger.get_account_mut("missing").is_none());
        assert!(ledger.delete_account("missing").is_none());
    }

    #[test]
    fn test_that_ids_are_never_reused() {
        let mut ledger = Ledger::with_id_generator(ScriptedIds(vec!["aaaa", "aaaa", "bbbb"]));

        let first = ledger
            .create_account("Alice", Amount::ZERO, AccountType::Savings)
            .unwrap();
        ledger.delete_account(first.as_str());
        let second = ledger
            .create_account("Bob", Amount::ZERO, AccountType::Savings)
            .unwrap();

        assert_eq!(first.as_str(), "aaaa");
        assert_eq!(second.as_str(), "bbbb");
    }

    #[test]
    fn test_that_sequential_ids_are_zero_padded() {
        let mut ledger = Ledger::with_id_generator(SequentialIds::default());

        let first = ledger
            .create_account("Alice", Amount::ZERO, AccountType::Savings)
            .unwrap();
        let second = ledger
            .create_account("Bob", Amount::ZERO, AccountType::Savings)
            .unwrap();

        assert_eq!(first.as_str(), "acc00001");
        assert_eq!(second.as_str(), "acc00002");
    }

    #[test]
    fn test_that_negative_opening_balance_is_rejected() {
        let mut ledger = Ledger::new();

        let result = ledger.create_account("Eve", Amount::from_cents(-1), AccountType::Savings);

        assert_eq!(
            result,
            Err(LedgerError::NegativeOpeningBalance(Amount::from_cents(-1)))
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_that_deposit_through_ledger_is_kept() {
        let mut ledger = Ledger::new();
        let id = ledger
            .create_account("Alice", Amount::units(100), AccountType::Savings)
            .unwrap();

        let receipt = ledger
            .get_account_mut(id.as_str())
            .unwrap()
            .deposit(Amount::units(50))
            .unwrap();

        assert!(receipt.to_string().contains("150.00"));
        assert_eq!(
            ledger.get_account(id.as_str()).unwrap().balance(),
            Amount::units(150)
        );
        assert_eq!(ledger.account_snapshots().count(), 1);
    }
}

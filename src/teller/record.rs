use serde::{Deserialize, Serialize};

/// One row of a teller script.
/// `account` is an alias when creating, and an alias or a literal account number otherwise.
#[derive(Deserialize, Debug, Clone)]
pub struct ScriptRecord {
    pub action: Action,
    pub account: Option<String>,
    pub name: Option<String>,
    pub amount: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Details,
    Deposit,
    Withdraw,
    History,
    Close,
}

impl ScriptRecord {
    pub fn account(&self) -> &str {
        self.account.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn amount(&self) -> &str {
        self.amount.as_deref().unwrap_or_default()
    }

    pub fn account_type(&self) -> &str {
        self.account_type.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ScriptRecord};
    use csv::Trim;

    #[test]
    fn test_that_script_rows_are_deserialised() {
        let contents = "\
action, account, name, amount, type
create, alice, Alice Smith, 100, checking
deposit, alice, , 25.50,
close, 1a2b3c4d, , ,
";
        let mut rdr = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(contents.as_bytes());

        let records: Vec<ScriptRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].action, Action::Create);
        assert_eq!(records[0].name(), "Alice Smith");
        assert_eq!(records[0].account_type(), "checking");
        assert_eq!(records[1].action, Action::Deposit);
        assert_eq!(records[1].amount(), "25.50");
        assert_eq!(records[1].name, None);
        assert_eq!(records[2].account(), "1a2b3c4d");
        assert_eq!(records[2].amount(), "");
    }

    #[test]
    fn test_that_unknown_action_fails_to_deserialise() {
        let contents = "action,account,name,amount,type\ntransfer,alice,,5,\n";
        let mut rdr = csv::Reader::from_reader(contents.as_bytes());

        let result = rdr.deserialize::<ScriptRecord>().next().unwrap();

        assert!(result.is_err());
    }
}

use crate::engine::Ledger;
use crate::teller::{Action, Reply, ScriptRecord, Teller, TellerError};
use anyhow::{Context, Result};
use csv::Trim;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Alias already in use: {0}")]
    AliasTaken(String),

    #[error(transparent)]
    Teller(#[from] TellerError),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Result of one script row, written back as CSV
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Outcome {
    pub line: u64,
    pub action: Action,
    pub account: String,
    pub status: Status,
    pub message: String,
}

/// Replays teller scripts, remembering the aliases given to created accounts
pub struct Session {
    teller: Teller,
    aliases: HashMap<String, String>,
}

impl Session {
    pub fn new(teller: Teller) -> Self {
        Session {
            teller,
            aliases: HashMap::new(),
        }
    }

    pub fn teller(&self) -> &Teller {
        &self.teller
    }

    pub fn apply(&mut self, line: u64, record: &ScriptRecord) -> Outcome {
        let account = self.resolve(record.account());

        match self.dispatch(&account, record) {
            Ok(reply) => {
                let account = match &reply {
                    Reply::Created(id) => {
                        if !record.account().is_empty() {
                            self.aliases
                                .insert(record.account().to_owned(), id.to_string());
                        }
                        id.to_string()
                    }
                    _ => account,
                };
                Outcome {
                    line,
                    action: record.action,
                    account,
                    status: Status::Ok,
                    message: reply.to_string(),
                }
            }
            Err(e) => {
                log::warn!("Line {line}: {:?} rejected: {e}", record.action);
                Outcome {
                    line,
                    action: record.action,
                    account,
                    status: Status::Error,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Rows that cannot be read or deserialised are logged and skipped
    pub fn replay<R: io::Read>(&mut self, reader: R) -> Result<Vec<Outcome>> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr
            .headers()
            .context("Cannot read script header")?
            .clone();

        let mut outcomes = Vec::new();

        log::debug!("Started deserialising script records");
        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("Error reading script row: {e}");
                    continue;
                }
            };
            let line = row.position().map_or(0, |p| p.line());

            log::debug!("Deserialising row into ScriptRecord: {row:?}");
            let record: ScriptRecord = match row.deserialize(Some(&headers)) {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Error deserializing script row at line {line}: {e}");
                    continue;
                }
            };

            outcomes.push(self.apply(line, &record));
        }

        Ok(outcomes)
    }

    fn dispatch(&mut self, account: &str, record: &ScriptRecord) -> Result<Reply, SessionError> {
        let reply = match record.action {
            Action::Create => return self.create(record),
            Action::Details => self.teller.account_details(account)?,
            Action::Deposit => self.teller.deposit(account, record.amount())?,
            Action::Withdraw => self.teller.withdraw(account, record.amount())?,
            Action::History => self.teller.transaction_history(account)?,
            Action::Close => self.teller.close_account(account)?,
        };
        Ok(reply)
    }

    /// The alias must not shadow another alias or a live account number
    fn create(&mut self, record: &ScriptRecord) -> Result<Reply, SessionError> {
        let alias = record.account();
        let live_account = self.teller.ledger().get_account(alias).is_some();
        if !alias.is_empty() && (live_account || self.aliases.contains_key(alias)) {
            return Err(SessionError::AliasTaken(alias.to_owned()));
        }

        let reply = self
            .teller
            .create_account(record.name(), record.amount(), record.account_type())?;
        Ok(reply)
    }

    /// Live account numbers win over aliases
    fn resolve(&self, account: &str) -> String {
        if self.teller.ledger().get_account(account).is_some() {
            return account.to_owned();
        }

        match self.aliases.get(account) {
            Some(id) => id.clone(),
            None => account.to_owned(),
        }
    }
}

pub fn write_outcomes<W: io::Write>(outcomes: &[Outcome], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    log::debug!("Starting outcome serialisation");
    for outcome in outcomes {
        wtr.serialize(outcome)?;
    }

    log::debug!("Outcome serialisation done -> Flushing");
    wtr.flush()?;

    Ok(())
}

/// Final state of every open account, ordered by account number
pub fn write_snapshots<W: io::Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut snapshots: Vec<_> = ledger.account_snapshots().collect();
    snapshots.sort_by(|a, b| a.account.cmp(&b.account));

    log::debug!("Starting account snapshot serialisation");
    for snapshot in snapshots {
        log::debug!("Serialising account snapshot: {snapshot:?}");
        wtr.serialize(snapshot)?;
    }

    log::debug!("Account snapshot serialisation done -> Flushing");
    wtr.flush()?;

    Ok(())
}

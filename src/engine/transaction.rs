use crate::engine::Amount;
use chrono::{NaiveDateTime, Timelike};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Used when the timestamp has a sub-second part
pub const TIMESTAMP_MICROS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Balance-changing event stored by an account, never modified once appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    /// Signed: deposits are positive, withdrawals negative
    pub amount: Amount,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdraw => write!(f, "Withdraw"),
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if self.timestamp.nanosecond() / 1_000 == 0 {
            TIMESTAMP_FORMAT
        } else {
            TIMESTAMP_MICROS_FORMAT
        };
        write!(
            f,
            "{} - {}: ${}",
            self.timestamp.format(format),
            self.kind,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{TransactionKind, TransactionRecord};
    use crate::engine::Amount;
    use chrono::NaiveDate;

    #[test]
    fn test_that_record_is_rendered_as_history_line() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(14, 5, 7, 250)
            .unwrap();

        let record = TransactionRecord {
            kind: TransactionKind::Withdraw,
            amount: Amount::from_cents(-2550),
            timestamp,
        };

        assert_eq!(
            record.to_string(),
            "2024-03-09 14:05:07.000250 - Withdraw: $-25.50"
        );
    }

    #[test]
    fn test_that_whole_second_timestamp_has_no_fraction() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();

        let record = TransactionRecord {
            kind: TransactionKind::Deposit,
            amount: Amount::units(10),
            timestamp,
        };

        assert_eq!(record.to_string(), "2024-03-09 14:05:07 - Deposit: $10.00");
    }
}

mod desk;
mod record;
mod session;

pub use desk::{Reply, Teller, TellerError};
pub use record::{Action, ScriptRecord};
pub use session::{Outcome, Session, SessionError, Status, write_outcomes, write_snapshots};

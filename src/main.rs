use crab_bank::config::Config;
use crab_bank::teller::{Outcome, Session, Teller, write_outcomes, write_snapshots};
use simple_logger::SimpleLogger;
use std::path::Path;
use std::{error::Error, fs::File, io};

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new().env().init()?;

    log::debug!("Application started");

    let config = Config::from_env()?;
    log::debug!("Loaded configuration: {config:?}");

    log::debug!("Script replay: Starting");
    let mut session = Session::new(Teller::new(config.ledger()));
    let outcomes = replay_script(&mut session, &config)?;
    log::debug!("Script replay: Done");

    log::debug!("Exporting outcomes to stdout: Started");
    write_outcomes(&outcomes, io::stdout().lock())?;
    log::debug!("Exporting outcomes to stdout: Done");

    if let Some(path) = &config.snapshot {
        log::debug!("Exporting account snapshots to {path:?}: Started");
        write_snapshots(session.teller().ledger(), File::create(path)?)?;
        log::debug!("Exporting account snapshots to {path:?}: Done");
    }

    log::debug!("Application finished");

    Ok(())
}

fn replay_script(session: &mut Session, config: &Config) -> Result<Vec<Outcome>, Box<dyn Error>> {
    let outcomes = match &config.script {
        Some(path) => replay_script_from_filepath(session, path)?,
        None => {
            log::debug!("No script path given, reading stdin");
            session.replay(io::stdin().lock())?
        }
    };

    Ok(outcomes)
}

fn replay_script_from_filepath(
    session: &mut Session,
    filepath: &Path,
) -> Result<Vec<Outcome>, Box<dyn Error>> {
    log::debug!("Opening script: {filepath:?}");
    let file = File::open(filepath)?;

    Ok(session.replay(file)?)
}

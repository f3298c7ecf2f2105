use log::{debug, warn};
use rusqlite::{Connection, Transaction};

/// Runs `work` inside one transaction and finishes it.
///
/// Commits when `work` returns `Ok`; otherwise the transaction is dropped,
/// which rolls back every statement issued through it. Repositories borrow the
/// transaction (it dereferences to [`Connection`]) and never finish it
/// themselves.
pub fn with_unit_of_work<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<rusqlite::Error>,
{
    let tx = conn.transaction()?;
    match work(&tx) {
        Ok(value) => {
            tx.commit()?;
            debug!("event=unit_of_work module=db status=committed");
            Ok(value)
        }
        Err(err) => {
            drop(tx);
            warn!("event=unit_of_work module=db status=rolled_back");
            Err(err)
        }
    }
}

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::debug;

use super::txn_policy::{self, TxnPolicy};

/// Boxed future returned by `with_txn` closures; borrows the transaction.
pub type TxnFuture<'c, R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>;

/// A transaction owned by the caller, e.g. a test that wants several
/// operations to share one unit of work and roll it all back at the end.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a new transaction to share.
    pub async fn open(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self(Arc::new(db.begin().await?)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Roll back, provided this is the last handle.
    pub async fn rollback(self) -> Result<(), DbErr> {
        match Arc::try_unwrap(self.0) {
            Ok(txn) => txn.rollback().await,
            // other clones alive: dropping the last one rolls back
            Err(_) => Ok(()),
        }
    }
}

/// Execute `f` within a database transaction.
///
/// 1) With a `SharedTxn` → run inside it (no commit/rollback here)
/// 2) Otherwise → begin, run, apply the policy on `Ok`, roll back on `Err`
///
/// The closure must only capture owned data; it borrows the transaction for
/// the duration of the returned future. Dropping the future before it
/// completes drops the transaction, which rolls it back.
pub async fn with_txn<R, E, F>(
    shared: Option<&SharedTxn>,
    db: &DatabaseConnection,
    f: F,
) -> Result<R, E>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R, E> + Send,
    E: From<DbErr>,
{
    if let Some(shared) = shared {
        return f(shared.transaction()).await;
    }

    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                debug!("txn=commit");
                Ok(val)
            }
            TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                debug!("txn=rollback policy=rollback_on_ok");
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            debug!("txn=rollback reason=error");
            Err(err)
        }
    }
}

//! Per-batch bridge between a query dispatcher and a typed callback.
//!
//! For every reply batch the adapter materializes a record list, lends it to
//! the user callback, and releases it before returning to the dispatcher.
//! Release happens on every path, including when the callback fails.

use crate::error::RosResult;
use crate::materialize::{materialize_into, FromSentence, RecordStore};
use crate::reply::Reply;
use tracing::{debug, warn};

/// Handles one reply batch with a fresh `Vec` as record storage.
pub fn dispatch_batch<'r, C, T, F>(conn: &C, reply: &'r Reply, callback: &mut F) -> RosResult<()>
where
    C: ?Sized,
    T: FromSentence<'r>,
    F: FnMut(&C, &[T]) -> RosResult<()>,
{
    dispatch_batch_in(conn, reply, Vec::new(), callback)
}

/// Handles one reply batch using `store` as record storage.
///
/// If materialization fails the callback is not invoked and the error is
/// returned. Otherwise the callback's result is returned after `store` has
/// been dropped.
pub fn dispatch_batch_in<'r, C, T, S, F>(
    conn: &C,
    reply: &'r Reply,
    store: S,
    callback: &mut F,
) -> RosResult<()>
where
    C: ?Sized,
    T: FromSentence<'r>,
    S: RecordStore<T>,
    F: FnMut(&C, &[T]) -> RosResult<()>,
{
    let store = materialize_into(reply, store)?;
    debug!(
        kind = T::KIND,
        sentences = reply.len(),
        records = store.records().len(),
        "materialized reply batch"
    );

    let status = callback(conn, store.records());
    drop(store);

    if let Err(ref e) = status {
        warn!(kind = T::KIND, error = %e, "record callback failed");
    }
    status
}

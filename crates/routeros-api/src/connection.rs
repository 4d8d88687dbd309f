//! Query dispatch seam.
//!
//! Transport, login and sentence framing live behind this trait. High-level
//! queries only need a way to send a command and receive decoded reply
//! batches.

use crate::error::RosResult;
use crate::reply::Reply;

/// A connection capable of issuing API commands.
pub trait Connection {
    /// Sends `command` with `args` and calls `handler` once per reply batch.
    ///
    /// The reply passed to `handler` is only valid for the duration of that
    /// call. If `handler` returns an error, dispatching stops and the error
    /// is returned. Dispatcher and transport failures are returned as-is.
    fn query<H>(&mut self, command: &str, args: &[&str], handler: H) -> RosResult<()>
    where
        H: FnMut(&Self, &Reply) -> RosResult<()>;
}

//! Typed high-level queries over MikroTik RouterOS API replies.
//!
//! A query dispatcher (anything implementing [`Connection`]) delivers decoded
//! reply batches. This crate turns those batches into typed records and lends
//! them to a caller-supplied callback:
//!
//! - [`decode`]: defensive decoders for textual reply fields
//! - [`materialize`]: reply batch → typed record list
//! - [`lifecycle`]: per-batch acquire → callback → release adapter
//! - [`interface`]: `/interface/print` as a list of [`Interface`] records
//! - [`replay`] and [`transcript`]: scripted dispatcher for tools and tests
//! - [`config`]: client configuration file
//!
//! # Example
//!
//! ```
//! use routeros_api::{enumerate_interfaces, ReplayConnection};
//!
//! let mut conn = ReplayConnection::from_transcript(
//!     "/interface/print\n!re\n=name=ether1\n=mtu=1500\n!done\n",
//! )?;
//!
//! let mut names = Vec::new();
//! enumerate_interfaces(&mut conn, |_, interfaces| {
//!     // Records borrow from the reply; copy what must outlive the callback.
//!     names.extend(interfaces.iter().filter_map(|i| i.name.map(str::to_owned)));
//!     Ok(())
//! })?;
//!
//! assert_eq!(names, ["ether1"]);
//! # Ok::<(), routeros_api::RosError>(())
//! ```

pub mod config;
pub mod connection;
pub mod decode;
pub mod error;
pub mod interface;
pub mod lifecycle;
pub mod materialize;
pub mod replay;
pub mod reply;
pub mod transcript;

/// Default TCP service of the RouterOS API.
pub const ROUTEROS_API_PORT: &str = "8728";

pub use config::{ClientConfig, LoggingConfig, RouterConfig};
pub use connection::Connection;
pub use decode::{parse_bool, parse_counter_pair, parse_unsigned, CounterPair, DecodeError};
pub use error::{RosError, RosResult};
pub use interface::{enumerate_interfaces, Interface, INTERFACE_PRINT};
pub use materialize::{materialize, FromSentence, RecordStore};
pub use replay::{IssuedQuery, ReplayConnection};
pub use reply::{Reply, Sentence, SentenceStatus};

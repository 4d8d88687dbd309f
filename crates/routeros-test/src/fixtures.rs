//! Reply fixtures for high-level query tests
//!
//! Provides sentence and batch builders for common `/interface/print`
//! replies, plus a scripted connection preloaded with them.

use routeros_api::{Reply, ReplayConnection, Sentence, INTERFACE_PRINT};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;

/// Builds a batch from `sentences` and terminates it with `!done`.
pub fn batch(sentences: impl IntoIterator<Item = Sentence>) -> Reply {
    let mut reply: Reply = sentences.into_iter().collect();
    reply.push(Sentence::done());
    reply
}

/// A batch holding only `!done`.
pub fn empty_batch() -> Reply {
    Reply::from_sentences(vec![Sentence::done()])
}

/// A `!trap` sentence carrying `message`.
pub fn trap(message: &str) -> Sentence {
    Sentence::new("trap").with_param("message", message)
}

/// A replay connection serving `batches` for `/interface/print`.
pub fn interface_connection(batches: impl IntoIterator<Item = Reply>) -> ReplayConnection {
    batches
        .into_iter()
        .fold(ReplayConnection::new(), |conn, b| conn.with_batch(INTERFACE_PRINT, b))
}

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory sink for formatted log output.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Routes events at every level on this thread into the capture until
    /// the guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(LevelFilter::TRACE)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Common `/interface/print` sentences
pub mod interface_fixtures {
    use super::*;

    /// The `ether1` reply used by the end-to-end scenario.
    pub fn ether1() -> Sentence {
        Sentence::re()
            .with_param("name", "ether1")
            .with_param("packets", "100/200")
            .with_param("bytes", "1000/2000")
            .with_param("mtu", "1500")
            .with_param("running", "true")
            .with_param("disabled", "false")
    }

    /// Running Ethernet port with every field populated
    pub fn ethernet(name: &str) -> Sentence {
        Sentence::re()
            .with_param(".id", "*1")
            .with_param("name", name)
            .with_param("type", "ether")
            .with_param("mtu", "1500")
            .with_param("l2mtu", "1598")
            .with_param("packets", "1234/5678")
            .with_param("bytes", "987654/123456")
            .with_param("errors", "1/2")
            .with_param("drops", "3/4")
            .with_param("dynamic", "false")
            .with_param("running", "true")
            .with_param("disabled", "false")
            .with_param("comment", "uplink")
    }

    /// Administratively disabled port
    pub fn disabled(name: &str) -> Sentence {
        Sentence::re()
            .with_param("name", name)
            .with_param("type", "ether")
            .with_param("running", "false")
            .with_param("disabled", "true")
    }

    /// Dynamic tunnel interface
    pub fn dynamic_tunnel(name: &str) -> Sentence {
        Sentence::re()
            .with_param("name", name)
            .with_param("type", "pppoe-in")
            .with_param("dynamic", "true")
            .with_param("running", "true")
    }

    /// Interface whose numeric fields are all unusable
    pub fn malformed(name: &str) -> Sentence {
        Sentence::re()
            .with_param("name", name)
            .with_param("packets", "lots")
            .with_param("bytes", "10")
            .with_param("errors", "/3")
            .with_param("drops", "4,5")
            .with_param("mtu", "auto")
            .with_param("l2mtu", "")
            .with_param("running", "yes")
            .with_param("disabled", "no")
    }
}

//! Verification helpers for materialized interface records
//!
//! Records only live for the duration of a callback, so tests copy them into
//! [`InterfaceSnapshot`]s and compare those against [`InterfaceExpectation`]s.

use routeros_api::{enumerate_interfaces, Connection, Interface, RosResult};
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Expected {expected} interfaces, found {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Value mismatch for {interface}.{field}: expected '{expected}', got '{actual}'")]
    ValueMismatch {
        interface: String,
        field: &'static str,
        expected: String,
        actual: String,
    },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Owned copy of an [`Interface`] record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    pub name: Option<String>,
    pub interface_type: Option<String>,
    pub comment: Option<String>,
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub rx_drops: u64,
    pub tx_drops: u64,
    pub mtu: u32,
    pub l2mtu: u32,
    pub dynamic: bool,
    pub running: bool,
    pub enabled: bool,
}

impl From<&Interface<'_>> for InterfaceSnapshot {
    fn from(i: &Interface<'_>) -> Self {
        Self {
            name: i.name.map(str::to_owned),
            interface_type: i.interface_type.map(str::to_owned),
            comment: i.comment.map(str::to_owned),
            rx_packets: i.rx_packets,
            tx_packets: i.tx_packets,
            rx_bytes: i.rx_bytes,
            tx_bytes: i.tx_bytes,
            rx_errors: i.rx_errors,
            tx_errors: i.tx_errors,
            rx_drops: i.rx_drops,
            tx_drops: i.tx_drops,
            mtu: i.mtu,
            l2mtu: i.l2mtu,
            dynamic: i.dynamic,
            running: i.running,
            enabled: i.enabled,
        }
    }
}

/// Runs `enumerate_interfaces` and snapshots every batch it delivers.
pub fn collect_interfaces<C: Connection>(conn: &mut C) -> RosResult<Vec<Vec<InterfaceSnapshot>>> {
    let mut batches: Vec<Vec<InterfaceSnapshot>> = Vec::new();
    enumerate_interfaces(conn, |_, interfaces| {
        batches.push(interfaces.iter().map(InterfaceSnapshot::from).collect());
        Ok(())
    })?;
    Ok(batches)
}

/// Expected values for selected fields; `None` means "don't care".
#[derive(Debug, Clone, Default)]
pub struct InterfaceExpectation {
    pub name: Option<&'static str>,
    pub packets: Option<(u64, u64)>,
    pub bytes: Option<(u64, u64)>,
    pub errors: Option<(u64, u64)>,
    pub drops: Option<(u64, u64)>,
    pub mtu: Option<u32>,
    pub l2mtu: Option<u32>,
    pub dynamic: Option<bool>,
    pub running: Option<bool>,
    pub enabled: Option<bool>,
}

impl InterfaceExpectation {
    pub fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    pub fn packets(mut self, rx: u64, tx: u64) -> Self {
        self.packets = Some((rx, tx));
        self
    }

    pub fn bytes(mut self, rx: u64, tx: u64) -> Self {
        self.bytes = Some((rx, tx));
        self
    }

    pub fn errors(mut self, rx: u64, tx: u64) -> Self {
        self.errors = Some((rx, tx));
        self
    }

    pub fn drops(mut self, rx: u64, tx: u64) -> Self {
        self.drops = Some((rx, tx));
        self
    }

    pub fn mtu(mut self, mtu: u32) -> Self {
        self.mtu = Some(mtu);
        self
    }

    pub fn l2mtu(mut self, l2mtu: u32) -> Self {
        self.l2mtu = Some(l2mtu);
        self
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = Some(dynamic);
        self
    }

    pub fn running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Checks `actual` against every field that has an expectation.
    pub fn verify(&self, actual: &InterfaceSnapshot) -> VerifyResult<()> {
        let label = actual.name.clone().unwrap_or_else(|| "<unnamed>".to_string());

        check(&label, "name", self.name.map(str::to_owned), actual.name.clone())?;
        check(
            &label,
            "packets",
            self.packets,
            Some((actual.rx_packets, actual.tx_packets)),
        )?;
        check(&label, "bytes", self.bytes, Some((actual.rx_bytes, actual.tx_bytes)))?;
        check(&label, "errors", self.errors, Some((actual.rx_errors, actual.tx_errors)))?;
        check(&label, "drops", self.drops, Some((actual.rx_drops, actual.tx_drops)))?;
        check(&label, "mtu", self.mtu, Some(actual.mtu))?;
        check(&label, "l2mtu", self.l2mtu, Some(actual.l2mtu))?;
        check(&label, "dynamic", self.dynamic, Some(actual.dynamic))?;
        check(&label, "running", self.running, Some(actual.running))?;
        check(&label, "enabled", self.enabled, Some(actual.enabled))?;
        Ok(())
    }
}

fn check<T>(interface: &str, field: &'static str, expected: Option<T>, actual: Option<T>) -> VerifyResult<()>
where
    T: PartialEq + std::fmt::Debug,
{
    match expected {
        Some(expected) if Some(&expected) != actual.as_ref() => Err(VerificationError::ValueMismatch {
            interface: interface.to_string(),
            field,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }),
        _ => Ok(()),
    }
}

/// Verifies a batch against expectations, in order.
pub fn verify_batch(
    actual: &[InterfaceSnapshot],
    expected: &[InterfaceExpectation],
) -> VerifyResult<()> {
    if actual.len() != expected.len() {
        return Err(VerificationError::CountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    for (a, e) in actual.iter().zip(expected) {
        e.verify(a)?;
    }
    Ok(())
}

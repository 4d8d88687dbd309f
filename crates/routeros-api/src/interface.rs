//! High-level access to `/interface`.

use crate::connection::Connection;
use crate::decode::{counter_pair_or_zero, parse_bool, parse_unsigned};
use crate::error::RosResult;
use crate::lifecycle::dispatch_batch;
use crate::materialize::FromSentence;
use crate::reply::Sentence;
use serde::Serialize;
use tracing::debug;

/// Command that lists all interfaces.
pub const INTERFACE_PRINT: &str = "/interface/print";

/// Reply attribute names used by `/interface/print`.
pub mod fields {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const COMMENT: &str = "comment";
    pub const PACKETS: &str = "packets";
    pub const BYTES: &str = "bytes";
    pub const ERRORS: &str = "errors";
    pub const DROPS: &str = "drops";
    pub const MTU: &str = "mtu";
    pub const L2MTU: &str = "l2mtu";
    pub const DYNAMIC: &str = "dynamic";
    pub const RUNNING: &str = "running";
    pub const DISABLED: &str = "disabled";
}

/// One network interface as reported by the router.
///
/// Text fields borrow from the reply batch the record was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Interface<'r> {
    /// Name of the interface
    pub name: Option<&'r str>,
    #[serde(rename = "type")]
    pub interface_type: Option<&'r str>,
    pub comment: Option<&'r str>,

    // Packet, octet, error and drop counters
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub rx_drops: u64,
    pub tx_drops: u64,

    /// Maximum transfer unit
    pub mtu: u32,
    pub l2mtu: u32,

    pub dynamic: bool,
    pub running: bool,
    pub enabled: bool,
}

impl<'r> FromSentence<'r> for Interface<'r> {
    const KIND: &'static str = "interface";

    fn from_sentence(s: &'r Sentence) -> Self {
        let packets = counter_pair_or_zero(fields::PACKETS, s.param_val_by_key(fields::PACKETS));
        let bytes = counter_pair_or_zero(fields::BYTES, s.param_val_by_key(fields::BYTES));
        let errors = counter_pair_or_zero(fields::ERRORS, s.param_val_by_key(fields::ERRORS));
        let drops = counter_pair_or_zero(fields::DROPS, s.param_val_by_key(fields::DROPS));

        Self {
            name: s.param_val_by_key(fields::NAME),
            interface_type: s.param_val_by_key(fields::TYPE),
            comment: s.param_val_by_key(fields::COMMENT),
            rx_packets: packets.rx,
            tx_packets: packets.tx,
            rx_bytes: bytes.rx,
            tx_bytes: bytes.tx,
            rx_errors: errors.rx,
            tx_errors: errors.tx,
            rx_drops: drops.rx,
            tx_drops: drops.tx,
            mtu: parse_unsigned(s.param_val_by_key(fields::MTU)),
            l2mtu: parse_unsigned(s.param_val_by_key(fields::L2MTU)),
            dynamic: parse_bool(s.param_val_by_key(fields::DYNAMIC)),
            running: parse_bool(s.param_val_by_key(fields::RUNNING)),
            enabled: !parse_bool(s.param_val_by_key(fields::DISABLED)),
        }
    }
}

/// Enumerates all interfaces on `conn`.
///
/// `callback` runs once per reply batch with that batch's interfaces. The
/// slice and every string in it are released when the callback returns, so
/// nothing may be kept beyond the call; copy what you need. The
/// dispatcher's result is returned unchanged.
pub fn enumerate_interfaces<C, F>(conn: &mut C, mut callback: F) -> RosResult<()>
where
    C: Connection,
    F: for<'r> FnMut(&C, &[Interface<'r>]) -> RosResult<()>,
{
    debug!(command = INTERFACE_PRINT, "enumerating interfaces");
    conn.query(INTERFACE_PRINT, &[], |c, reply| {
        dispatch_batch::<C, Interface<'_>, F>(c, reply, &mut callback)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::materialize;
    use crate::reply::Reply;
    use pretty_assertions::assert_eq;

    fn ether1() -> Sentence {
        Sentence::re()
            .with_param("name", "ether1")
            .with_param("type", "ether")
            .with_param("packets", "100/200")
            .with_param("bytes", "1000/2000")
            .with_param("mtu", "1500")
            .with_param("running", "true")
            .with_param("disabled", "false")
    }

    #[test]
    fn test_from_sentence_full_record() {
        let s = ether1();
        let iface = Interface::from_sentence(&s);
        assert_eq!(
            iface,
            Interface {
                name: Some("ether1"),
                interface_type: Some("ether"),
                comment: None,
                rx_packets: 100,
                tx_packets: 200,
                rx_bytes: 1000,
                tx_bytes: 2000,
                mtu: 1500,
                running: true,
                enabled: true,
                ..Interface::default()
            }
        );
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let s = Sentence::re()
            .with_param("name", "wlan1")
            .with_param("packets", "12")
            .with_param("bytes", "x/5")
            .with_param("errors", "3/4")
            .with_param("mtu", "big")
            .with_param("l2mtu", "1600junk")
            .with_param("dynamic", "yes")
            .with_param("disabled", "TRUE");
        let iface = Interface::from_sentence(&s);

        assert_eq!((iface.rx_packets, iface.tx_packets), (0, 0));
        assert_eq!((iface.rx_bytes, iface.tx_bytes), (0, 0));
        assert_eq!((iface.rx_errors, iface.tx_errors), (3, 4));
        assert_eq!((iface.rx_drops, iface.tx_drops), (0, 0));
        assert_eq!(iface.mtu, 0);
        assert_eq!(iface.l2mtu, 1600);
        assert!(!iface.dynamic);
        assert!(!iface.enabled);
    }

    #[test]
    fn test_enabled_defaults_true() {
        let s = Sentence::re().with_param("name", "bridge1");
        assert!(Interface::from_sentence(&s).enabled);

        let s = Sentence::re().with_param("disabled", "garbage");
        assert!(Interface::from_sentence(&s).enabled);
    }

    #[test]
    fn test_materialize_interfaces() {
        let reply = Reply::from_sentences(vec![
            ether1(),
            Sentence::re().with_param("name", "ether2"),
            Sentence::done(),
        ]);
        let list: Vec<Interface<'_>> = materialize(&reply).unwrap();
        let names: Vec<_> = list.iter().map(|i| i.name).collect();
        assert_eq!(names, vec![Some("ether1"), Some("ether2")]);
    }

    #[test]
    fn test_serialize_uses_wire_type_key() {
        let s = ether1();
        let iface = Interface::from_sentence(&s);
        let value = serde_json::to_value(iface).unwrap();
        assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("ether"));
        assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("ether1"));
        assert!(value.get("comment").unwrap().is_null());
        assert_eq!(value.get("rx_bytes").and_then(|v| v.as_u64()), Some(1000));
    }
}

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::OnceLock;

use super::constants::{ethertype, ip_proto};
use super::context::{DecodeContext, DecodeFn};
use super::cursor::Remainder;
use crate::layer::{datalink, network, transport};

#[derive(Clone, Copy)]
pub struct Dissector {
    pub name: &'static str,
    pub decode: DecodeFn,
}

impl Debug for Dissector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dissector").field("name", &self.name).finish()
    }
}

/// Sparse protocol-id to decoder map.
#[derive(Debug)]
pub struct DispatchTable<K> {
    name: &'static str,
    entries: HashMap<K, Dissector>,
}

impl<K> DispatchTable<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: K, name: &'static str, decode: DecodeFn) {
        if self.entries.insert(key, Dissector { name, decode }).is_some() {
            tracing::warn!(table = self.name, ?key, "replacing registered dissector");
        }
    }

    pub fn lookup(&self, key: K) -> Option<Dissector> {
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hands `data` to the decoder registered for `key`. Unregistered ids
    /// leave the whole buffer as leftover.
    pub fn dispatch<'a>(&self, key: K, data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
        match self.lookup(key) {
            Some(dissector) => ctx.descend(dissector.name, data, dissector.decode),
            None => {
                tracing::trace!(table = self.name, ?key, "no dissector registered");
                Remainder::whole(data)
            }
        }
    }
}

#[derive(Debug)]
pub struct DispatchTables {
    pub ethertype: DispatchTable<u16>,
    pub ip_proto: DispatchTable<u8>,
}

impl DispatchTables {
    pub fn builtin() -> Self {
        let mut ethertypes = DispatchTable::new("ethertype");
        ethertypes.register(ethertype::IPV4, "ipv4", network::ipv4::decode);
        ethertypes.register(ethertype::IPV6, "ipv6", network::ipv6::decode);
        ethertypes.register(ethertype::ARP, "arp", datalink::arp::decode_arp);
        ethertypes.register(ethertype::RARP, "rarp", datalink::arp::decode_rarp);
        ethertypes.register(ethertype::IPX, "ipx", network::ipx::decode);

        let mut ip_protos = DispatchTable::new("ip_proto");
        ip_protos.register(ip_proto::TCP, "tcp", transport::tcp::decode);
        ip_protos.register(ip_proto::UDP, "udp", transport::udp::decode);
        ip_protos.register(ip_proto::ICMP, "icmp", network::icmp::decode);

        Self {
            ethertype: ethertypes,
            ip_proto: ip_protos,
        }
    }
}

/// Process-wide tables, built on first use and read-only afterwards.
pub fn tables() -> &'static DispatchTables {
    static TABLES: OnceLock<DispatchTables> = OnceLock::new();
    TABLES.get_or_init(DispatchTables::builtin)
}

pub fn dispatch_ethertype<'a>(
    value: u16,
    data: &'a [u8],
    ctx: &mut DecodeContext,
) -> Remainder<'a> {
    tables().ethertype.dispatch(value, data, ctx)
}

pub fn dispatch_ip_proto<'a>(value: u8, data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tables().ip_proto.dispatch(value, data, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_sparse_and_populated() {
        let tables = tables();
        assert_eq!(tables.ethertype.len(), 5);
        assert_eq!(tables.ip_proto.len(), 3);
        assert_eq!(
            tables.ethertype.lookup(ethertype::IPV6).map(|d| d.name),
            Some("ipv6")
        );
        assert!(tables.ip_proto.lookup(ip_proto::ICMPV6).is_none());
    }

    #[test]
    fn unregistered_id_returns_whole_buffer() {
        let mut ctx = DecodeContext::default();
        let payload = [0xde, 0xad, 0xbe, 0xef];
        let remainder = dispatch_ethertype(0x1234, &payload, &mut ctx);
        assert_eq!(remainder.bytes(), &payload);
        assert!(ctx.record().is_empty());
    }
}

pub mod ethertype {
    pub const EDP: u16 = 0x00BB;
    pub const PUP: u16 = 0x0200;
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const CDP: u16 = 0x2000;
    pub const DTP: u16 = 0x2004;
    pub const TEB: u16 = 0x6558;
    pub const RARP: u16 = 0x8035;
    pub const VLAN_8021Q: u16 = 0x8100;
    pub const IPX: u16 = 0x8137;
    pub const IPV6: u16 = 0x86DD;
    pub const PPP: u16 = 0x880B;
    pub const MPLS_UNICAST: u16 = 0x8847;
    pub const MPLS_MULTICAST: u16 = 0x8848;
    pub const PPPOE_DISCOVERY: u16 = 0x8863;
    pub const PPPOE_SESSION: u16 = 0x8864;
    pub const AOE: u16 = 0x88A2;
    pub const QINQ_8021AD: u16 = 0x88A8;
    pub const LLDP: u16 = 0x88CC;
    pub const QINQ1: u16 = 0x9100;
    pub const QINQ2: u16 = 0x9200;

    /// Type/length values below this are 802.3 lengths, not EtherTypes.
    pub const MAX_802_3_LENGTH: u16 = 1500;
}

pub mod ip_proto {
    pub const ICMP: u8 = 1;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    pub const ESP: u8 = 50;
    pub const AH: u8 = 51;
    pub const ICMPV6: u8 = 58;
}

/// IPv6 next-header values that are not transport protocols.
pub mod ipv6_next {
    pub const HOP_BY_HOP: u8 = 0;
    pub const IPV6_ENCAP: u8 = 41;
    pub const ROUTING: u8 = 43;
    pub const FRAGMENT: u8 = 44;
    pub const RSVP: u8 = 46;
    pub const NO_NEXT_HEADER: u8 = 59;
    pub const DESTINATION_OPTIONS: u8 = 60;
}

pub mod llc_sap {
    pub const IPV4: u8 = 0x06;
    pub const SNAP: u8 = 0xAA;
    pub const IPX: u8 = 0xE0;
    pub const RAW_IPX: u8 = 0xFF;
}

pub mod port {
    pub const FTP_DATA: u16 = 20;
    pub const FTP: u16 = 21;
    pub const DNS: u16 = 53;
    pub const HTTP: u16 = 80;
    pub const SMB: u16 = 445;
    pub const HTTP_ALT: u16 = 8080;
}

pub const ETHERNET_MIN_FRAME: usize = 60;

/// Display name reported as `ETH_typestr`.
pub fn ethertype_name(value: u16) -> &'static str {
    match value {
        ethertype::EDP => "EDP",
        ethertype::PUP => "PUP",
        ethertype::IPV4 => "IP",
        ethertype::ARP => "ARP",
        ethertype::AOE => "AOE",
        ethertype::CDP => "CDP",
        ethertype::DTP => "DTP",
        ethertype::RARP => "REVARP",
        ethertype::VLAN_8021Q => "802.1Q",
        ethertype::QINQ_8021AD => "802.1AD",
        ethertype::QINQ1 => "QINQ1",
        ethertype::QINQ2 => "QINQ2",
        ethertype::IPX => "IPX",
        ethertype::IPV6 => "IPv6",
        ethertype::PPP => "PPP",
        ethertype::MPLS_UNICAST => "MPLS",
        ethertype::MPLS_MULTICAST => "MPLS_MCAST",
        ethertype::PPPOE_DISCOVERY => "PPPoE_DISC",
        ethertype::PPPOE_SESSION => "PPPoE",
        ethertype::LLDP => "LLDP",
        ethertype::TEB => "TEB",
        _ => "UNKNOWN",
    }
}

pub fn ip_protocol_name(value: u8) -> &'static str {
    match value {
        ipv6_next::HOP_BY_HOP => "hop-by-hop",
        ip_proto::ICMP => "icmp",
        ip_proto::TCP => "tcp",
        ip_proto::UDP => "udp",
        ipv6_next::IPV6_ENCAP => "ipv6-encap",
        ipv6_next::ROUTING => "ipv6-route",
        ipv6_next::FRAGMENT => "ipv6-frag",
        ipv6_next::RSVP => "rsvp",
        ip_proto::ESP => "esp",
        ip_proto::AH => "ah",
        ip_proto::ICMPV6 => "icmpv6",
        ipv6_next::NO_NEXT_HEADER => "ipv6-nonxt",
        ipv6_next::DESTINATION_OPTIONS => "ipv6-opts",
        _ => "unknown",
    }
}

//! DNS header and question section (RFC 1035).
//!
//! Question names are decoded literally from their length-prefixed labels.
//! Compression pointers are not followed, and answer, authority and
//! additional records are left unparsed in the leftover.

use crate::engine::{Cursor, DecodeContext, FieldRecord, FieldValue, Remainder};

pub const HEADER_LEN: usize = 12;
/// Longest accepted encoded name, excluding the terminating zero label.
const MAX_NAME_LEN: usize = 255;
/// Terminating zero label plus QTYPE and QCLASS.
const QUESTION_TRAILER_LEN: usize = 5;

const REPLY_CODES: [&str; 16] = [
    "NoError", "FormErr", "ServFail", "NXDomain", "NotImp", "Refused", "YXDomain", "YXRRSet",
    "NXRRSet", "NotAuth", "NotZone", "", "", "", "", "",
];

/// Record types 0..=109. Empty entries are unassigned.
const RECORD_TYPES: [&str; 110] = [
    "", "A", "NS", "MD", "MF", "CNAME", "SOA", "MB", "MG", "MR", // 0
    "NULL", "WKS", "PTR", "HINFO", "MINFO", "MX", "TXT", "RP", "AFSDB", "X25", // 10
    "ISDN", "RT", "NSAP", "NSAP-PTR", "SIG", "KEY", "PX", "GPOS", "AAAA", "LOC", // 20
    "NXT", "EID", "NIMLOC", "SRV", "ATMA", "NAPTR", "KX", "CERT", "A6", "DNAME", // 30
    "SINK", "OPT", "APL", "DS", "SSHFP", "IPSECKEY", "RRSIG", "NSEC", "DNSKEY", "DHCID", // 40
    "NSEC3", "NSEC3PARAM", "TLSA", "SMIMEA", "Unassigned", "HIP", "NINFO", "RKEY", "TALINK", "CDS", // 50
    "CDNSKEY", "OPENPGPKEY", "CSYNC", "ZONEMD", "", "", "", "", "", "", // 60
    "", "", "", "", "", "", "", "", "", "", // 70
    "", "", "", "", "", "", "", "", "", "", // 80
    "", "", "", "", "", "", "", "", "", "SPF", // 90
    "UINFO", "UID", "GID", "UNSPEC", "NID", "L32", "L64", "LP", "EUI48", "EUI64", // 100
];

/// Record types starting at 249.
const META_TYPES: [&str; 12] = [
    "TKEY", "TSIG", "IXFR", "AXFR", "MAILB", "MAILA", "*", "URI", "CAA", "AVC", "DOA", "AMTRELAY",
];

/// Record types starting at 32768.
const PRIVATE_TYPES: [&str; 2] = ["TA", "DLV"];

pub fn record_type_name(value: u16) -> &'static str {
    let index = usize::from(value);
    let name = match value {
        0 => None,
        1..=109 => RECORD_TYPES.get(index),
        249..=260 => META_TYPES.get(index - 249),
        32768..=32769 => PRIVATE_TYPES.get(index - 32768),
        _ => None,
    };
    match name {
        Some(name) if !name.is_empty() => name,
        _ => "UNKNOWN",
    }
}

pub fn class_name(value: u16) -> &'static str {
    match value {
        1 => "IN",
        3 => "CH",
        4 => "HS",
        254 => "QCLASS NONE",
        255 => "QCLASS *",
        _ => "UNKNOWN",
    }
}

pub fn reply_code_name(rcode: u8) -> &'static str {
    REPLY_CODES
        .get(usize::from(rcode))
        .copied()
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DnsHeader {
    id: u16,
    flags: u16,
    qd_count: u16,
    an_count: u16,
    ns_count: u16,
    ar_count: u16,
}

impl DnsHeader {
    fn read(cursor: &mut Cursor<'_>) -> Option<Self> {
        Some(Self {
            id: cursor.read_u16_be()?,
            flags: cursor.read_u16_be()?,
            qd_count: cursor.read_u16_be()?,
            an_count: cursor.read_u16_be()?,
            ns_count: cursor.read_u16_be()?,
            ar_count: cursor.read_u16_be()?,
        })
    }

    fn is_response(&self) -> bool {
        self.flags >> 15 & 1 == 1
    }

    fn opcode(&self) -> u8 {
        (self.flags >> 11 & 0x0f) as u8
    }

    fn reserved_bit(&self) -> bool {
        self.flags >> 6 & 1 == 1
    }

    fn rcode(&self) -> u8 {
        (self.flags & 0x0f) as u8
    }
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding dns");

    let mut cursor = Cursor::new(data);
    let Some(header) = DnsHeader::read(&mut cursor) else {
        tracing::debug!(len = data.len(), "dns message too short");
        return Remainder::empty();
    };
    if header.reserved_bit() {
        tracing::debug!(flags = header.flags, "dns reserved bit set, not dns");
        return Remainder::empty();
    }

    let questions = read_questions(&mut cursor, header.qd_count);

    ctx.emit("DNS_transaction_id", header.id);
    ctx.emit("DNS_response_flag", header.is_response());
    ctx.emit("DNS_opcode", header.opcode());
    ctx.emit("DNS_rcode", header.rcode());
    ctx.emit("DNS_error", reply_code_name(header.rcode()));
    ctx.emit("DNS_QDCOUNT", header.qd_count);
    ctx.emit("DNS_ANCOUNT", header.an_count);
    ctx.emit("DNS_NSCOUNT", header.ns_count);
    ctx.emit("DNS_ARCOUNT", header.ar_count);
    ctx.emit("DNS_Names", questions);

    Remainder::whole(data)
}

fn read_questions(cursor: &mut Cursor<'_>, count: u16) -> Vec<FieldValue> {
    let mut questions = Vec::new();
    for _ in 0..count {
        let Some(question) = read_question(cursor) else {
            tracing::debug!(
                parsed = questions.len(),
                declared = count,
                "dns question section ends early"
            );
            break;
        };
        questions.push(FieldValue::Record(question));
    }
    questions
}

fn read_question(cursor: &mut Cursor<'_>) -> Option<FieldRecord> {
    let rest = cursor.rest();
    let name_len = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
    if name_len > MAX_NAME_LEN || name_len + QUESTION_TRAILER_LEN > rest.len() {
        return None;
    }

    let name = cursor.read_exact(name_len + 1)?;
    let qtype = cursor.read_u16_be()?;
    let qclass = cursor.read_u16_be()?;

    let mut question = FieldRecord::new();
    question.insert("qname", decode_name(&name[..name_len]));
    question.insert("qtype", qtype);
    question.insert("type", record_type_name(qtype));
    question.insert("qclass", qclass);
    question.insert("class", class_name(qclass));
    Some(question)
}

/// Turns `\x03www\x07example\x03com` into `www.example.com`. Label length
/// bytes after the first become dots.
fn decode_name(encoded: &[u8]) -> String {
    let Some((&first, labels)) = encoded.split_first() else {
        return String::new();
    };

    let mut out = Vec::with_capacity(labels.len());
    let mut left_in_label = first;
    for &byte in labels {
        if left_in_label == 0 {
            left_in_label = byte;
            out.push(b'.');
        } else {
            out.push(byte);
            left_in_label -= 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(flags: u16, names: &[&[u8]]) -> Vec<u8> {
        let mut packet = Vec::new();
        packet.extend_from_slice(&0x1234u16.to_be_bytes()); // id
        packet.extend_from_slice(&flags.to_be_bytes());
        packet.extend_from_slice(&(names.len() as u16).to_be_bytes()); // qdcount
        packet.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x01]); // an, ns, ar
        for name in names {
            packet.extend_from_slice(name);
            packet.extend_from_slice(&[0x00, 0x1c, 0x00, 0x01]); // AAAA, IN
        }
        packet
    }

    #[test]
    fn decodes_header_and_questions() {
        let packet = query(
            0x0100,
            &[b"\x03www\x07example\x03com\x00", b"\x04mail\x03org\x00"],
        );
        let mut ctx = DecodeContext::default();

        let remainder = decode(&packet, &mut ctx);

        let record = ctx.record();
        let names: Vec<_> = record.names().collect();
        assert_eq!(
            names,
            [
                "DNS_transaction_id",
                "DNS_response_flag",
                "DNS_opcode",
                "DNS_rcode",
                "DNS_error",
                "DNS_QDCOUNT",
                "DNS_ANCOUNT",
                "DNS_NSCOUNT",
                "DNS_ARCOUNT",
                "DNS_Names",
            ]
        );
        assert_eq!(record.get_int("DNS_transaction_id"), Some(0x1234));
        assert_eq!(record.get_bool("DNS_response_flag"), Some(false));
        assert_eq!(record.get_str("DNS_error"), Some("NoError"));
        assert_eq!(record.get_int("DNS_ARCOUNT"), Some(1));

        let questions = record
            .get("DNS_Names")
            .and_then(FieldValue::as_list)
            .expect("questions should be a list");
        assert_eq!(questions.len(), 2);
        let first = questions[0].as_record().expect("question should be a record");
        assert_eq!(first.get_str("qname"), Some("www.example.com"));
        assert_eq!(first.get_int("qtype"), Some(28));
        assert_eq!(first.get_str("type"), Some("AAAA"));
        assert_eq!(first.get_str("class"), Some("IN"));
        let second = questions[1].as_record().expect("question should be a record");
        assert_eq!(second.get_str("qname"), Some("mail.org"));

        assert_eq!(remainder.bytes(), packet.as_slice());
    }

    #[test]
    fn reserved_bit_rejects_message() {
        let packet = query(0x0040, &[b"\x01a\x00"]);
        let mut ctx = DecodeContext::default();
        assert!(decode(&packet, &mut ctx).is_empty());
        assert!(ctx.record().is_empty());
    }

    #[test]
    fn rejects_short_header() {
        let mut ctx = DecodeContext::default();
        assert!(decode(&[0u8; HEADER_LEN - 1], &mut ctx).is_empty());
        assert!(ctx.record().is_empty());
    }

    #[test]
    fn truncated_question_stops_the_walk() {
        let mut packet = query(0x8180, &[b"\x01a\x00"]);
        packet[5] = 3; // claim three questions
        packet.extend_from_slice(b"\x05short\x00\x00"); // missing class
        let mut ctx = DecodeContext::default();

        decode(&packet, &mut ctx);

        let questions = ctx
            .record()
            .get("DNS_Names")
            .and_then(FieldValue::as_list)
            .map(<[FieldValue]>::len);
        assert_eq!(questions, Some(1));
        assert_eq!(ctx.record().get_int("DNS_QDCOUNT"), Some(3));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut name = vec![0x3f; 256];
        name.push(0);
        let packet = query(0x0100, &[&name]);
        let mut ctx = DecodeContext::default();

        decode(&packet, &mut ctx);

        let questions = ctx.record().get("DNS_Names").and_then(FieldValue::as_list);
        assert_eq!(questions.map(<[FieldValue]>::len), Some(0));
    }

    #[test]
    fn compression_pointer_is_not_followed() {
        let packet = query(0x8180, &[b"\xc0\x0c\x00"]);
        let mut ctx = DecodeContext::default();

        decode(&packet, &mut ctx);

        let questions = ctx
            .record()
            .get("DNS_Names")
            .and_then(FieldValue::as_list)
            .expect("questions should be a list");
        let qname = questions[0].as_record().and_then(|q| q.get_str("qname"));
        assert_eq!(qname, Some("\u{c}"));
    }

    #[test]
    fn type_tables_cover_all_ranges() {
        assert_eq!(record_type_name(1), "A");
        assert_eq!(record_type_name(54), "Unassigned");
        assert_eq!(record_type_name(64), "UNKNOWN");
        assert_eq!(record_type_name(99), "SPF");
        assert_eq!(record_type_name(109), "EUI64");
        assert_eq!(record_type_name(110), "UNKNOWN");
        assert_eq!(record_type_name(252), "AXFR");
        assert_eq!(record_type_name(260), "AMTRELAY");
        assert_eq!(record_type_name(32769), "DLV");
        assert_eq!(record_type_name(0), "UNKNOWN");
        assert_eq!(class_name(255), "QCLASS *");
        assert_eq!(class_name(2), "UNKNOWN");
        assert_eq!(reply_code_name(3), "NXDomain");
        assert_eq!(reply_code_name(12), "");
    }
}

//! HTTP/1.x request and response heads, detected heuristically.
//!
//! A payload is only treated as HTTP when one of the method or version
//! keywords first occurs within [`KEYWORD_WINDOW`] bytes of the start. The
//! text stops at the first NUL byte.

use crate::engine::{DecodeContext, FieldRecord, Remainder};

pub const MIN_LEN: usize = 6;
pub const KEYWORD_WINDOW: usize = 20;

const KEYWORDS: [&[u8]; 9] = [
    b"OPTIONS", b"GET", b"HEAD", b"POST", b"PUT", b"DELETE", b"TRACE", b"CONNECT", b"HTTP",
];

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub fn has_keyword(text: &[u8]) -> bool {
    KEYWORDS
        .iter()
        .any(|keyword| find(text, keyword).is_some_and(|pos| pos < KEYWORD_WINDOW))
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding http");

    if data.len() < MIN_LEN {
        tracing::debug!(len = data.len(), "payload too short for http");
        return Remainder::empty();
    }

    let content = data
        .iter()
        .position(|&b| b == 0)
        .map_or(data, |nul| &data[..nul]);
    if !has_keyword(content) {
        tracing::trace!("no http keyword in leading window");
        return Remainder::whole(data);
    }

    let head = find(content, b"\r\n\r\n").map_or(content, |end| &content[..end]);
    let mut lines = Lines::new(head);

    if let Some(start_line) = lines.next() {
        emit_start_line(start_line, ctx);
    }

    let mut fields = FieldRecord::new();
    for line in lines {
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        let value = line[colon + 1..]
            .iter()
            .position(|&b| b != b' ')
            .map_or(&[][..], |start| &line[colon + 1 + start..]);
        fields.insert(text(&line[..colon]), text(value));
    }
    ctx.emit("HTTP_header_fields", fields);

    Remainder::whole(data)
}

fn emit_start_line(line: &[u8], ctx: &mut DecodeContext) {
    let mut parts = line.splitn(3, |&b| b == b' ');
    let (Some(first), Some(second), Some(third)) = (parts.next(), parts.next(), parts.next())
    else {
        tracing::debug!("http start line has fewer than three parts");
        return;
    };

    if find(first, b"HTTP").is_some() {
        ctx.emit("HTTP_version", text(first));
        ctx.emit("HTTP_status_code", text(second));
        ctx.emit("HTTP_reason", text(third));
    } else {
        ctx.emit("HTTP_method", text(first));
        ctx.emit("HTTP_request_URI", text(second));
        ctx.emit("HTTP_version", text(third));
    }
}

/// CRLF-separated lines, keeping empty ones.
struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self { rest: Some(text) }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match find(rest, b"\r\n") {
            Some(pos) => {
                self.rest = Some(&rest[pos + 2..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

//! FTP control channel: recognises reply codes and command keywords in the
//! first token of the payload.

use crate::engine::{DecodeContext, Remainder};

pub const MIN_LEN: usize = 5;

const REPLY_CODES: [i64; 58] = [
    100, 110, 120, 125, 150,
    200, 202, 211, 212, 213, 214, 215, 220, 221, 225, 226, 227, 228, 229, 230, 231, 232, 250, 257,
    300, 331, 332, 350,
    400, 421, 425, 426, 430, 434, 450, 451, 452,
    500, 501, 502, 503, 504, 530, 532, 550, 551, 552, 553,
    600, 631, 632, 633,
    10000, 100054, 10060, 10061, 10066, 10068,
];

const COMMANDS: [&str; 33] = [
    "STOR", "TYPE", "ABOR", "ACCT", "ALLO", "APPE", "CDUP", "CWD", "DELE", "HELP", "LIST", "MKD",
    "MODE", "NLST", "NOOP", "PASS", "PASV", "PORT", "PWD", "QUIT", "REIN", "REST", "RETR", "RMD",
    "RNFR", "RNTO", "SITE", "SMNT", "STAT", "STOU", "STRU", "SYST", "USER",
];

/// First token of the text, which ends at the first NUL byte.
fn first_token(data: &[u8]) -> Option<&[u8]> {
    let text = data.split(|&b| b == 0).next()?;
    text.split(u8::is_ascii_whitespace)
        .find(|token| !token.is_empty())
}

/// Leading decimal integer with optional sign, zero when there is none.
fn leading_integer(token: &[u8]) -> i64 {
    let (negative, digits) = match token.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, token),
    };
    let value = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    if negative { -value } else { value }
}

pub fn reply_code(token: &[u8]) -> Option<u64> {
    let value = leading_integer(token);
    REPLY_CODES
        .contains(&value)
        .then(|| value.unsigned_abs())
}

pub fn command(token: &[u8]) -> Option<&'static str> {
    COMMANDS
        .iter()
        .copied()
        .find(|command| command.as_bytes() == token)
}

pub fn decode<'a>(data: &'a [u8], ctx: &mut DecodeContext) -> Remainder<'a> {
    tracing::trace!(len = data.len(), "decoding ftp");

    if data.len() < MIN_LEN {
        tracing::debug!(len = data.len(), "payload too short for ftp");
        return Remainder::empty();
    }

    if let Some(token) = first_token(data) {
        if let Some(code) = reply_code(token) {
            ctx.emit("FTP_response", code);
        } else if let Some(command) = command(token) {
            ctx.emit("FTP_request", command);
        }
    }

    Remainder::whole(data)
}

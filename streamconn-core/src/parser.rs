//! Tolerant parser for stream connection strings
//!
//! Connection strings are typed by hand or pasted from encoder UIs and are
//! often not valid URIs: `udp://@239.1.1.1:1234`, `udp:////host:5000//`,
//! `rtsp://host:?` all show up in practice. Instead of a URI library the
//! parser runs a fixed normalization pipeline:
//!
//! 1. split off the scheme and look it up in [`Protocol`]
//! 2. drop leading `/` and `@` noise and any `user@` prefix
//! 3. split the authority from the path at the first `/` or `?`
//! 4. split host from port at the last `:`
//! 5. collapse the path and fall back to the protocol default port
//!
//! Unusable input yields `None`. The parser does not report why.

use crate::models::{ConnectionEntry, Protocol};

const SCHEME_SEPARATOR: &str = "://";

/// Parses a connection string into a [`ConnectionEntry`]
///
/// `alias` is copied into the entry as is. Returns `None` when `raw` is blank,
/// has no recognized scheme, or has no host left after normalization.
///
/// # Examples
///
/// ```
/// use streamconn_core::{parse_connection_string, Protocol};
///
/// let entry = parse_connection_string("cam", "udp://@239.1.1.1:5000/").unwrap();
/// assert_eq!(entry.protocol(), Protocol::Udp);
/// assert_eq!(entry.address(), "239.1.1.1");
/// assert_eq!(entry.port(), 5000);
/// assert_eq!(entry.path(), None);
///
/// assert!(parse_connection_string("cam", "ftp://host").is_none());
/// ```
pub fn parse_connection_string(alias: &str, raw: &str) -> Option<ConnectionEntry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (scheme, rest) = raw.split_once(SCHEME_SEPARATOR)?;
    let protocol = Protocol::from_scheme(scheme.trim())?;

    let rest = strip_user_info(rest.trim_start_matches(['/', '@']));
    let (authority, path) = split_authority(rest);
    let (host, port) = split_host_port(authority);

    let host = host
        .trim_start()
        .trim_end_matches(|c: char| c == ':' || c.is_whitespace());
    if host.is_empty() {
        return None;
    }

    Some(ConnectionEntry::new(
        alias.to_string(),
        protocol,
        host.to_string(),
        port.unwrap_or_else(|| protocol.default_port()),
        normalize_path(path),
    ))
}

/// Index where the authority ends: the first `/` or `?`, or the end of input
fn authority_end(rest: &str) -> usize {
    rest.find(['/', '?']).unwrap_or(rest.len())
}

/// Drops everything up to and including the last `@` inside the authority
fn strip_user_info(rest: &str) -> &str {
    match rest[..authority_end(rest)].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    }
}

fn split_authority(rest: &str) -> (&str, Option<&str>) {
    let end = authority_end(rest);
    if end == rest.len() {
        (rest, None)
    } else {
        (&rest[..end], Some(&rest[end..]))
    }
}

/// Splits `host[:port]` on the last colon
///
/// Dangling colons are ignored. Port text that is not a usable port number
/// resolves to `None` so the caller falls back to the protocol default.
fn split_host_port(authority: &str) -> (&str, Option<u16>) {
    let authority = authority.trim_end_matches(':');
    match authority.rsplit_once(':') {
        Some((host, port)) => (host, parse_port(port)),
        None => (authority, None),
    }
}

fn parse_port(text: &str) -> Option<u16> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Collapses the path candidate to `/path[?query]`, or `None` if nothing is left
///
/// Slashes and whitespace are trimmed together from both ends of the path
/// part, so `/x /` and `/x/` collapse to the same `/x`.
fn normalize_path(path: Option<&str>) -> Option<String> {
    let path = path?;
    let (path, query) = path.split_once('?').unwrap_or((path, ""));
    let path = path.trim_matches(|c: char| c == '/' || c.is_whitespace());

    if path.is_empty() && query.is_empty() {
        return None;
    }

    let mut normalized = format!("/{path}");
    if !query.is_empty() {
        normalized.push('?');
        normalized.push_str(query);
    }
    Some(normalized)
}

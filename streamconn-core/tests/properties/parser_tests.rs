//! Property-based tests for connection string parsing
//!
//! Generated connection strings are decorated with the kinds of noise users
//! type (stray separators, user-info, dangling colons, trailing slashes) and
//! must still resolve to the intended endpoint.

use proptest::prelude::*;

use streamconn_core::{parse_connection_string, Protocol};

// ============================================================================
// Generators
// ============================================================================

fn arb_protocol() -> impl Strategy<Value = Protocol> {
    prop::sample::select(Protocol::ALL.to_vec())
}

fn arb_scheme_case(protocol: Protocol) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), protocol.as_str().len()).prop_map(move |upper| {
        protocol
            .as_str()
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn arb_host() -> impl Strategy<Value = String> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        "[a-z0-9]([a-z0-9-]{0,15}[a-z0-9])?(\\.[a-z0-9]([a-z0-9-]{0,15}[a-z0-9])?)*",
    ]
}

fn arb_path() -> impl Strategy<Value = Option<String>> {
    prop::option::of("(/[A-Za-z0-9_.-]{1,12}){1,4}")
}

fn arb_query() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z]{1,8}=[A-Za-z0-9]{1,8}(&[a-z]{1,8}=[A-Za-z0-9]{1,8}){0,2}")
}

fn arb_alias() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _#-]{0,24}"
}

/// Leading noise between `://` and the authority
fn arb_leading_noise() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "/", "//", "@", "@/", "user@", "user:pass@"])
}

/// Trailing noise after the authority when there is no path
fn arb_trailing_noise() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "/", "//", "///", "?", "/?"])
}

/// Slash and whitespace noise after the last path segment
fn arb_path_noise() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "/", " ", " /", "\t//", "  / /"])
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Clean `scheme://host[:port][/path][?query]` strings resolve field by field
    #[test]
    fn prop_clean_strings_resolve(
        alias in arb_alias(),
        protocol in arb_protocol(),
        host in arb_host(),
        port in prop::option::of(1u16..=65535),
        path in arb_path(),
        query in arb_query(),
    ) {
        let mut raw = format!("{}://{}", protocol.as_str(), host);
        if let Some(port) = port {
            raw.push_str(&format!(":{port}"));
        }
        if let Some(path) = &path {
            raw.push_str(path);
        }
        if let Some(query) = &query {
            raw.push('?');
            raw.push_str(query);
        }

        let entry = parse_connection_string(&alias, &raw).expect("clean string must parse");
        prop_assert_eq!(entry.alias(), alias.as_str());
        prop_assert_eq!(entry.protocol(), protocol);
        prop_assert_eq!(entry.address(), host.as_str());
        prop_assert_eq!(entry.port(), port.unwrap_or_else(|| protocol.default_port()));

        let expected_path = match (&path, &query) {
            (None, None) => None,
            (Some(p), None) => Some(p.clone()),
            (None, Some(q)) => Some(format!("/?{q}")),
            (Some(p), Some(q)) => Some(format!("{p}?{q}")),
        };
        prop_assert_eq!(entry.path().map(str::to_string), expected_path);
    }

    /// Separator noise never changes the resolved endpoint
    #[test]
    fn prop_noise_is_ignored(
        protocol in arb_protocol(),
        host in arb_host(),
        port in prop::option::of(1u16..=65535),
        dangling_colon in any::<bool>(),
        leading in arb_leading_noise(),
        trailing in arb_trailing_noise(),
    ) {
        let authority = match port {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        let clean = format!("{}://{}", protocol.as_str(), authority);
        let colon = if dangling_colon { ":" } else { "" };
        let noisy = format!("{}://{}{}{}{}", protocol.as_str(), leading, authority, colon, trailing);

        let expected = parse_connection_string("a", &clean).expect("clean string must parse");
        let actual = parse_connection_string("a", &noisy).expect("noisy string must parse");
        prop_assert_eq!(actual, expected);
    }

    /// Scheme matching ignores case
    #[test]
    fn prop_scheme_case_insensitive(
        (protocol, scheme) in arb_protocol().prop_flat_map(|p| (Just(p), arb_scheme_case(p))),
        host in arb_host(),
    ) {
        let entry = parse_connection_string("a", &format!("{scheme}://{host}"))
            .expect("known scheme must parse");
        prop_assert_eq!(entry.protocol(), protocol);
    }

    /// The canonical URL parses back to the same entry
    #[test]
    fn prop_canonical_url_round_trip(
        alias in arb_alias(),
        protocol in arb_protocol(),
        host in arb_host(),
        port in prop::option::of(1u16..=65535),
        path in arb_path(),
        query in arb_query(),
        trailing in arb_trailing_noise(),
        path_noise in arb_path_noise(),
    ) {
        let mut raw = format!("{}://{}", protocol.as_str(), host);
        if let Some(port) = port {
            raw.push_str(&format!(":{port}"));
        }
        match (&path, &query) {
            (None, None) => raw.push_str(trailing),
            _ => {
                raw.push_str(path.as_deref().unwrap_or("/"));
                raw.push_str(path_noise);
                if let Some(query) = &query {
                    raw.push('?');
                    raw.push_str(query);
                }
            }
        }

        let entry = parse_connection_string(&alias, &raw).expect("string must parse");
        let reparsed = parse_connection_string(&alias, &entry.to_url());
        prop_assert_eq!(reparsed, Some(entry));
    }

    /// Resolved entries keep their invariants for arbitrary input
    #[test]
    fn prop_entries_keep_invariants(
        protocol in arb_protocol(),
        rest in "[ -~]{0,40}",
    ) {
        let raw = format!("{}://{}", protocol.as_str(), rest);
        if let Some(entry) = parse_connection_string("a", &raw) {
            prop_assert!(!entry.address().is_empty());
            prop_assert!(!entry.address().contains('/'));
            prop_assert!(!entry.address().contains('@'));
            prop_assert!(!entry.address().contains('?'));
            prop_assert!(!entry.address().ends_with(':'));
            prop_assert!(entry.port() > 0);
            if let Some(path) = entry.path() {
                prop_assert!(path.starts_with('/'));
                prop_assert!(path != "/" && path != "/?");
            }
            prop_assert_eq!(parse_connection_string("a", &raw), Some(entry));
        }
    }

    /// Unknown schemes never resolve
    #[test]
    fn prop_unknown_scheme_rejected(
        scheme in "[a-z]{2,8}",
        host in arb_host(),
    ) {
        prop_assume!(Protocol::from_scheme(&scheme).is_none());
        let raw = format!("{scheme}://{host}");
        prop_assert!(parse_connection_string("a", &raw).is_none());
    }
}

//! Integration tests for the tolerant connection string parser

use streamconn_core::{parse_connection_string, Protocol};

use crate::fixtures::{RTSP_VARIANTS, UDP_3500_VARIANTS, UDP_DEFAULT_PORT_VARIANTS};

// ============================================================================
// Basic resolution
// ============================================================================

#[test]
fn test_udp_explicit_port() {
    let entry = parse_connection_string("test1", "udp://239.1.1.1:4001").unwrap();
    assert_eq!(entry.protocol(), Protocol::Udp);
    assert_eq!(entry.port(), 4001);
    assert_eq!(entry.alias(), "test1");
    assert_eq!(entry.address(), "239.1.1.1");
    assert_eq!(entry.path(), None);
}

#[test]
fn test_udp_default_port() {
    let entry = parse_connection_string("test1", "udp://239.1.1.1").unwrap();
    assert_eq!(entry.protocol(), Protocol::Udp);
    assert_eq!(entry.port(), 1234);
    assert_eq!(entry.alias(), "test1");
    assert_eq!(entry.address(), "239.1.1.1");
    assert_eq!(entry.path(), None);
}

#[test]
fn test_empty_input() {
    assert!(parse_connection_string("test1", "").is_none());
    assert!(parse_connection_string("", "").is_none());
    assert!(parse_connection_string("test1", "   \t\n").is_none());
}

#[test]
fn test_rtsp_with_path() {
    let entry = parse_connection_string("test1", "rtsp://192.168.1.1:3001/pathname").unwrap();
    assert_eq!(entry.protocol(), Protocol::Rtsp);
    assert_eq!(entry.port(), 3001);
    assert_eq!(entry.alias(), "test1");
    assert_eq!(entry.address(), "192.168.1.1");
    assert_eq!(entry.path(), Some("/pathname"));
}

#[test]
fn test_rtsp_default_port() {
    let entry = parse_connection_string("cam", "rtsp://camera.local/live").unwrap();
    assert_eq!(entry.port(), 554);
    assert_eq!(entry.address(), "camera.local");
}

#[test]
fn test_unknown_scheme() {
    assert!(parse_connection_string("a", "ftp://192.168.1.1/file").is_none());
    assert!(parse_connection_string("a", "mms://192.168.1.1").is_none());
}

#[test]
fn test_every_scheme_is_recognized() {
    for protocol in Protocol::ALL {
        let lower = format!("{}://host.example", protocol.as_str());
        let upper = lower.to_uppercase();
        for raw in [lower, upper] {
            let entry = parse_connection_string("a", &raw)
                .unwrap_or_else(|| panic!("Test: {raw}"));
            assert_eq!(entry.protocol(), protocol, "Test: {raw}");
            assert_eq!(entry.port(), protocol.default_port(), "Test: {raw}");
        }
    }
}

// ============================================================================
// Noise tolerance
// ============================================================================

#[test]
fn test_udp_noise_variants_are_identical() {
    let expected = parse_connection_string("test1", UDP_3500_VARIANTS[0]).unwrap();
    for raw in UDP_3500_VARIANTS {
        let entry = parse_connection_string("test1", raw).unwrap_or_else(|| panic!("Test: {raw}"));
        assert_eq!(entry, expected, "Test: {raw}");
        assert_eq!(entry.protocol(), Protocol::Udp, "Test: {raw}");
        assert_eq!(entry.port(), 3500, "Test: {raw}");
        assert_eq!(entry.address(), "231.1.1.1", "Test: {raw}");
        assert_eq!(entry.path(), None, "Test: {raw}");
    }
}

#[test]
fn test_dangling_colon_uses_default_port() {
    for raw in UDP_DEFAULT_PORT_VARIANTS {
        let entry = parse_connection_string("test1", raw).unwrap_or_else(|| panic!("Test: {raw}"));
        assert_eq!(entry.protocol(), Protocol::Udp, "Test: {raw}");
        assert_eq!(entry.port(), 1234, "Test: {raw}");
        assert_eq!(entry.alias(), "test1", "Test: {raw}");
        assert_eq!(entry.address(), "231.1.1.1", "Test: {raw}");
    }
}

#[test]
fn test_rtsp_variants() {
    for raw in RTSP_VARIANTS {
        let entry = parse_connection_string("test1", raw).unwrap_or_else(|| panic!("Test: {raw}"));
        assert_eq!(entry.protocol(), Protocol::Rtsp, "Test: {raw}");
        assert_eq!(entry.address(), "192.168.1.1", "Test: {raw}");
    }
}

#[test]
fn test_query_kept_in_path() {
    let entry = parse_connection_string(
        "a",
        "rtsp://192.168.1.1:8500/some/path-to/file?quality=high&source=local",
    )
    .unwrap();
    assert_eq!(entry.port(), 8500);
    assert_eq!(
        entry.path(),
        Some("/some/path-to/file?quality=high&source=local")
    );
}

#[test]
fn test_query_directly_after_authority() {
    let entry = parse_connection_string("a", "http://encoder.local:8080?channel=2").unwrap();
    assert_eq!(entry.address(), "encoder.local");
    assert_eq!(entry.port(), 8080);
    assert_eq!(entry.path(), Some("/?channel=2"));
}

#[test]
fn test_lone_question_mark_has_no_path() {
    let entry = parse_connection_string("a", "rtsp://192.168.1.1:?").unwrap();
    assert_eq!(entry.port(), 554);
    assert_eq!(entry.path(), None);
}

#[test]
fn test_user_info_is_skipped() {
    let entry =
        parse_connection_string("a", "rtsp://user:p@ss@192.168.1.1:8554/some/path").unwrap();
    assert_eq!(entry.address(), "192.168.1.1");
    assert_eq!(entry.port(), 8554);
    assert_eq!(entry.path(), Some("/some/path"));
}

#[test]
fn test_at_sign_in_path_is_kept() {
    let entry = parse_connection_string("a", "http://host/files/a@b.ts").unwrap();
    assert_eq!(entry.address(), "host");
    assert_eq!(entry.path(), Some("/files/a@b.ts"));
}

#[test]
fn test_trailing_slashes_in_path_are_collapsed() {
    let entry = parse_connection_string("a", "rtmp://live.example.com/app/key//").unwrap();
    assert_eq!(entry.port(), 1935);
    assert_eq!(entry.path(), Some("/app/key"));
}

#[test]
fn test_whitespace_before_trailing_slash_is_dropped() {
    for raw in ["udp://h/x /", "udp://h/x  //", "udp://h/x\t/", "udp://h/x /?"] {
        let entry = parse_connection_string("a", raw).unwrap_or_else(|| panic!("Test: {raw}"));
        assert_eq!(entry.path(), Some("/x"), "Test: {raw}");
        assert_eq!(
            parse_connection_string("a", &entry.to_url()),
            Some(entry),
            "Test: {raw}"
        );
    }

    let entry = parse_connection_string("a", "udp://h/ /").unwrap();
    assert_eq!(entry.path(), None);
}

#[test]
fn test_unusable_port_falls_back_to_default() {
    for raw in [
        "srt://relay:abc",
        "srt://relay:0",
        "srt://relay:99999",
        "srt://relay:-1",
    ] {
        let entry = parse_connection_string("a", raw).unwrap_or_else(|| panic!("Test: {raw}"));
        assert_eq!(entry.address(), "relay", "Test: {raw}");
        assert_eq!(entry.port(), 9000, "Test: {raw}");
    }
}

#[test]
fn test_hostname_address() {
    let entry = parse_connection_string("a", "https://cdn.example.com/hls/index.m3u8").unwrap();
    assert_eq!(entry.address(), "cdn.example.com");
    assert_eq!(entry.port(), 443);
    assert!(!entry.is_multicast());
}

#[test]
fn test_alias_copied_verbatim() {
    let entry = parse_connection_string("  Lobby Cam #1 ", "udp://239.1.1.1").unwrap();
    assert_eq!(entry.alias(), "  Lobby Cam #1 ");
}

#[test]
fn test_parse_is_deterministic() {
    for raw in UDP_3500_VARIANTS.iter().chain(RTSP_VARIANTS) {
        assert_eq!(
            parse_connection_string("a", raw),
            parse_connection_string("a", raw),
            "Test: {raw}"
        );
    }
}

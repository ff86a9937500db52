//! Stream protocol identifiers and their default ports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Stream protocol recognized in a connection string scheme
///
/// Each variant carries its scheme token, display name and the port used when
/// a connection string does not name one. Lookups go through [`Protocol::ALL`],
/// so adding a variant here is all it takes to support a new scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Raw UDP, unicast or multicast (typically MPEG-TS)
    Udp,
    /// Raw TCP stream
    Tcp,
    /// RTP over UDP
    Rtp,
    /// Real Time Streaming Protocol
    Rtsp,
    /// Real-Time Messaging Protocol
    Rtmp,
    /// RTMP over TLS
    Rtmps,
    /// Plain HTTP stream
    Http,
    /// HTTP over TLS
    Https,
    /// Secure Reliable Transport
    Srt,
}

impl Protocol {
    /// Every supported protocol, in display order
    pub const ALL: [Self; 9] = [
        Self::Udp,
        Self::Tcp,
        Self::Rtp,
        Self::Rtsp,
        Self::Rtmp,
        Self::Rtmps,
        Self::Http,
        Self::Https,
        Self::Srt,
    ];

    /// Returns the scheme token as it appears before `://`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
            Self::Rtp => "rtp",
            Self::Rtsp => "rtsp",
            Self::Rtmp => "rtmp",
            Self::Rtmps => "rtmps",
            Self::Http => "http",
            Self::Https => "https",
            Self::Srt => "srt",
        }
    }

    /// Returns the port used when a connection string names none
    ///
    /// UDP and TCP follow the 1234 convention of video streaming tools rather
    /// than any IANA registration.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Udp | Self::Tcp => 1234,
            Self::Rtp => 5004,
            Self::Rtsp => 554,
            Self::Rtmp => 1935,
            Self::Rtmps | Self::Https => 443,
            Self::Http => 80,
            Self::Srt => 9000,
        }
    }

    /// Looks up a protocol by scheme token, ignoring ASCII case
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.as_str().eq_ignore_ascii_case(scheme))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp => write!(f, "UDP"),
            Self::Tcp => write!(f, "TCP"),
            Self::Rtp => write!(f, "RTP"),
            Self::Rtsp => write!(f, "RTSP"),
            Self::Rtmp => write!(f, "RTMP"),
            Self::Rtmps => write!(f, "RTMPS"),
            Self::Http => write!(f, "HTTP"),
            Self::Https => write!(f, "HTTPS"),
            Self::Srt => write!(f, "SRT"),
        }
    }
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::from_scheme(token).ok_or_else(|| ProtocolError::UnknownScheme(token.to_string()))
    }
}

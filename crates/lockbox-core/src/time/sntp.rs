//! Minimal SNTP client (RFC 4330).
//!
//! One UDP exchange per query: a 48-byte mode-3 request, then the
//! server's transmit timestamp out of the 48-byte reply. No state and
//! no caching; every open re-queries the authority.
//!
//! Request building and response parsing are pure functions so the wire
//! handling is testable without a network.

use std::{io, net::UdpSocket, time::Duration};

use chrono::{DateTime, Utc};

use super::{TimeError, TrustedClock};

/// Offset between the NTP epoch (1900-01-01) and the Unix epoch
/// (1970-01-01) in seconds.
const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// Size of an SNTP packet in bytes
const PACKET_SIZE: usize = 48;

/// Byte offset of the transmit timestamp within the packet
const TRANSMIT_OFFSET: usize = 40;

/// Default public time authority
pub const DEFAULT_NTP_SERVER: &str = "pool.ntp.org:123";

/// Default bound on the whole exchange (bind, send, receive)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// SNTP-backed [`TrustedClock`] querying one configured authority.
///
/// # Security
///
/// The response is unauthenticated NTP: an attacker who controls the
/// network path to the authority can feed back a false time. The design
/// defends against a rolled-back *local* clock, not a compromised time
/// source (see the container's threat model).
#[derive(Debug, Clone)]
pub struct SntpClock {
    server: String,
    timeout: Duration,
}

impl SntpClock {
    /// Create a clock querying `server` (a `host:port` pair).
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self { server: server.into(), timeout: DEFAULT_TIMEOUT }
    }

    /// Replace the exchange timeout bound.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured authority address.
    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    fn query(&self) -> Result<DateTime<Utc>, TimeError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).map_err(network)?;
        socket.set_read_timeout(Some(self.timeout)).map_err(network)?;
        socket.set_write_timeout(Some(self.timeout)).map_err(network)?;

        // connect() filters replies to the queried authority's address
        socket.connect(self.server.as_str()).map_err(network)?;
        socket.send(&build_request()).map_err(|err| self.io_error(err))?;

        let mut response = [0u8; PACKET_SIZE];
        let len = socket.recv(&mut response).map_err(|err| self.io_error(err))?;

        parse_response(&response[..len])
    }

    fn io_error(&self, err: io::Error) -> TimeError {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                TimeError::Timeout { timeout: self.timeout }
            },
            _ => TimeError::Network(err.to_string()),
        }
    }
}

impl TrustedClock for SntpClock {
    fn now_utc(&self) -> Result<DateTime<Utc>, TimeError> {
        let now = self.query()?;
        tracing::debug!(server = %self.server, %now, "trusted time acquired");
        Ok(now)
    }
}

fn network(err: io::Error) -> TimeError {
    TimeError::Network(err.to_string())
}

/// Build a 48-byte client request: LI 0, version 4, mode 3 (client).
fn build_request() -> [u8; PACKET_SIZE] {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = 0x23;
    packet
}

/// Extract the server transmit timestamp from a reply.
///
/// Rejects replies that are short, not in server mode, from an
/// unsynchronized source, kiss-of-death (stratum 0), or carrying a zero
/// timestamp.
fn parse_response(packet: &[u8]) -> Result<DateTime<Utc>, TimeError> {
    if packet.len() < PACKET_SIZE {
        return Err(TimeError::MalformedResponse("short packet"));
    }

    let leap = packet[0] >> 6;
    let mode = packet[0] & 0x07;

    if mode != 4 {
        return Err(TimeError::MalformedResponse("not a server reply"));
    }
    if leap == 3 {
        return Err(TimeError::MalformedResponse("server clock unsynchronized"));
    }

    let stratum = packet[1];
    if stratum == 0 {
        return Err(TimeError::MalformedResponse("kiss-of-death reply"));
    }
    if stratum > 15 {
        return Err(TimeError::MalformedResponse("invalid stratum"));
    }

    let seconds = u32::from_be_bytes([
        packet[TRANSMIT_OFFSET],
        packet[TRANSMIT_OFFSET + 1],
        packet[TRANSMIT_OFFSET + 2],
        packet[TRANSMIT_OFFSET + 3],
    ]);
    let fraction = u32::from_be_bytes([
        packet[TRANSMIT_OFFSET + 4],
        packet[TRANSMIT_OFFSET + 5],
        packet[TRANSMIT_OFFSET + 6],
        packet[TRANSMIT_OFFSET + 7],
    ]);

    if seconds == 0 && fraction == 0 {
        return Err(TimeError::MalformedResponse("zero transmit timestamp"));
    }

    // NTP seconds wrap in 2036; values below the 1970 offset belong to
    // era 1.
    let unix_seconds = if u64::from(seconds) >= NTP_UNIX_OFFSET {
        u64::from(seconds) - NTP_UNIX_OFFSET
    } else {
        u64::from(seconds) + (1u64 << 32) - NTP_UNIX_OFFSET
    };

    let nanos = ((u64::from(fraction) * 1_000_000_000) >> 32) as u32;

    DateTime::from_timestamp(unix_seconds as i64, nanos)
        .ok_or(TimeError::MalformedResponse("timestamp out of range"))
}

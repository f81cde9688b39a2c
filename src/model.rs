use std::fmt;

/// Port every probe targets outside of tests.
pub const TLS_PORT: u16 = 443;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub host: String,
    pub port: u16,
}

impl TargetSpec {
    pub fn tls(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: TLS_PORT,
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub target: TargetSpec,
    pub selector: String,
}

/// Terminal state of a single probe. The first event observed wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// First inbound fragment, after which the client closed the connection.
    DataReceived(Vec<u8>),
    /// Connect, write or read failed.
    ErrorReported(String),
    /// Peer closed before sending anything.
    ClosedByPeer,
}

impl ProbeOutcome {
    pub fn status_text(&self) -> &'static str {
        match self {
            ProbeOutcome::DataReceived(_) => "data-received",
            ProbeOutcome::ErrorReported(_) => "error",
            ProbeOutcome::ClosedByPeer => "closed-by-peer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_target_uses_443() {
        let target = TargetSpec::tls("example");
        assert_eq!(target.port, 443);
        assert_eq!(target.to_string(), "example:443");
    }
}

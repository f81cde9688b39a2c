use std::sync::OnceLock;

pub const RECORD_HEADER_LEN: usize = 5;
pub const CONTENT_TYPE_HANDSHAKE: u8 = 0x16;
/// Largest plaintext fragment a record may carry (2^14).
pub const MAX_PLAINTEXT_LEN: u16 = 16384;

const MAX_DECLARED_LEN: u16 = 0xfffa;
const OVERFLOW_DECLARED_LEN: u16 = 0xffff;
const OVERFLOW_FILLER_LEN: usize = 99_999;

#[rustfmt::skip]
const VALID_CLIENT_HELLO: &[u8] = &[
    // record: handshake, TLS 1.0, length 143
    0x16, 0x03, 0x01, 0x00, 0x8f,
    // handshake: client_hello
    0x01, 0x00, 0x00, 0x8b,
    // client_version TLS 1.2
    0x03, 0x03,
    // random
    0x5e, 0x3c, 0x92, 0x34, 0x0f, 0xa3, 0x1f, 0xaf,
    0xd1, 0x41, 0x8b, 0x12, 0x4c, 0x9d, 0x94, 0x00,
    // session id
    0x00,
    // cipher suites: TLS_RSA_WITH_AES_128_CBC_SHA
    0x00, 0x02, 0x00, 0x2f,
    // compression methods: null
    0x01, 0x00,
    // extensions
    0x00, 0x28,
    0x00, 0x0d, 0x00, 0x04, 0x00, 0x02, 0x05, 0x01,
    0x00, 0x33, 0x00, 0x02, 0xde, 0xad,
];

/// A candidate record sent verbatim to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    selector: &'static str,
    bytes: Vec<u8>,
}

/// Decoded record-layer prefix of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub content_type: u8,
    pub version: u16,
    pub declared_len: u16,
}

impl RecordHeader {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let raw = bytes.get(..RECORD_HEADER_LEN)?;
        Some(Self {
            content_type: raw[0],
            version: u16::from_be_bytes([raw[1], raw[2]]),
            declared_len: u16::from_be_bytes([raw[3], raw[4]]),
        })
    }

    pub fn is_handshake(&self) -> bool {
        self.content_type == CONTENT_TYPE_HANDSHAKE
    }

    pub fn exceeds_plaintext_limit(&self) -> bool {
        self.declared_len > MAX_PLAINTEXT_LEN
    }
}

impl Payload {
    fn new(selector: &'static str, bytes: Vec<u8>) -> Self {
        Self { selector, bytes }
    }

    /// Record header declaring `declared_len`, followed by `filler_len` zero bytes.
    fn padded(selector: &'static str, declared_len: u16, filler_len: usize) -> Self {
        let mut bytes = Vec::with_capacity(RECORD_HEADER_LEN + filler_len);
        bytes.extend_from_slice(&[CONTENT_TYPE_HANDSHAKE, 0x03, 0x01]);
        bytes.extend_from_slice(&declared_len.to_be_bytes());
        bytes.resize(RECORD_HEADER_LEN + filler_len, 0x00);
        Self::new(selector, bytes)
    }

    pub fn selector(&self) -> &'static str {
        self.selector
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn header(&self) -> Option<RecordHeader> {
        RecordHeader::parse(&self.bytes)
    }

    pub fn trailing_len(&self) -> usize {
        self.bytes.len().saturating_sub(RECORD_HEADER_LEN)
    }

    /// True when the bytes after the header match the declared record length.
    pub fn is_consistent(&self) -> bool {
        self.header()
            .is_some_and(|h| usize::from(h.declared_len) == self.trailing_len())
    }
}

/// Read-only table of payloads keyed by selector, in definition order.
#[derive(Debug)]
pub struct Catalog {
    payloads: Vec<Payload>,
}

impl Catalog {
    pub fn global() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Catalog::build)
    }

    fn build() -> Self {
        let payloads = vec![
            Payload::new("valid", VALID_CLIENT_HELLO.to_vec()),
            Payload::new("3B", vec![CONTENT_TYPE_HANDSHAKE, 0x03, 0x01]),
            Payload::new("empty", Vec::new()),
            Payload::new("1B", vec![CONTENT_TYPE_HANDSHAKE]),
            Payload::new("notClientHello", vec![0x00]),
            Payload::padded("max", MAX_DECLARED_LEN, usize::from(MAX_DECLARED_LEN)),
            Payload::padded("overflow", OVERFLOW_DECLARED_LEN, OVERFLOW_FILLER_LEN),
        ];
        Self { payloads }
    }

    pub fn get(&self, selector: &str) -> Option<&Payload> {
        self.payloads.iter().find(|p| p.selector == selector)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.payloads.iter().map(|p| p.selector)
    }
}

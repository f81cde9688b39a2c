use tokio::io::AsyncReadExt;

/// Largest single fragment captured from the peer.
pub const DEFAULT_CHUNK: usize = 64 * 1024;

pub struct FirstChunkReader {
    max_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    Data(Vec<u8>),
    Closed,
}

impl FirstChunkReader {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes: max_bytes.max(1),
        }
    }

    /// Waits for the first inbound event. Only one read is issued, so a peer
    /// that answers in several fragments yields just the first one.
    pub async fn read<T: AsyncReadExt + Unpin>(
        &self,
        stream: &mut T,
    ) -> std::io::Result<ReadEvent> {
        let mut buf = vec![0u8; self.max_bytes];
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(ReadEvent::Closed);
        }
        buf.truncate(n);
        Ok(ReadEvent::Data(buf))
    }
}

impl Default for FirstChunkReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_available_bytes() {
        let reader = FirstChunkReader::new(64);
        let mut data: &[u8] = b"\x15\x03\x01\x00\x02\x02\x32";
        let event = reader.read(&mut data).await.unwrap();
        assert_eq!(event, ReadEvent::Data(b"\x15\x03\x01\x00\x02\x02\x32".to_vec()));
    }

    #[tokio::test]
    async fn eof_is_closed() {
        let reader = FirstChunkReader::default();
        let mut data: &[u8] = b"";
        assert_eq!(reader.read(&mut data).await.unwrap(), ReadEvent::Closed);
    }

    #[tokio::test]
    async fn caps_at_max_bytes() {
        let reader = FirstChunkReader::new(4);
        let mut data: &[u8] = b"abcdefgh";
        assert_eq!(reader.read(&mut data).await.unwrap(), ReadEvent::Data(b"abcd".to_vec()));
    }
}

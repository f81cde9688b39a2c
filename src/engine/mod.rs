pub mod reader;

use crate::catalog::{Catalog, Payload};
use crate::model::{ProbeConfig, ProbeOutcome};
use crate::output::OutputSink;
use crate::util::now_millis;
use reader::{FirstChunkReader, ReadEvent};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, warn};

/// Runs one connect, send, observe, close cycle.
pub struct Engine {
    cfg: ProbeConfig,
    sink: OutputSink,
    reader: FirstChunkReader,
}

impl Engine {
    pub fn new(cfg: ProbeConfig, sink: OutputSink) -> anyhow::Result<Self> {
        Ok(Self {
            cfg,
            sink,
            reader: FirstChunkReader::default(),
        })
    }

    /// Resolves the selector before touching the network. Network failures
    /// are returned as [`ProbeOutcome::ErrorReported`]; `Err` is reserved for
    /// usage errors and a broken output sink.
    #[instrument(skip(self), fields(addr = %self.cfg.target, selector = %self.cfg.selector))]
    pub async fn run(&mut self) -> anyhow::Result<ProbeOutcome> {
        let payload = resolve(&self.cfg.selector)?;
        describe(payload);

        let outcome = self.probe(payload.bytes()).await?;
        info!(status = outcome.status_text(), "probe finished");

        self.sink.outcome(&outcome)?;
        self.sink.closed()?;
        Ok(outcome)
    }

    async fn probe(&self, payload: &[u8]) -> anyhow::Result<ProbeOutcome> {
        let target = &self.cfg.target;
        let start = now_millis();
        let mut stream = match TcpStream::connect((target.host.as_str(), target.port)).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "connect failed");
                return Ok(ProbeOutcome::ErrorReported(err.to_string()));
            }
        };
        debug!(connect_ms = now_millis() - start, "connected");
        self.sink.connected()?;

        let outcome = exchange(&mut stream, payload, &self.reader).await;
        drop(stream);
        Ok(outcome)
    }
}

pub fn resolve(selector: &str) -> anyhow::Result<&'static Payload> {
    let catalog = Catalog::global();
    match catalog.get(selector) {
        Some(payload) => Ok(payload),
        None => {
            let known = catalog.selectors().collect::<Vec<_>>().join(", ");
            anyhow::bail!("invalid selector {selector:?}; expected one of: {known}")
        }
    }
}

fn describe(payload: &Payload) {
    match payload.header() {
        Some(header) => debug!(
            payload = payload.selector(),
            bytes = payload.len(),
            handshake = header.is_handshake(),
            content_type = header.content_type,
            declared_len = header.declared_len,
            trailing = payload.trailing_len(),
            consistent = payload.is_consistent(),
            oversized = header.exceeds_plaintext_limit(),
            "payload selected"
        ),
        None => debug!(
            payload = payload.selector(),
            bytes = payload.len(),
            "payload selected (no record header)"
        ),
    }
}

/// Writes the payload while waiting for the first inbound event, so a peer
/// that answers or resets mid-write is observed instead of blocking on the
/// write. The first read result ends the exchange and is polled ahead of the
/// write, so a reply already buffered wins over a concurrent write failure.
async fn exchange(
    stream: &mut TcpStream,
    payload: &[u8],
    reader: &FirstChunkReader,
) -> ProbeOutcome {
    let (mut rd, mut wr) = stream.split();
    let send = wr.write_all(payload);
    let recv = reader.read(&mut rd);
    tokio::pin!(send, recv);

    let mut sent = false;
    loop {
        tokio::select! {
            biased;

            res = &mut recv => {
                return match res {
                    Ok(ReadEvent::Data(bytes)) => {
                        debug!(bytes = bytes.len(), "received first fragment");
                        ProbeOutcome::DataReceived(bytes)
                    }
                    Ok(ReadEvent::Closed) => {
                        debug!("peer closed without data");
                        ProbeOutcome::ClosedByPeer
                    }
                    Err(err) => {
                        warn!(error = %err, "read failed");
                        ProbeOutcome::ErrorReported(err.to_string())
                    }
                };
            }
            res = &mut send, if !sent => {
                sent = true;
                match res {
                    Ok(()) => debug!(bytes = payload.len(), "payload written"),
                    Err(err) => {
                        warn!(error = %err, "write failed");
                        return ProbeOutcome::ErrorReported(err.to_string());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_selector() {
        assert_eq!(resolve("1B").unwrap().bytes(), &[0x16]);
        assert!(resolve("empty").unwrap().is_empty());
    }

    #[test]
    fn resolve_unknown_selector_lists_choices() {
        let err = resolve("bogus").unwrap_err().to_string();
        assert!(err.contains("\"bogus\""));
        assert!(err.contains("notClientHello"));
        assert!(err.contains("overflow"));
    }
}

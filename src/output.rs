use crate::model::ProbeOutcome;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Human-readable lifecycle lines for a probe run.
#[derive(Clone)]
pub struct OutputSink {
    out: SharedWriter,
    err: SharedWriter,
}

impl OutputSink {
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            err: Arc::new(Mutex::new(err)),
        }
    }

    pub fn connected(&self) -> anyhow::Result<()> {
        write_line(&self.out, format_args!("Connected, sending payload..."))
    }

    pub fn outcome(&self, outcome: &ProbeOutcome) -> anyhow::Result<()> {
        match outcome {
            ProbeOutcome::DataReceived(bytes) => write_line(
                &self.out,
                format_args!("Received: {}", crate::util::hex::to_hex(bytes)),
            ),
            ProbeOutcome::ErrorReported(err) => {
                write_line(&self.err, format_args!("Connection error: {err}"))
            }
            ProbeOutcome::ClosedByPeer => Ok(()),
        }
    }

    pub fn closed(&self) -> anyhow::Result<()> {
        write_line(&self.out, format_args!("Connection closed."))
    }
}

fn write_line(writer: &SharedWriter, line: std::fmt::Arguments<'_>) -> anyhow::Result<()> {
    let mut guard = writer
        .lock()
        .map_err(|_| anyhow::anyhow!("output writer poisoned"))?;
    writeln!(guard, "{line}")?;
    guard.flush()?;
    Ok(())
}

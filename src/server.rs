use crate::mcp::router::Router;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Reads one request per line and writes one response per line until EOF.
///
/// Lines are handed to the router as raw bytes, so a line that is not UTF-8
/// gets the same parse error as any other malformed line. Returns an error
/// when the input cannot be read, the output cannot be written, or a
/// malformed line arrives with strict envelopes enabled.
pub fn run<R: BufRead, W: Write>(router: &Router, mut reader: R, mut writer: W) -> Result<()> {
    info!(tools = router.registry().len(), "serving over stdio");

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("failed to read stdin")?;
        if read == 0 {
            break;
        }

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let response = router
            .handle_line(line)
            .context("malformed request envelope")?;

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    debug!("stdin closed, shutting down");
    Ok(())
}

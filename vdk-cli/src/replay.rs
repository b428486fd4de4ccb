use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;
use vdk_core::FunctionCall;
use vdk_session::Session;

/// Feeds one `FunctionCall` per input line to the session and writes each
/// `FunctionResponse` as a JSON line. Blank lines and lines starting with `#`
/// are skipped. Returns the number of calls made.
///
/// A line that is not a valid call stops the replay with an error naming the
/// line; responses already written stay written.
pub async fn replay<R: BufRead, W: Write>(
    session: &Session,
    reader: R,
    mut writer: W,
) -> Result<usize> {
    let mut calls = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {}", line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let call: FunctionCall = serde_json::from_str(trimmed)
            .with_context(|| format!("line {} is not a function call", line_no))?;
        let response = session.call(call).await;

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        calls += 1;
    }
    writer.flush()?;

    info!(session.id = session.id(), calls, "replay finished");
    Ok(calls)
}

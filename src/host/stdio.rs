//! Stdin/stdout JSON bridge for the host command channel.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages, dispatches each
//! through the search controller, and writes one `ResponseEnvelope` per
//! command as newline-delimited JSON.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use cine_search::{PageFetcher, SearchController};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::error::{CineError, Result};
use crate::host::contract::{CommandEnvelope, CommandName, ResponseEnvelope};
use crate::host::handler::handle_command;

/// Run the bridge over the process's stdin and stdout until stdin closes or
/// a `runtime.stop` command is received.
pub async fn run_stdio_bridge<F: PageFetcher>(controller: &SearchController<F>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = BufWriter::new(tokio::io::stdout());
    run_bridge(controller, reader, &mut writer).await
}

/// Run the bridge over arbitrary line-oriented streams.
///
/// Commands are handled one at a time in arrival order. A line that does
/// not parse as a command envelope is answered with a `parse-error`
/// envelope and the loop continues.
pub async fn run_bridge<F, R, W>(
    controller: &SearchController<F>,
    mut reader: R,
    writer: &mut W,
) -> Result<()>
where
    F: PageFetcher,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| CineError::Channel(format!("failed to read from stdin: {e}")))?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); shutting down stdio bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: CommandEnvelope = match serde_json::from_str(trimmed) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse command envelope from stdin");
                let error_response = ResponseEnvelope::error(
                    "parse-error",
                    format!("failed to parse command envelope: {e}"),
                );
                write_response(writer, &error_response).await?;
                continue;
            }
        };

        let is_stop = envelope.command == CommandName::RuntimeStop;
        let response = handle_command(controller, envelope).await;
        write_response(writer, &response).await?;

        if is_stop && response.ok {
            tracing::info!("runtime.stop received; shutting down stdio bridge");
            break;
        }
    }

    Ok(())
}

/// Serialize a response and write it as a single flushed line.
async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ResponseEnvelope,
) -> Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| CineError::Channel(format!("failed to serialize response envelope: {e}")))?;
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| CineError::Channel(format!("failed to write to stdout: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| CineError::Channel(format!("failed to write newline to stdout: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| CineError::Channel(format!("failed to flush stdout: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::contract::EVENT_VERSION;
    use cine_search::{PageResult, PipelineConfig, SearchQuery};

    struct EmptyFetcher;

    impl PageFetcher for EmptyFetcher {
        async fn fetch_page(&self, _query: &SearchQuery, _page: u32) -> PageResult {
            PageResult::Fail {
                error_message: "Movie not found!".into(),
            }
        }
    }

    async fn run_lines(input: &str) -> Vec<ResponseEnvelope> {
        let controller =
            SearchController::new(EmptyFetcher, PipelineConfig::default()).expect("controller");
        let mut output = Vec::new();
        run_bridge(&controller, input.as_bytes(), &mut output)
            .await
            .expect("bridge");
        String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("response json"))
            .collect()
    }

    #[test]
    fn parse_error_response_is_well_formed() {
        let resp = ResponseEnvelope::error("parse-error", "bad json");
        assert!(!resp.ok);
        assert_eq!(resp.request_id, "parse-error");
        assert_eq!(resp.v, EVENT_VERSION);
        assert!(resp.error.is_some());
    }

    #[test]
    fn command_envelope_roundtrip_json() {
        let envelope =
            CommandEnvelope::new("req-1", CommandName::SessionGet, serde_json::json!({}));
        let json = serde_json::to_string(&envelope).expect("serialize in test");
        let parsed: CommandEnvelope = serde_json::from_str(&json).expect("deserialize in test");
        assert_eq!(parsed, envelope);
    }

    #[tokio::test]
    async fn garbage_line_gets_parse_error_and_loop_continues() {
        let responses = run_lines(
            "not json\n\n{\"v\":1,\"request_id\":\"r1\",\"command\":\"session.get\"}\n",
        )
        .await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].request_id, "parse-error");
        assert!(!responses[0].ok);
        assert_eq!(responses[1].request_id, "r1");
        assert!(responses[1].ok);
    }

    #[tokio::test]
    async fn runtime_stop_ends_the_loop() {
        let responses = run_lines(concat!(
            "{\"v\":1,\"request_id\":\"s\",\"command\":\"runtime.stop\"}\n",
            "{\"v\":1,\"request_id\":\"after\",\"command\":\"session.get\"}\n",
        ))
        .await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].request_id, "s");
    }

    #[tokio::test]
    async fn search_failure_is_reported_in_band() {
        let responses = run_lines(
            "{\"v\":1,\"request_id\":\"q\",\"command\":\"search.submit\",\"payload\":{\"title\":\"zzz\"}}\n",
        )
        .await;
        assert_eq!(responses.len(), 1);
        assert!(!responses[0].ok);
        assert_eq!(
            responses[0].error.as_deref(),
            Some("search failed: Movie not found!")
        );
    }

    #[tokio::test]
    async fn eof_without_commands_is_clean() {
        assert!(run_lines("").await.is_empty());
    }
}

//! Denom MCP Server
//!
//! Line-delimited JSON-RPC over stdio: one request per stdin line, one
//! response per stdout line, logs on stderr.
//!
//! Tools:
//! - convert: Convert a value between two units
//! - convert_all: Convert a value into every unit of its domain
//! - list_units: Units of a domain with their exponents
//! - list_domains: Available domains

mod config;
mod protocol;
mod tools;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use protocol::{handle_request, McpRequest, McpResponse, PROTOCOL_VERSION, SERVER_VERSION};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn write_response<W: Write>(writer: &mut W, response: &McpResponse) -> io::Result<()> {
    let json = serde_json::to_string(response).map_err(io::Error::other)?;
    writeln!(writer, "{}", json)?;
    writer.flush()
}

/// Serve requests until EOF
fn serve<R: BufRead, W: Write>(config: &ServerConfig, mut reader: R, mut writer: W) -> io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            info!("client disconnected (EOF)");
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(bytes = trimmed.len(), "received request");

        let request: McpRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                write_response(&mut writer, &McpResponse::parse_error(e))?;
                continue;
            }
        };

        let response = handle_request(config, &request);

        // Notifications (no id) should NOT receive a response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            continue;
        }

        write_response(&mut writer, &response)?;
        debug!(method = %request.method, "sent response");
    }
}

fn main() -> ExitCode {
    init_logging();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        domain = %config.default_domain,
        max_fraction_digits = ?config.options.max_fraction_digits,
        rounding = config.options.rounding.name(),
        "Denom MCP server started"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match serve(&config, stdin.lock(), stdout.lock()) {
        Ok(()) => {
            info!("server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as JsonValue;

    fn run(input: &str) -> Vec<JsonValue> {
        let mut out = Vec::new();
        serve(&ServerConfig::default(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_one_response_per_request() {
        let responses = run(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#, "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"convert","arguments":{"value":"1.5","from":"Ether","to":"Finney"}}}"#, "\n",
        ));
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["result"]["result"], "1500");
    }

    #[test]
    fn test_notifications_get_no_response() {
        let responses = run(concat!(r#"{"jsonrpc":"2.0","method":"initialized"}"#, "\n"));
        assert!(responses.is_empty());
    }

    #[test]
    fn test_garbage_gets_parse_error() {
        let responses = run("not json\n");
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], protocol::PARSE_ERROR);
    }
}

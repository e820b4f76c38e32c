mod stdout_sink;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bridge_core::app::{
    DEFAULT_TAG, EncoderConfig, ExecInfo, GateContext, ResultEncoder, ResultSpec,
};
use bridge_core::domain::{CUSTOM_CODE_PREFIX, StatusCode};
use bridge_core::impls::TracingSink;
use bridge_core::{Delivery, ResultSink};

use stdout_sink::StdoutSink;

#[derive(Parser)]
#[command(name = "bridge")]
#[command(about = "Encode native bridge result records", long_about = None)]
struct Cli {
    /// Prefix of the record `name` field.
    #[arg(long, global = true, default_value = DEFAULT_TAG)]
    tag: String,

    /// Log deliveries instead of printing them.
    #[arg(long, global = true)]
    log_only: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known status codes.
    Codes,

    /// Build one record and deliver it.
    Encode {
        /// Status code, decimal or 0x-prefixed hex. Defaults to the channel default.
        #[arg(short, long, value_parser = parse_code)]
        code: Option<i32>,

        #[arg(short, long)]
        message: Option<String>,

        #[arg(short, long)]
        task_id: Option<String>,

        /// Argument as JSON; anything that does not parse is taken as a string.
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Deliver on the error channel.
        #[arg(short, long)]
        error: bool,
    },

    /// Simulate one bridge call: build the context, optionally fail, then finish.
    Call {
        #[arg(long, default_value = "cli-callback")]
        callback_id: String,

        /// `execInfo` JSON object (className/methodName/taskId/...).
        #[arg(long)]
        exec_info: String,

        /// Fail the call with this code.
        #[arg(long, value_parser = parse_code)]
        fail: Option<i32>,

        #[arg(short, long)]
        message: Option<String>,
    },
}

fn parse_code(s: &str) -> Result<i32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        // Hex input covers the full 32-bit pattern, e.g. 0xffffffff == -1.
        Some(hex) => u32::from_str_radix(hex, 16).map(|v| v as i32),
        None => s.parse::<i32>(),
    };
    parsed.map_err(|e| format!("invalid status code {s:?}: {e}"))
}

fn parse_arg(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

/// One bridge call: an optional failure or message, then the automatic result.
fn run_call(
    encoder: &ResultEncoder,
    sink: &dyn ResultSink,
    callback_id: String,
    exec_info: &str,
    fail: Option<i32>,
    message: Option<String>,
) -> Result<()> {
    let info: ExecInfo = serde_json::from_str(exec_info).context("parse --exec-info")?;
    let ctx = GateContext::from_exec_info(callback_id, info)?;
    tracing::info!(
        class = ctx.class_name(),
        method = ctx.method_name(),
        task_id = ?ctx.task_id(),
        "bridge call"
    );

    if let Some(code) = fail {
        ctx.send_error(encoder, sink, code, message.as_deref())?;
    } else if let Some(message) = message {
        ctx.send_success(encoder, sink, ResultSpec::default().message(message))?;
    }
    ctx.finish(encoder, sink)?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let encoder = ResultEncoder::new(EncoderConfig::with_tag(cli.tag));
    let sink: Box<dyn ResultSink> = if cli.log_only {
        Box::new(TracingSink::new())
    } else {
        Box::new(StdoutSink::new())
    };

    match cli.command {
        Commands::Codes => {
            for status in StatusCode::ALL {
                println!("{:#06x} {}", status.code(), status.name());
            }
            println!("other  {CUSTOM_CODE_PREFIX}<hex>");
        }

        Commands::Encode {
            code,
            message,
            task_id,
            args,
            error,
        } => {
            let mut spec = ResultSpec::default().args(args.iter().map(|a| parse_arg(a)));
            if let Some(code) = code {
                spec = spec.code(code);
            }
            if let Some(message) = message {
                spec = spec.message(message);
            }
            if let Some(task_id) = task_id {
                spec = spec.task_id(task_id);
            }

            let channel = if error { Delivery::Error } else { Delivery::Ok };
            tracing::info!(%channel, "encoding result");
            let sent = match channel {
                Delivery::Ok => encoder.send_success(&sink, spec),
                Delivery::Error => encoder.send_error_result(&sink, spec),
            };
            sent.context("encode result")?;
        }

        Commands::Call {
            callback_id,
            exec_info,
            fail,
            message,
        } => run_call(&encoder, &*sink, callback_id, &exec_info, fail, message)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::impls::RecordingSink;
    use serde_json::json;

    const EXEC_INFO: &str = r#"{"className":"SimpleGate","methodName":"coolMethod","taskId":"T1"}"#;

    #[test]
    fn parse_code_accepts_decimal_and_hex() {
        assert_eq!(parse_code("3"), Ok(3));
        assert_eq!(parse_code("0x8"), Ok(8));
        assert_eq!(parse_code("0X1F"), Ok(0x1f));
        assert_eq!(parse_code("0xffffffff"), Ok(-1));
        assert!(parse_code("nope").is_err());
    }

    #[test]
    fn parse_arg_falls_back_to_string() {
        assert_eq!(parse_arg("1"), json!(1));
        assert_eq!(parse_arg("\"x\""), json!("x"));
        assert_eq!(parse_arg("{\"a\":true}"), json!({"a": true}));
        assert_eq!(parse_arg("plain text"), json!("plain text"));
    }

    #[test]
    fn cli_parses_encode() {
        let cli = Cli::try_parse_from([
            "bridge", "encode", "--code", "0x2", "-m", "stopped", "-t", "T3", "--arg", "1",
            "--arg", "x", "--error",
        ])
        .unwrap();
        match cli.command {
            Commands::Encode { code, args, error, .. } => {
                assert_eq!(code, Some(StatusCode::ErrorCancel.code()));
                assert_eq!(args, vec!["1", "x"]);
                assert!(error);
            }
            _ => panic!("expected encode"),
        }
        assert_eq!(cli.tag, DEFAULT_TAG);
    }

    #[test]
    fn call_with_fail_sends_one_error() {
        let encoder = ResultEncoder::default();
        let sink = RecordingSink::new();

        run_call(
            &encoder,
            &sink,
            "cb".into(),
            EXEC_INFO,
            Some(StatusCode::ErrorCancel.code()),
            Some("stopped".into()),
        )
        .unwrap();

        let got = sink.deliveries();
        assert_eq!(got.len(), 1);
        let (channel, record) = &got[0];
        assert_eq!(*channel, Delivery::Error);
        assert_eq!(record.code(), StatusCode::ErrorCancel.code());
        assert_eq!(record.message(), Some("stopped"));
        assert_eq!(record.task_id(), Some("T1"));
    }

    #[test]
    fn call_with_message_sends_one_success() {
        let encoder = ResultEncoder::default();
        let sink = RecordingSink::new();

        run_call(&encoder, &sink, "cb".into(), EXEC_INFO, None, Some("hi".into())).unwrap();

        let got = sink.deliveries();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].0, Delivery::Ok);
        assert_eq!(got[0].1.message(), Some("hi"));
    }

    #[test]
    fn plain_call_finishes_with_default_success() {
        let encoder = ResultEncoder::default();
        let sink = RecordingSink::new();

        run_call(&encoder, &sink, "cb".into(), EXEC_INFO, None, None).unwrap();

        let expected = encoder.make_result(ResultSpec::for_task("T1")).unwrap();
        assert_eq!(sink.deliveries(), vec![(Delivery::Ok, expected)]);
    }

    #[test]
    fn call_rejects_bad_exec_info() {
        let encoder = ResultEncoder::default();
        let sink = RecordingSink::new();

        assert!(run_call(&encoder, &sink, "cb".into(), "{}", None, None).is_err());
        assert!(run_call(&encoder, &sink, "cb".into(), "nope", None, None).is_err());
        assert!(sink.is_empty());
    }
}

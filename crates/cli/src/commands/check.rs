use std::path::Path;
use std::process;

use inseq_core::{InputSequence, SequenceParams};
use serde::Serialize;

use super::resolve_params;
use crate::config::ParamArgs;
use crate::{report_error, OutputFormat};

/// Outcome for one line of the checked file.
#[derive(Debug, Serialize)]
struct LineReport {
    line: usize,
    text: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub(crate) fn cmd_check(file: &Path, args: &ParamArgs, output: OutputFormat, quiet: bool) {
    let params = resolve_params(args, output, quiet);

    let content = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let reports = check_lines(&content, &params);
    let failed = reports.iter().filter(|r| !r.valid).count();

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&reports)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for r in reports.iter().filter(|r| !r.valid) {
                println!(
                    "{}:{}: {}",
                    file.display(),
                    r.line,
                    r.message.as_deref().unwrap_or_default()
                );
            }
            if !quiet {
                eprintln!("checked {} expressions, {} failed", reports.len(), failed);
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn check_lines(content: &str, params: &SequenceParams) -> Vec<LineReport> {
    content
        .lines()
        .enumerate()
        .filter(|(_, l)| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .map(|(i, l)| {
            let text = l.trim().to_owned();
            let message = InputSequence::parse(&text, params)
                .into_intervals()
                .err()
                .map(|e| e.message);
            LineReport {
                line: i + 1,
                valid: message.is_none(),
                text,
                message,
            }
        })
        .collect()
}

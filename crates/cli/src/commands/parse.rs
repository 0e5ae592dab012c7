use std::process;

use inseq_core::InputSequence;

use super::resolve_params;
use crate::config::ParamArgs;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_parse(text: &str, args: &ParamArgs, output: OutputFormat, quiet: bool) {
    let params = resolve_params(args, output, quiet);
    let seq = InputSequence::parse(text, &params);
    tracing::info!(
        intervals = seq.intervals().len(),
        diagnostics = seq.diagnostics().len(),
        "parsed input sequence"
    );

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&seq.to_json_value())
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
            if !seq.is_valid() {
                process::exit(1);
            }
        }
        OutputFormat::Text => match seq.into_intervals() {
            Ok(intervals) => {
                for iv in &intervals {
                    println!("{}", iv);
                }
            }
            Err(e) => {
                tracing::debug!(details = %e.details, "rejected input sequence");
                report_error(&e.message, output, quiet);
                process::exit(1);
            }
        },
    }
}

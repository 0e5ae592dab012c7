use std::process;

use inseq_core::abridge_diagnostic;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_abridge(text: &str, output: OutputFormat, quiet: bool) {
    match abridge_diagnostic(text) {
        Ok(sentence) => match output {
            OutputFormat::Text => println!("{}", sentence),
            OutputFormat::Json => println!("{}", serde_json::json!({ "message": sentence })),
        },
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

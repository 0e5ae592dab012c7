pub(crate) mod abridge;
pub(crate) mod check;
pub(crate) mod parse;

use std::process;

use inseq_core::SequenceParams;

use crate::config::ParamArgs;
use crate::{report_error, OutputFormat};

/// Resolve parameters or exit with the configuration error.
pub(crate) fn resolve_params(
    args: &ParamArgs,
    output: OutputFormat,
    quiet: bool,
) -> SequenceParams {
    match args.resolve() {
        Ok(p) => p,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

//! Generate request code command.

use paygate_types::generate_request_code;

use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Render, RequestCodeOutput};

/// Execute the request-code command.
pub fn request_code(length: usize, format: OutputFormat) -> CliResult<String> {
    if length == 0 {
        return Err(CliError::user("Request code length must be at least 1"));
    }
    let output = RequestCodeOutput {
        request_code: generate_request_code(length),
    };
    Ok(output.render(format))
}

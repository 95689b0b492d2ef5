use clap::Args;
use serde::Serialize;

use file_sanitizer::sanitize::{is_valid_name, sanitize};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct NameArgs {
    /// Names to sanitize
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum NameOutput {
    #[serde(rename = "name")]
    Name { names: Vec<NameSummary> },
}

#[derive(Serialize)]
pub struct NameSummary {
    pub input: String,
    pub sanitized: String,
    pub changed: bool,
    /// False when the sanitized name cannot be used as a file name.
    pub valid: bool,
}

pub fn run(args: NameArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<NameOutput> {
    let names = args
        .names
        .into_iter()
        .map(|input| {
            let sanitized = sanitize(&input);
            NameSummary {
                changed: sanitized != input,
                valid: is_valid_name(&sanitized),
                input,
                sanitized,
            }
        })
        .collect();

    Ok((NameOutput::Name { names }, 0))
}

use serde::Serialize;
use serde_json::Value;

use crate::commands::CommandResult;
use crate::error::CliError;

/// Stdout envelope shared by every command.
#[derive(Debug, Serialize)]
struct Output<'a> {
    command: &'a str,
    data: &'a Value,
    warnings: &'a [String],
}

pub fn to_json(command: &str, result: &CommandResult, pretty: bool) -> Result<String, CliError> {
    let output = Output {
        command,
        data: &result.data,
        warnings: &result.warnings,
    };
    let payload = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(payload)
}

pub fn render(command: &str, result: &CommandResult, pretty: bool) -> Result<(), CliError> {
    println!("{}", to_json(command, result, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_carries_command_data_and_warnings() {
        let result = CommandResult::ok(json!({"puuid": "abc123"})).with_warning("careful");

        let payload = to_json("puuid", &result, false).expect("serialize");

        assert_eq!(
            serde_json::from_str::<Value>(&payload).expect("json"),
            json!({"command": "puuid", "data": {"puuid": "abc123"}, "warnings": ["careful"]})
        );
        assert!(!payload.contains('\n'));
    }

    #[test]
    fn pretty_output_is_indented() {
        let payload = to_json("records", &CommandResult::ok(json!({})), true).expect("serialize");
        assert!(payload.contains("\n  \"data\""));
    }
}

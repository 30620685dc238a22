use std::fs;
use std::io::{self, Read};

use advisor_core::config::AppConfig;
use advisor_core::{lambda_handler, HandlerError, IntentRouter, InvocationContext};
use serde_json::Value;
use uuid::Uuid;

use super::{CommandResult, EXIT_DISPATCH, EXIT_INPUT};

pub fn run(event_path: &str, correlation_id: Option<String>, config: &AppConfig) -> CommandResult {
    let raw = match read_event(event_path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "invoke",
                "event_read",
                format!("could not read event from `{event_path}`: {error}"),
                EXIT_INPUT,
            )
        }
    };

    let correlation_id = correlation_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    run_with_input(&raw, &InvocationContext::new(correlation_id), config)
}

pub fn run_with_input(raw: &str, context: &InvocationContext, config: &AppConfig) -> CommandResult {
    let event = match serde_json::from_str::<Value>(raw) {
        Ok(event) => event,
        Err(error) => {
            return CommandResult::failure(
                "invoke",
                "event_parse",
                format!("event is not valid JSON: {error}"),
                EXIT_INPUT,
            )
        }
    };

    let router = IntentRouter::new(config.validator());
    match lambda_handler(event, context, &router) {
        Ok(response) => CommandResult {
            exit_code: 0,
            output: serde_json::to_string(&response).unwrap_or_else(|_| response.to_string()),
        },
        Err(error) => {
            let exit_code = match error {
                HandlerError::InvalidEvent(_) => EXIT_INPUT,
                HandlerError::Dispatch(_) | HandlerError::Encode(_) => EXIT_DISPATCH,
            };
            CommandResult::failure("invoke", error.error_class(), error.to_string(), exit_code)
        }
    }
}

fn read_event(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }

    fs::read_to_string(path)
}

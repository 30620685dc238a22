use advisor_core::config::AppConfig;
use advisor_core::SlotInputs;

use super::{CommandResult, EXIT_DISPATCH};

#[derive(Clone, Debug, Default)]
pub struct SlotArgs {
    pub first_name: Option<String>,
    pub age: Option<String>,
    pub investment_amount: Option<String>,
    pub risk_level: Option<String>,
}

/// Prints the validator's verdict. An invalid slot is a normal outcome, so the
/// exit code stays zero.
pub fn run(args: SlotArgs, config: &AppConfig) -> CommandResult {
    let inputs = SlotInputs {
        first_name: args.first_name.as_deref(),
        age: args.age.as_deref(),
        investment_amount: args.investment_amount.as_deref(),
        risk_level: args.risk_level.as_deref(),
    };
    let result = config.validator().validate(&inputs);

    match serde_json::to_string(&result) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure(
            "validate",
            "serialization",
            format!("validation result could not be encoded: {error}"),
            EXIT_DISPATCH,
        ),
    }
}

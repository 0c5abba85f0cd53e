use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::config::StepEnv;
use crate::shared::ActionError;

pub mod cleanup;
pub mod login;
pub mod register;

pub fn run_cli(args: Vec<String>, env: &StepEnv) -> Result<String, ActionError> {
    if args.is_empty() {
        return Ok(help_text());
    }

    let verb = parse_cli_verb(args[0].as_str());
    if args.len() > 1 && verb != CliVerb::Unknown {
        return Err(ActionError::Usage(format!(
            "usage: {}; configure the step through inputs instead of arguments",
            args[0]
        )));
    }
    match verb {
        CliVerb::Login => login::cmd_login(env),
        CliVerb::Register => register::cmd_register(env),
        CliVerb::Cleanup => Ok(cleanup::cmd_cleanup(env)),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(ActionError::Usage(format!(
            "unknown command `{}`",
            args[0]
        ))),
    }
}

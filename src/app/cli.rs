#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Login,
    Register,
    Cleanup,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "login" => CliVerb::Login,
        "register" => CliVerb::Register,
        "cleanup" => CliVerb::Cleanup,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  login       Log in with client_id/key_secret, cache the token, publish run inputs"
            .to_string(),
        "  register    Register this workflow run and its steps with the building block run"
            .to_string(),
        "  cleanup     Delete the cached token file".to_string(),
        String::new(),
        "Inputs are read from INPUT_<NAME> variables: base_url, bb_run_uuid, steps, token,"
            .to_string(),
        "client_id, key_secret, buildingBlockRunUrl, buildingBlockRun.".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = vec![format!("meshstack-action {}", env!("CARGO_PKG_VERSION"))];
    lines.extend(cli_help_lines());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse() {
        assert_eq!(parse_cli_verb("login"), CliVerb::Login);
        assert_eq!(parse_cli_verb("register"), CliVerb::Register);
        assert_eq!(parse_cli_verb("cleanup"), CliVerb::Cleanup);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("deploy"), CliVerb::Unknown);
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for verb in ["login", "register", "cleanup"] {
            assert!(help.contains(verb), "missing {verb} in:\n{help}");
        }
    }
}

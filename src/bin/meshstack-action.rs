use meshstack_action::app::command_handlers;
use meshstack_action::config::StepEnv;
use meshstack_action::shared::logging::{log_event, LogLevel};
use meshstack_action::shared::ActionError;

fn run() -> Result<(), ActionError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let env = StepEnv::from_process();
    let output = command_handlers::run_cli(args, &env)?;
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        log_event(LogLevel::Error, err.kind().as_str(), &err.to_string());
        std::process::exit(1);
    }
}

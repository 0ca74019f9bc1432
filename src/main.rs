use std::process::ExitCode;

use dreadhall::config::ProcessContext;
use dreadhall::providers::provider_for_context;
use dreadhall::run::run_session;
use dreadhall::session::Session;
use dreadhall::terminal::SessionTerminal;

fn main() -> ExitCode {
    // .env first, before anything reads the environment.
    let _ = dotenvy::dotenv();

    let context = match ProcessContext::from_env() {
        Ok(context) => context,
        Err(error) => {
            eprintln!("dreadhall: {error}");
            return ExitCode::FAILURE;
        }
    };

    let provider = match provider_for_context(&context) {
        Ok(provider) => provider,
        Err(error) => {
            eprintln!("dreadhall: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(context.directive.clone());

    // The terminal is scoped so raw mode is released before any teardown
    // message is printed.
    let outcome = match SessionTerminal::new() {
        Ok(mut terminal) => run_session(&mut session, provider.as_ref(), &mut terminal),
        Err(error) => {
            eprintln!("dreadhall: could not claim the terminal: {error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = outcome {
        eprintln!("dreadhall: terminal failure: {error}");
        return ExitCode::FAILURE;
    }

    if let Some(notice) = session.take_error_notice() {
        eprintln!("dreadhall: {notice}");
        return ExitCode::FAILURE;
    }

    println!("Thanks for playing.");
    ExitCode::SUCCESS
}

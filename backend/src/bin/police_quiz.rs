//! Sit the timed police entrance quiz from a terminal.
//!
//! Signs in to a running portal, shows each question with its countdown and
//! submits the collected answers as a `police` application once the last
//! question closes. Type an answer and press Enter to move on; `:quit`
//! abandons the quiz without submitting.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use portal::domain::quiz::{
    QuestionKind, QuizHandle, QuizInput, QuizPhase, QuizRunner, QuizSnapshot,
    police_question_bank,
};
use portal::outbound::portal_client::PortalClient;
use tokio::runtime::Builder;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{EnvFilter, fmt};

const PASSWORD_ENV: &str = "PORTAL_QUIZ_PASSWORD";
const QUIT_COMMAND: &str = ":quit";

/// `police-quiz` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "police-quiz",
    about = "Take the timed police entrance quiz against a running portal",
    version
)]
struct CliArgs {
    /// Base URL of the portal.
    #[arg(long = "portal-url", value_name = "url", default_value = "http://localhost:8080")]
    portal_url: String,
    /// Account to sign in with.
    #[arg(long, short = 'u', value_name = "name")]
    username: String,
    /// Password; falls back to `PORTAL_QUIZ_PASSWORD` when omitted.
    #[arg(long, value_name = "password")]
    password: Option<String>,
}

fn resolve_password(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => env::var(PASSWORD_ENV)
            .map_err(|_| eyre!("pass --password or set {PASSWORD_ENV}")),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {error}");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = CliArgs::parse();
    let password = resolve_password(args.password)?;

    let client = PortalClient::new(&args.portal_url)?;
    client.login(&args.username, &password).await?;
    if let Some(role) = client.current_role().await?
        && !role.may_take_police_quiz()
    {
        bail!("members with the {role} role cannot take the police quiz");
    }

    let bank = police_question_bank();
    println!(
        "Police entrance quiz: {} questions, each on its own timer.",
        bank.len()
    );
    println!("Press Enter to start, or type {QUIT_COMMAND} to leave.");
    if read_line()?.trim() == QUIT_COMMAND {
        return Ok(());
    }

    let (runner, QuizHandle { inputs, snapshots }) = QuizRunner::new(bank, Arc::new(client));
    let render = tokio::spawn(render(snapshots));
    forward_stdin(inputs);

    let outcome = runner.run().await?;
    // The renderer stops once the runner drops its snapshot sender.
    render.await.wrap_err("render task failed")?;

    match outcome {
        QuizPhase::Succeeded => {
            println!("Answers submitted. A reviewer will look at your application.");
            Ok(())
        }
        QuizPhase::SubmissionFailed { message } => bail!("submission failed: {message}"),
        QuizPhase::Abandoned => {
            println!("Quiz abandoned; nothing was submitted.");
            Ok(())
        }
        phase => bail!("quiz stopped in unexpected phase {phase:?}"),
    }
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("read from stdin")?;
    Ok(line)
}

/// Forward stdin lines on a plain thread: a blocking read cannot be
/// cancelled, and a tokio blocking task would keep the runtime alive.
fn forward_stdin(inputs: mpsc::Sender<QuizInput>) {
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim_end().to_owned();
            let messages = if line == QUIT_COMMAND {
                vec![QuizInput::Abandon]
            } else {
                vec![QuizInput::Answer(line), QuizInput::Next]
            };
            for message in messages {
                if inputs.blocking_send(message).is_err() {
                    return;
                }
            }
        }
        // EOF drops the sender, which the runner treats as abandoning.
    });
}

async fn render(mut snapshots: watch::Receiver<QuizSnapshot>) {
    let mut shown: Option<usize> = None;
    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        show(&snapshot, &mut shown);
        if snapshots.changed().await.is_err() {
            break;
        }
    }
}

fn show(snapshot: &QuizSnapshot, shown: &mut Option<usize>) {
    match &snapshot.phase {
        QuizPhase::Testing { index, remaining } if *shown != Some(*index) => {
            *shown = Some(*index);
            let Some(question) = &snapshot.question else {
                return;
            };
            let prompt = match question.kind {
                QuestionKind::Protocol => "What does this code mean?",
                QuestionKind::General => "Answer:",
            };
            println!(
                "\n[{}/{}] {} ({}s)\n{prompt}",
                index + 1,
                snapshot.total,
                question.label,
                remaining.as_secs()
            );
            print!("> ");
            let _ = io::stdout().flush();
        }
        QuizPhase::Submitting => println!("\nSubmitting answers..."),
        _ => {}
    }
}

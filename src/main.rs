use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::Terminal;
use tokio::sync::mpsc;

use gpt_term::adapters::{AnthropicClient, FileConversationStore, SystemClipboard, TokioProcessRunner};
use gpt_term::app::prompts::SYSTEM_PROMPT;
use gpt_term::app::{App, AppMessage, Collaborators, Handoff};
use gpt_term::cli::version::{handle_help_command, handle_version_command};
use gpt_term::cli::{parse_args, CliCommand};
use gpt_term::editor::edit_text;
use gpt_term::startup::{init_tracing, AppConfig};
use gpt_term::terminal::{setup_panic_hook, Backend, TerminalManager};
use gpt_term::ui;
use gpt_term::ui::theme::Theme;

/// Spinner frame interval while something is running
const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Flags are handled before any initialization
    match parse_args(std::env::args()) {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::RunTui => {}
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            println!("Error: {}", err);
            std::process::exit(1);
        }
    };

    color_eyre::install()?;

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    if !init_tracing(&config) {
        eprintln!(
            "warning: could not open log file {}",
            config.log_path().display()
        );
    }
    tracing::info!(version = gpt_term::cli::VERSION, model = %config.model, "starting gpt-term");

    let store = FileConversationStore::open(config.conversations_dir())?;

    // Create Tokio runtime for the entire application
    let runtime = tokio::runtime::Runtime::new()?;

    let collaborators = Collaborators {
        assistant: Arc::new(AnthropicClient::from_config(&config)),
        store: Arc::new(store),
        runner: Arc::new(TokioProcessRunner::new()),
        clipboard: Arc::new(SystemClipboard::new()),
    };

    let mut term_manager = TerminalManager::new()?;

    // Tasks are spawned from App, so it is built inside the runtime
    let result = runtime.block_on(async {
        let (mut app, message_rx) = App::new(
            collaborators,
            Theme::from_env(),
            SYSTEM_PROMPT,
            config.editor.clone(),
        );
        let size = term_manager.terminal().size()?;
        app.set_terminal_size(size.width, size.height);

        run_app(&mut term_manager, &mut app, message_rx).await
    });

    // Restore the terminal before anything else reaches stdout
    drop(term_manager);
    // Outstanding requests and commands are abandoned on quit
    runtime.shutdown_background();

    if let Err(ref err) = result {
        tracing::error!(error = %err, "exiting with error");
    } else {
        tracing::info!("exiting");
    }
    result
}

async fn run_app(
    term_manager: &mut TerminalManager,
    app: &mut App,
    mut message_rx: mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    loop {
        // Draw the UI only when needed
        if app.needs_redraw {
            draw(term_manager.terminal(), app)?;
            app.needs_redraw = false;
        }

        let busy = app.is_busy();
        let tick = async {
            if busy {
                tokio::time::sleep(TICK_INTERVAL).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = tick => app.tick(),

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(event)) => app.handle_event(event),
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "terminal event error");
                    }
                    // Input closed
                    None => app.quit(),
                }
            }

            msg = message_rx.recv() => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        if let Some(handoff) = app.take_handoff() {
            // The event reader must not compete with the child for stdin
            drop(event_stream);
            let msg = run_handoff(term_manager, app, handoff)?;
            event_stream = EventStream::new();
            app.handle_message(msg);
            let size = term_manager.terminal().size()?;
            app.set_terminal_size(size.width, size.height);
        }
    }
}

fn draw(terminal: &mut Terminal<Backend>, app: &App) -> Result<()> {
    terminal.draw(|f| ui::render(f, app))?;
    Ok(())
}

/// Give the terminal to an external program and report the outcome as a
/// message for the engine. The event loop is paused until it returns.
fn run_handoff(
    term_manager: &mut TerminalManager,
    app: &App,
    handoff: Handoff,
) -> Result<AppMessage> {
    match handoff {
        Handoff::Edit {
            conversation_id,
            index,
            content,
        } => {
            term_manager.suspend();
            let result = edit_text(&app.editor, &content);
            term_manager.resume()?;
            if let Err(ref err) = result {
                tracing::warn!(error = %err, "edit failed");
            }
            Ok(AppMessage::EditFinished {
                conversation_id,
                index,
                result,
            })
        }
    }
}

use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use runpad_term::application::ui::destruct_terminal_for_panic;
use runpad_term::application::ui::start_loop;
use runpad_term::configuration::Config;
use runpad_term::configuration::ConfigKey;
use runpad_term::domain::models::Action;
use runpad_term::domain::models::AssistantName;
use runpad_term::domain::models::Event;
use runpad_term::domain::models::ExecutorName;
use runpad_term::domain::services::ActionsService;
use runpad_term::domain::services::AppStateProps;
use runpad_term::infrastructure::clients::ClientManager;
use tokio::sync::mpsc;
use tokio::task;

async fn start_ui(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let app_state_props = AppStateProps {
        language_id: Config::get(ConfigKey::Language),
    };

    let result = start_loop(&mut terminal, app_state_props, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;

    let _ = crossterm::execute!(io::stdout(), cursor::Show);

    return result;
}

/// Runs the terminal UI until the user quits, with the request worker alongside it.
pub async fn run() -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(
            ClientManager::get_executor(ExecutorName::default()),
            ClientManager::get_assistant(AssistantName::default()),
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    let result = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = start_ui(action_tx, event_rx) => res,
    );

    if result.is_err() {
        destruct_terminal_for_panic();
    }

    return result;
}

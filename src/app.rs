use crate::api::Recall;
use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::state::State;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;
use tui_logger::{init_logger, set_default_level};

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
/// Carries the dark-mode flag to persist.
pub type ConfigSaveSender = std::sync::mpsc::Sender<bool>;
type ConfigSaveReceiver = std::sync::mpsc::Receiver<bool>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration,
    /// opening on the page named by `fragment`. Returns the result of the
    /// application execution.
    ///
    pub async fn start(config: Config, fragment: Option<&str>) -> Result<()> {
        init_logger(LevelFilter::Trace).map_err(|e| AppError::Logger(e.to_string()))?;
        set_default_level(LevelFilter::Trace);

        info!("Starting application against {}...", config.base_url);
        let recall = Recall::new(&config.base_url, config.api_key.as_deref())?;
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (config_save_tx, config_save_rx) = std::sync::mpsc::channel::<bool>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(
                tx,
                config_save_tx,
                fragment,
                config.dark_mode,
            ))),
            config,
        };
        app.start_network(rx, recall)?;
        app.start_config_saver(config_save_rx);
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a thread to handle config save requests.
    ///
    fn start_config_saver(&self, receiver: ConfigSaveReceiver) {
        let config = self.config.clone();
        std::thread::spawn(move || {
            while let Ok(dark_mode) = receiver.recv() {
                match config.save_dark_mode(dark_mode) {
                    Ok(_) => debug!("Saved dark mode preference ({}).", dark_mode),
                    Err(e) => error!("Failed to save config: {}", e),
                }
            }
        });
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver, recall: Recall) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        std::thread::spawn(move || {
            runtime.block_on(async {
                let mut network_event_handler = NetworkEventHandler::new(&cloned_state, &recall);
                while let Ok(network_event) = net_receiver.recv() {
                    match network_event_handler.handle(network_event).await {
                        Ok(_) => (),
                        Err(e) => error!("Failed to handle network event: {}", e),
                    }
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        self.state.lock().await.start();

        let terminal_event_handler = TerminalEventHandler::new();
        let outcome = loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.size() {
                state.set_terminal_size(size);
            };
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(e.into());
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => (),
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        outcome
    }
}

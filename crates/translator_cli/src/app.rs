use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use translator_core::{update, AppState, ClientConfig, Msg, SelectedFile, UiState};
use translator_engine::EngineHandle;
use translator_logging::{app_debug, app_warn};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render::Renderer;

/// How long the loop waits for an engine event before emitting a render tick.
const TICK: Duration = Duration::from_millis(75);

/// How a translation run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved,
    Failed(String),
    Cancelled,
}

/// Owns the state machine and feeds it messages from the user, the engine and the clock.
struct Controller {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
    interrupted: bool,
}

impl Controller {
    fn new(config: ClientConfig, engine: EngineHandle) -> Self {
        Self {
            state: AppState::with_config(config),
            runner: EffectRunner::new(engine),
            renderer: Renderer::new(),
            interrupted: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        app_debug!("dispatch {:?}", msg);
        if matches!(msg, Msg::CancelClicked) {
            self.interrupted = true;
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        if state.consume_dirty() {
            self.renderer.render(&state.view());
        }
        self.state = state;
    }

    /// Returns the outcome once the run reached a final state.
    ///
    /// A cancel ends the run in every stage, including `Complete` while the
    /// download is still pending.
    fn outcome(&self) -> Option<Outcome> {
        if self.interrupted {
            return Some(Outcome::Cancelled);
        }
        let view = self.state.view();
        match view.stage {
            UiState::AwaitingUpload | UiState::FileSelected => Some(match view.error {
                Some(error) => Outcome::Failed(error),
                None => Outcome::Cancelled,
            }),
            UiState::Complete => {
                if view.saved_to.is_some() {
                    Some(Outcome::Saved)
                } else {
                    view.download_error.map(Outcome::Failed)
                }
            }
            UiState::Translating => None,
        }
    }
}

/// Builds the selection message from a path on disk.
pub fn selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let metadata =
        fs::metadata(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(metadata.is_file(), "{} is not a file", path.display());
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    Ok(SelectedFile::new(path, name, metadata.len()))
}

/// Runs only the client-side validation for `path`. No network traffic.
pub fn check_file(config: &ClientConfig, path: &Path) -> anyhow::Result<Result<(), String>> {
    let file = selected_file(path)?;
    Ok(translator_core::validate_file(&file, &config.limits).map_err(|err| err.to_string()))
}

/// Uploads `path`, follows the translation and downloads the result.
pub fn run_translation(config: &AppConfig, path: &Path, language: &str) -> anyhow::Result<Outcome> {
    let file = selected_file(path)?;

    let engine = EngineHandle::new(config.engine_settings())?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    spawn_interrupt_listener(msg_tx);

    let mut controller = Controller::new(config.client.clone(), engine);

    controller.dispatch(Msg::FileChosen(file));
    controller.dispatch(Msg::LanguageChosen(language.to_string()));
    controller.dispatch(Msg::StartClicked);
    if controller.state.stage() != UiState::Translating {
        let message = controller
            .state
            .view()
            .error
            .unwrap_or_else(|| "Translation could not be started.".to_string());
        return Ok(Outcome::Failed(message));
    }

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            controller.dispatch(msg);
        }
        match controller.runner.next_msg(TICK) {
            Some(msg) => controller.dispatch(msg),
            None => controller.dispatch(Msg::Tick),
        }
        if let Some(outcome) = controller.outcome() {
            return Ok(outcome);
        }
    }
}

/// Turns Ctrl-C into a cancel click.
fn spawn_interrupt_listener(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                app_warn!("Ctrl-C handling unavailable: {}", err);
                return;
            }
        };
        runtime.block_on(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if msg_tx.send(Msg::CancelClicked).is_err() {
                    break;
                }
            }
        });
    });
}

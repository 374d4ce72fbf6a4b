use indicatif::{ProgressBar, ProgressStyle};
use translator_core::{AppViewModel, UiState};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}";

/// Draws view-model changes on the terminal.
pub struct Renderer {
    bar: Option<ProgressBar>,
    last_stage: Option<UiState>,
    last_error: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            bar: None,
            last_stage: None,
            last_error: None,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) {
        if view.error != self.last_error {
            if let Some(error) = &view.error {
                self.println(&format!("error: {error}"));
            }
            self.last_error = view.error.clone();
        }

        match view.stage {
            UiState::Translating => {
                let bar = self.bar.get_or_insert_with(new_bar);
                bar.set_position(bar_position(view));
                bar.set_message(view.status_line());
            }
            UiState::Complete => {
                if let Some(bar) = self.bar.take() {
                    bar.set_position(bar_position(view));
                    bar.finish_with_message(view.status_line());
                }
                if let Some(path) = &view.saved_to {
                    println!("Saved {}", path.display());
                } else if let Some(err) = &view.download_error {
                    self.println(&format!("download failed: {err}"));
                } else if let Some(url) = &view.download_url {
                    println!("Downloading {url}");
                }
            }
            UiState::AwaitingUpload | UiState::FileSelected => {
                if let Some(bar) = self.bar.take() {
                    bar.abandon();
                }
                if self.last_stage != Some(view.stage) {
                    println!("{}", view.status_line());
                }
            }
        }
        self.last_stage = Some(view.stage);
    }

    fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

pub fn bar_position(view: &AppViewModel) -> u64 {
    view.progress_percent.clamp(0.0, 100.0).round() as u64
}

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, Keybindings, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::warn;

use crate::config::ReplConfig;
use crate::error::{QlError, Result};

use super::ReplContext;
use super::completer::QlCompleter;
use super::highlighter::SyntaxHighlighter;
use super::prompt::QlPrompt;

const COMPLETION_MENU: &str = "completion_menu";

/// Line editor of the interactive shell
pub struct ReplEngine {
    editor: Reedline,
    prompt: QlPrompt,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `context` - Evaluation context; its engine and state are shared with the editor
    /// * `config` - History and highlighting settings
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(context: &ReplContext, config: &ReplConfig) -> Result<Self> {
        let state = context.state().clone();
        let completer = QlCompleter::new(context.engine().clone(), state.clone());
        let highlighter = SyntaxHighlighter::new(state.clone(), config.highlighting);
        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let editor = Reedline::create()
            .with_history(Box::new(Self::history(config)?))
            .with_completer(Box::new(completer))
            .with_highlighter(Box::new(highlighter))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(Self::keybindings())));

        Ok(Self {
            editor,
            prompt: QlPrompt::new(state),
        })
    }

    /// File-backed history, in memory when the file cannot be opened
    fn history(config: &ReplConfig) -> Result<FileBackedHistory> {
        match FileBackedHistory::with_file(config.history_size, config.history_file.clone()) {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!(
                    path = %config.history_file.display(),
                    error = %e,
                    "History file unavailable, keeping history in memory"
                );
                FileBackedHistory::new(config.history_size)
                    .map_err(|e| QlError::Generic(format!("History error: {}", e)))
            }
        }
    }

    /// Emacs bindings with Tab opening and cycling the completion menu
    fn keybindings() -> Keybindings {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );
        keybindings
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, `None` on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => Ok(Some(String::new())),
            Signal::CtrlD => Ok(None),
            #[allow(unreachable_patterns)]
            _ => Ok(Some(String::new())),
        }
    }
}

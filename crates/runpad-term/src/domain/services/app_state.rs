use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::AssistantPrompt;
use crate::domain::models::AssistantResponse;
use crate::domain::models::Author;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutionResponse;
use crate::domain::models::LanguageDescriptor;
use crate::domain::models::Languages;
use crate::domain::models::Message;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

const PAGE_SCROLL: u16 = 10;

pub struct AppStateProps {
    pub language_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Source,
    Stdin,
}

/// Everything the screen shows. Only the UI loop mutates it; request workers report
/// back through events that are applied with the `handle_*` methods.
///
/// Each outbound request carries a generation number. Starting a new request or
/// switching language bumps the counter, and a response whose generation is not the
/// current one is dropped, so the most recent request always wins.
pub struct AppState {
    pub language: &'static LanguageDescriptor,
    pub source_text: String,
    pub stdin_text: String,
    pub output: Message,
    pub exit_code: Option<i64>,
    pub is_executing: bool,
    pub execution_generation: u64,
    pub assistant_prompt: String,
    pub assistant_reply: Message,
    pub is_assistant_busy: bool,
    pub is_assistant_dialog_open: bool,
    pub assistant_generation: u64,
    pub focus: Focus,
    pub output_scroll: u16,
}

impl AppState {
    pub fn new(props: AppStateProps) -> Result<AppState> {
        let language = Languages::find_by_api_id(&props.language_id)?;

        return Ok(AppState {
            language,
            source_text: language.boilerplate.to_string(),
            stdin_text: "".to_string(),
            output: Message::new(Author::Runner, ""),
            exit_code: None,
            is_executing: false,
            execution_generation: 0,
            assistant_prompt: "".to_string(),
            assistant_reply: Message::new(Author::Model, ""),
            is_assistant_busy: false,
            is_assistant_dialog_open: false,
            assistant_generation: 0,
            focus: Focus::Source,
            output_scroll: 0,
        });
    }

    /// Resets the editor to the language's boilerplate and clears the output. A run that
    /// is still in flight is abandoned.
    pub fn select_language(
        &mut self,
        language: &'static LanguageDescriptor,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if self.is_executing {
            tx.send(Action::ExecutionAbort)?;
        }

        self.language = language;
        self.source_text = language.boilerplate.to_string();
        self.execution_generation += 1;
        self.is_executing = false;
        self.set_output(Message::new(Author::Runner, ""), None);

        tracing::debug!(language = language.api_id, "language selected");

        return Ok(());
    }

    pub fn select_language_by_id(
        &mut self,
        api_id: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let language = Languages::find_by_api_id(api_id)?;
        return self.select_language(language, tx);
    }

    pub fn select_next_language(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        return self.select_language(Languages::next_after(self.language), tx);
    }

    pub fn edit_source(&mut self, text: &str) {
        self.source_text = text.to_string();
    }

    pub fn edit_stdin(&mut self, text: &str) {
        self.stdin_text = text.to_string();
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Source => Focus::Stdin,
            Focus::Stdin => Focus::Source,
        };
    }

    pub fn trigger_run(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.execution_generation += 1;
        self.is_executing = true;

        let mut request = ExecutionRequest::new(self.language, &self.source_text, &self.stdin_text);
        request.generation = self.execution_generation;
        tx.send(Action::Execute(request))?;

        return Ok(());
    }

    pub fn cancel_run(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if !self.is_executing {
            return Ok(());
        }

        tx.send(Action::ExecutionAbort)?;
        self.execution_generation += 1;
        self.is_executing = false;
        self.set_output(Message::new(Author::Runpad, "Execution cancelled."), None);

        return Ok(());
    }

    pub fn handle_execution_response(&mut self, response: ExecutionResponse) {
        if response.generation != self.execution_generation {
            tracing::debug!(
                generation = response.generation,
                current = self.execution_generation,
                "discarding stale execution response"
            );
            return;
        }

        self.is_executing = false;
        self.set_output(response.message, response.exit_code);
    }

    pub fn open_assistant(&mut self) {
        self.is_assistant_dialog_open = true;
    }

    /// Hides the dialog. An outstanding prompt keeps running and its reply is shown the
    /// next time the dialog opens.
    pub fn close_assistant(&mut self) {
        self.is_assistant_dialog_open = false;
    }

    pub fn toggle_assistant(&mut self) {
        if self.is_assistant_dialog_open {
            self.close_assistant();
        } else {
            self.open_assistant();
        }
    }

    pub fn edit_assistant_prompt(&mut self, text: &str) {
        self.assistant_prompt = text.to_string();
    }

    pub fn trigger_ask(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.assistant_generation += 1;
        self.is_assistant_busy = true;

        let mut prompt = AssistantPrompt::new(&self.assistant_prompt);
        prompt.generation = self.assistant_generation;
        tx.send(Action::Ask(prompt))?;

        self.assistant_prompt.clear();

        return Ok(());
    }

    pub fn handle_assistant_response(&mut self, response: AssistantResponse) {
        if response.generation != self.assistant_generation {
            tracing::debug!(
                generation = response.generation,
                current = self.assistant_generation,
                "discarding stale assistant response"
            );
            return;
        }

        self.is_assistant_busy = false;
        self.assistant_reply = response.message;
    }

    /// Replaces the editor contents with the last code block of the assistant reply.
    /// Returns false when the reply has no code block.
    pub fn accept_reply_codeblock(&mut self) -> bool {
        if self.assistant_reply.is_error() {
            return false;
        }

        if let Some(codeblock) = self.assistant_reply.codeblocks().pop() {
            self.source_text = codeblock;
            self.close_assistant();
            return true;
        }

        return false;
    }

    pub fn scroll_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.output_scroll = self.output_scroll.saturating_add(1);
    }

    pub fn scroll_page_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(PAGE_SCROLL);
    }

    pub fn scroll_page_down(&mut self) {
        self.output_scroll = self.output_scroll.saturating_add(PAGE_SCROLL);
    }

    fn set_output(&mut self, output: Message, exit_code: Option<i64>) {
        self.output = output;
        self.exit_code = exit_code;
        self.output_scroll = 0;
    }
}


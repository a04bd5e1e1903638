use super::AssistantPrompt;
use super::ExecutionRequest;

#[derive(Debug, Clone)]
pub enum Action {
    Execute(ExecutionRequest),
    ExecutionAbort,
    Ask(AssistantPrompt),
}

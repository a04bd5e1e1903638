use tui_textarea::Input;

use super::AssistantResponse;
use super::ExecutionResponse;

#[derive(Debug)]
pub enum Event {
    ExecutionResponse(ExecutionResponse),
    AssistantResponse(AssistantResponse),
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardCTRLR,
    KeyboardEnter,
    KeyboardEsc,
    KeyboardF2,
    KeyboardF3,
    KeyboardF4,
    KeyboardF6,
    KeyboardPaste(String),
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}

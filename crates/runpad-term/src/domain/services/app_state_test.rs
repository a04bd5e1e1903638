use anyhow::Result;
use tokio::sync::mpsc;

use super::*;
use crate::domain::models::Action;
use crate::domain::models::AssistantPrompt;
use crate::domain::models::AssistantResponse;
use crate::domain::models::Author;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutionResponse;
use crate::domain::models::Languages;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::services::AssistantRequester;
use crate::domain::services::ExecutionRequester;
use crate::infrastructure::clients::gemini::Gemini;
use crate::infrastructure::clients::piston::Piston;

fn new_state() -> Result<(
    AppState,
    mpsc::UnboundedSender<Action>,
    mpsc::UnboundedReceiver<Action>,
)> {
    let (tx, rx) = mpsc::unbounded_channel::<Action>();
    let app_state = AppState::new(AppStateProps {
        language_id: "javascript".to_string(),
    })?;

    Ok((app_state, tx, rx))
}

fn next_execute(rx: &mut mpsc::UnboundedReceiver<Action>) -> ExecutionRequest {
    match rx.try_recv() {
        Ok(Action::Execute(request)) => request,
        other => panic!("expected Action::Execute, got {other:?}"),
    }
}

fn next_ask(rx: &mut mpsc::UnboundedReceiver<Action>) -> AssistantPrompt {
    match rx.try_recv() {
        Ok(Action::Ask(prompt)) => prompt,
        other => panic!("expected Action::Ask, got {other:?}"),
    }
}

fn response(generation: u64, text: &str) -> ExecutionResponse {
    ExecutionResponse {
        generation,
        message: Message::new(Author::Runner, text),
        exit_code: Some(0),
    }
}

#[test]
fn it_starts_with_boilerplate() -> Result<()> {
    let (app_state, _tx, _rx) = new_state()?;

    assert_eq!(app_state.language.api_id, "javascript");
    assert_eq!(app_state.source_text, "console.log('Hello, JavaScript!');");
    assert!(app_state.output.is_empty());
    assert!(!app_state.is_executing);
    assert!(!app_state.is_assistant_busy);
    assert!(!app_state.is_assistant_dialog_open);

    Ok(())
}

#[test]
fn it_rejects_unknown_initial_language() {
    let res = AppState::new(AppStateProps {
        language_id: "brainfuck".to_string(),
    });

    assert_eq!(
        res.err().unwrap().to_string(),
        "Unknown language: brainfuck"
    );
}

#[test]
fn it_resets_source_and_output_for_every_language() -> Result<()> {
    let (mut app_state, tx, _rx) = new_state()?;

    for language in Languages::all() {
        app_state.edit_source("something else");
        app_state.handle_execution_response(response(app_state.execution_generation, "old"));

        app_state.select_language(language, &tx)?;

        assert_eq!(app_state.language, language);
        assert_eq!(app_state.source_text, language.boilerplate);
        assert_eq!(app_state.output.text, "");
        assert_eq!(app_state.exit_code, None);
    }

    Ok(())
}

#[test]
fn it_keeps_state_on_unknown_language_id() -> Result<()> {
    let (mut app_state, tx, _rx) = new_state()?;
    app_state.edit_source("let x = 1;");

    let err = app_state.select_language_by_id("cobol", &tx).unwrap_err();

    assert_eq!(err.to_string(), "Unknown language: cobol");
    assert_eq!(app_state.language.api_id, "javascript");
    assert_eq!(app_state.source_text, "let x = 1;");

    Ok(())
}

#[test]
fn it_keeps_stdin_across_language_changes() -> Result<()> {
    let (mut app_state, tx, _rx) = new_state()?;
    app_state.edit_stdin("42\n");

    app_state.select_next_language(&tx)?;

    assert_eq!(app_state.language.api_id, "python");
    assert_eq!(app_state.stdin_text, "42\n");

    Ok(())
}

#[test]
fn it_sends_current_editor_contents_on_run() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;
    app_state.select_language_by_id("python", &tx)?;
    app_state.edit_source("print(input())");
    app_state.edit_stdin("hi");

    app_state.trigger_run(&tx)?;
    let request = next_execute(&mut rx);

    assert!(app_state.is_executing);
    assert_eq!(request.generation, app_state.execution_generation);
    assert_eq!(request.language.api_id, "python");
    assert_eq!(request.source, "print(input())");
    assert_eq!(request.stdin, "hi");

    Ok(())
}

#[tokio::test]
async fn it_displays_run_output() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/execute")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "language": "javascript",
            "files": [{ "name": "index.js", "content": "console.log('Hello, JavaScript!');" }],
            "stdin": ""
        })))
        .with_status(200)
        .with_body(r#"{"run":{"output":"Hello, JavaScript!\n"}}"#)
        .create_async()
        .await;

    let requester = ExecutionRequester::new(Box::new(Piston::new(&server.url())));
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    let res = requester.execute(&next_execute(&mut rx)).await;
    app_state.handle_execution_response(res);

    assert_eq!(app_state.output.text, "Hello, JavaScript!\n");
    assert_eq!(app_state.output.message_type, MessageType::Normal);
    assert!(!app_state.is_executing);

    Ok(())
}

#[tokio::test]
async fn it_displays_service_error() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/execute")
        .with_status(400)
        .with_body(r#"{"message":"Unsupported language"}"#)
        .create_async()
        .await;

    let requester = ExecutionRequester::new(Box::new(Piston::new(&server.url())));
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    let res = requester.execute(&next_execute(&mut rx)).await;
    app_state.handle_execution_response(res);

    assert_eq!(app_state.output.text, "Error: Unsupported language");
    assert!(app_state.output.is_error());
    assert!(!app_state.is_executing);

    Ok(())
}

#[tokio::test]
async fn it_displays_transport_error() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let requester = ExecutionRequester::new(Box::new(Piston::new(&format!("http://{addr}"))));
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    assert!(app_state.is_executing);
    let res = requester.execute(&next_execute(&mut rx)).await;
    app_state.handle_execution_response(res);

    assert!(app_state.output.text.starts_with("Error: "));
    assert!(app_state.output.text.len() > "Error: ".len());
    assert!(!app_state.is_executing);

    Ok(())
}

#[test]
fn it_applies_only_the_latest_run() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    let first = next_execute(&mut rx);
    app_state.trigger_run(&tx)?;
    let second = next_execute(&mut rx);

    // Second finishes first, the first one straggles in afterwards.
    app_state.handle_execution_response(response(second.generation, "second"));
    assert!(!app_state.is_executing);
    app_state.handle_execution_response(response(first.generation, "first"));

    assert_eq!(app_state.output.text, "second");
    assert!(!app_state.is_executing);

    Ok(())
}

#[test]
fn it_stays_busy_until_the_latest_run_completes() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    let first = next_execute(&mut rx);
    app_state.trigger_run(&tx)?;
    let second = next_execute(&mut rx);

    app_state.handle_execution_response(response(first.generation, "first"));
    assert!(app_state.is_executing);
    assert_eq!(app_state.output.text, "");

    app_state.handle_execution_response(response(second.generation, "second"));
    assert!(!app_state.is_executing);
    assert_eq!(app_state.output.text, "second");

    Ok(())
}

#[test]
fn it_discards_run_started_before_language_change() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    let request = next_execute(&mut rx);
    app_state.select_language_by_id("java", &tx)?;

    assert!(matches!(rx.try_recv(), Ok(Action::ExecutionAbort)));
    assert!(!app_state.is_executing);

    app_state.handle_execution_response(response(request.generation, "Hello, JavaScript!\n"));

    assert_eq!(app_state.output.text, "");
    assert_eq!(app_state.source_text, app_state.language.boilerplate);

    Ok(())
}

#[test]
fn it_cancels_a_run() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.cancel_run(&tx)?;
    assert!(rx.try_recv().is_err());

    app_state.trigger_run(&tx)?;
    let request = next_execute(&mut rx);
    app_state.cancel_run(&tx)?;

    assert!(matches!(rx.try_recv(), Ok(Action::ExecutionAbort)));
    assert!(!app_state.is_executing);
    assert_eq!(app_state.output.text, "Execution cancelled.");

    app_state.handle_execution_response(response(request.generation, "late"));
    assert_eq!(app_state.output.text, "Execution cancelled.");

    Ok(())
}

#[tokio::test]
async fn it_displays_assistant_reply() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"4"}]}}]}"#)
        .create_async()
        .await;

    let requester = AssistantRequester::new(Box::new(Gemini::with_base_url(
        "test-key".to_string(),
        "gemini-1.5-flash".to_string(),
        server.url(),
    )));
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.open_assistant();
    app_state.edit_assistant_prompt("2+2");
    app_state.trigger_ask(&tx)?;

    assert_eq!(app_state.assistant_prompt, "");
    assert!(app_state.is_assistant_busy);

    let prompt = next_ask(&mut rx);
    assert_eq!(prompt.text, "2+2");

    let res = requester.ask(&prompt).await;
    app_state.handle_assistant_response(res);

    assert_eq!(app_state.assistant_reply.text, "4");
    assert!(!app_state.assistant_reply.is_error());
    assert!(!app_state.is_assistant_busy);

    Ok(())
}

#[test]
fn it_shows_assistant_failure() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;
    app_state.assistant_reply = Message::new(Author::Model, "previous answer");

    app_state.edit_assistant_prompt("hello");
    app_state.trigger_ask(&tx)?;
    let prompt = next_ask(&mut rx);

    app_state.handle_assistant_response(AssistantResponse {
        generation: prompt.generation,
        message: Message::error(Author::Model, "quota exceeded"),
    });

    assert_eq!(app_state.assistant_reply.text, "Error: quota exceeded");
    assert!(app_state.assistant_reply.is_error());
    assert!(!app_state.is_assistant_busy);

    Ok(())
}

#[test]
fn it_discards_stale_assistant_reply() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.edit_assistant_prompt("first");
    app_state.trigger_ask(&tx)?;
    let first = next_ask(&mut rx);
    app_state.edit_assistant_prompt("second");
    app_state.trigger_ask(&tx)?;
    let second = next_ask(&mut rx);

    app_state.handle_assistant_response(AssistantResponse {
        generation: second.generation,
        message: Message::new(Author::Model, "second reply"),
    });
    app_state.handle_assistant_response(AssistantResponse {
        generation: first.generation,
        message: Message::new(Author::Model, "first reply"),
    });

    assert_eq!(app_state.assistant_reply.text, "second reply");

    Ok(())
}

#[test]
fn it_keeps_asking_after_dialog_closes() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.toggle_assistant();
    assert!(app_state.is_assistant_dialog_open);
    app_state.edit_assistant_prompt("explain");
    app_state.trigger_ask(&tx)?;
    app_state.toggle_assistant();

    assert!(!app_state.is_assistant_dialog_open);
    assert!(app_state.is_assistant_busy);

    let prompt = next_ask(&mut rx);
    app_state.handle_assistant_response(AssistantResponse {
        generation: prompt.generation,
        message: Message::new(Author::Model, "done"),
    });

    assert_eq!(app_state.assistant_reply.text, "done");
    assert!(!app_state.is_assistant_busy);

    Ok(())
}

#[test]
fn it_runs_and_asks_independently() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.trigger_run(&tx)?;
    let request = next_execute(&mut rx);
    app_state.edit_assistant_prompt("why");
    app_state.trigger_ask(&tx)?;
    let prompt = next_ask(&mut rx);

    app_state.handle_assistant_response(AssistantResponse {
        generation: prompt.generation,
        message: Message::new(Author::Model, "because"),
    });
    assert!(app_state.is_executing);

    app_state.handle_execution_response(response(request.generation, "ok"));
    assert_eq!(app_state.output.text, "ok");
    assert_eq!(app_state.assistant_reply.text, "because");

    Ok(())
}

#[test]
fn it_accepts_reply_codeblock_into_editor() -> Result<()> {
    let (mut app_state, _tx, _rx) = new_state()?;
    app_state.open_assistant();

    assert!(!app_state.accept_reply_codeblock());

    app_state.assistant_reply = Message::new(
        Author::Model,
        "Try this:\n```js\nconsole.log(2 + 2);\n```\n",
    );
    assert!(app_state.accept_reply_codeblock());
    assert_eq!(app_state.source_text, "console.log(2 + 2);");
    assert!(!app_state.is_assistant_dialog_open);

    Ok(())
}

#[test]
fn it_resets_scroll_on_new_output() -> Result<()> {
    let (mut app_state, tx, mut rx) = new_state()?;

    app_state.scroll_page_down();
    app_state.scroll_down();
    assert_eq!(app_state.output_scroll, 11);
    app_state.scroll_page_up();
    app_state.scroll_page_up();
    assert_eq!(app_state.output_scroll, 0);

    app_state.scroll_down();
    app_state.trigger_run(&tx)?;
    let request = next_execute(&mut rx);
    app_state.handle_execution_response(response(request.generation, "fresh"));
    assert_eq!(app_state.output_scroll, 0);

    Ok(())
}

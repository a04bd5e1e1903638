use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::AssistantRequester;
use super::ExecutionRequester;
use crate::domain::models::Action;
use crate::domain::models::AssistantClientBox;
use crate::domain::models::Event;
use crate::domain::models::ExecutionClientBox;

pub struct ActionsService {}

impl ActionsService {
    /// Runs each request on its own task. A new `Execute` aborts the previous execution
    /// task and a new `Ask` aborts the previous assistant task, so at most one of each
    /// is outstanding.
    pub async fn start(
        execution_client: ExecutionClientBox,
        assistant_client: AssistantClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let execution = Arc::new(ExecutionRequester::new(execution_client));
        let assistant = Arc::new(AssistantRequester::new(assistant_client));

        let mut execution_worker: Option<JoinHandle<Result<()>>> = None;
        let mut assistant_worker: Option<JoinHandle<Result<()>>> = None;

        while let Some(action) = rx.recv().await {
            let worker_event_tx = event_tx.clone();
            match action {
                Action::Execute(request) => {
                    if let Some(worker) = execution_worker.take() {
                        worker.abort();
                    }

                    let requester = execution.clone();
                    execution_worker = Some(tokio::spawn(async move {
                        let response = requester.execute(&request).await;
                        worker_event_tx.send(Event::ExecutionResponse(response))?;
                        Ok(())
                    }));
                }
                Action::ExecutionAbort => {
                    if let Some(worker) = execution_worker.take() {
                        tracing::debug!("aborting in-flight execution");
                        worker.abort();
                    }
                }
                Action::Ask(prompt) => {
                    if let Some(worker) = assistant_worker.take() {
                        worker.abort();
                    }

                    let requester = assistant.clone();
                    assistant_worker = Some(tokio::spawn(async move {
                        let response = requester.ask(&prompt).await;
                        worker_event_tx.send(Event::AssistantResponse(response))?;
                        Ok(())
                    }));
                }
            }
        }

        return Ok(());
    }
}

use crate::domain::models::Author;
use crate::domain::models::ExecutionClientBox;
use crate::domain::models::ExecutionError;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutionResponse;
use crate::domain::models::Message;
use crate::domain::models::Runtime;

/// Sends editor contents to the execution service. Failures come back as `Error: `
/// messages rather than as `Err`, so the caller only ever sees something to display.
pub struct ExecutionRequester {
    client: ExecutionClientBox,
}

impl ExecutionRequester {
    pub fn new(client: ExecutionClientBox) -> ExecutionRequester {
        return ExecutionRequester { client };
    }

    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResponse {
        tracing::debug!(
            executor = %self.client.name(),
            language = request.language.api_id,
            version = request.language.runtime_version,
            generation = request.generation,
            "sending execution request"
        );

        match self.client.execute(request).await {
            Ok(output) => {
                tracing::debug!(
                    generation = request.generation,
                    exit_code = ?output.exit_code,
                    signal = ?output.signal,
                    compiled = output.compile_output.is_some(),
                    "execution finished"
                );

                return ExecutionResponse {
                    generation: request.generation,
                    message: Message::new(Author::Runner, &output.output),
                    exit_code: output.exit_code,
                };
            }
            Err(err) => {
                tracing::error!(
                    executor = %self.client.name(),
                    generation = request.generation,
                    error = ?err,
                    "execution failed"
                );

                return ExecutionResponse {
                    generation: request.generation,
                    message: Message::error(Author::Runner, &err),
                    exit_code: None,
                };
            }
        }
    }

    pub async fn list_runtimes(&self) -> Result<Vec<Runtime>, ExecutionError> {
        return self.client.list_runtimes().await;
    }
}

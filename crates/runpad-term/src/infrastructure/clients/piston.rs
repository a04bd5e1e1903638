#[cfg(test)]
#[path = "piston_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::{Config, ConfigKey};
use crate::domain::models::ExecutionClient;
use crate::domain::models::ExecutionError;
use crate::domain::models::ExecutionOutput;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutorName;
use crate::domain::models::Runtime;

#[derive(Serialize)]
struct PistonFile<'a> {
    name: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct PistonExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<PistonFile<'a>>,
    stdin: &'a str,
}

#[derive(Deserialize)]
struct PistonStage {
    output: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    signal: Option<String>,
}

#[derive(Deserialize)]
struct PistonCompileStage {
    #[serde(default)]
    output: String,
}

#[derive(Deserialize)]
struct PistonExecuteResponse {
    run: PistonStage,
    #[serde(default)]
    compile: Option<PistonCompileStage>,
}

#[derive(Deserialize)]
struct PistonErrorResponse {
    message: String,
}

/// Client for the Piston code execution API.
pub struct Piston {
    url: String,
    client: reqwest::Client,
}

impl Default for Piston {
    fn default() -> Piston {
        Piston::new(&Config::get(ConfigKey::ExecutionUrl))
    }
}

impl Piston {
    pub fn new(url: &str) -> Piston {
        Piston {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn error_from_response(response: reqwest::Response) -> ExecutionError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<PistonErrorResponse>(&body) {
            Ok(err) if !err.message.is_empty() => err.message,
            _ => format!("Request failed with status code {status}"),
        };

        tracing::error!(status = status, body = %body, "Piston request failed");
        ExecutionError::Service { status, message }
    }
}

#[async_trait]
impl ExecutionClient for Piston {
    fn name(&self) -> ExecutorName {
        ExecutorName::Piston
    }

    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutput, ExecutionError> {
        let payload = PistonExecuteRequest {
            language: request.language.api_id,
            version: request.language.runtime_version,
            files: vec![PistonFile {
                name: request.language.output_filename,
                content: &request.source,
            }],
            stdin: &request.stdin,
        };

        let response = self
            .client
            .post(format!("{}/execute", self.url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Piston::error_from_response(response).await);
        }

        let body = response.json::<PistonExecuteResponse>().await?;

        Ok(ExecutionOutput {
            output: body.run.output,
            exit_code: body.run.code,
            signal: body.run.signal,
            compile_output: body.compile.map(|e| e.output),
        })
    }

    async fn list_runtimes(&self) -> Result<Vec<Runtime>, ExecutionError> {
        let response = self
            .client
            .get(format!("{}/runtimes", self.url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Piston::error_from_response(response).await);
        }

        Ok(response.json::<Vec<Runtime>>().await?)
    }
}

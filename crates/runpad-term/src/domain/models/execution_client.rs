use async_trait::async_trait;

use crate::domain::models::ExecutionError;
use crate::domain::models::ExecutionOutput;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutorName;
use crate::domain::models::Runtime;

#[async_trait]
pub trait ExecutionClient: Send + Sync {
    fn name(&self) -> ExecutorName;
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutput, ExecutionError>;
    async fn list_runtimes(&self) -> Result<Vec<Runtime>, ExecutionError>;
}

pub type ExecutionClientBox = Box<dyn ExecutionClient>;

use std::future::Future;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::common::entities::app_errors::CoreError;

/// A resolved agent endpoint: which agent to talk to and through which
/// execution alias.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentHandle {
    pub agent_id: String,
    pub alias: String,
}

/// Port for the managed recipe agent.
///
/// `invoke` returns the response as a stream of chunks; callers concatenate
/// them into the full completion.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeAgentClient: Send + Sync {
    /// Checks the agent is ready and picks an execution alias, preferring a
    /// live one.
    fn resolve_agent(&self) -> impl Future<Output = Result<AgentHandle, CoreError>> + Send;

    fn invoke(
        &self,
        handle: AgentHandle,
        session_id: String,
        input: String,
    ) -> impl Future<Output = Result<BoxStream<'static, Result<Bytes, CoreError>>, CoreError>> + Send;
}

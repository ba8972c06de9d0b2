//! Decision oracle backed by a language model

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::Result;
use crate::decision::oracle::{DecisionOracle, DecisionRequest, DecisionResponse};
use crate::llm::client::LlmClient;
use crate::llm::context::ColonyContext;
use crate::llm::parser::request_decision;

pub struct LlmOracle {
    client: LlmClient,
    threat_radius: u32,
}

impl LlmOracle {
    pub fn new(client: LlmClient, threat_radius: u32) -> Self {
        Self {
            client,
            threat_radius,
        }
    }

    /// Oracle configured from LLM_API_KEY / LLM_API_URL / LLM_MODEL
    pub fn from_env(threat_radius: u32) -> Result<Self> {
        Ok(Self::new(LlmClient::from_env()?, threat_radius))
    }
}

#[async_trait]
impl DecisionOracle for LlmOracle {
    async fn decide(&self, request: DecisionRequest) -> Result<DecisionResponse> {
        let context = ColonyContext::from_request(&request, self.threat_radius)?;
        debug!(survivor = %context.name, model = self.client.model(), "Asking model");
        request_decision(&self.client, &context).await
    }
}

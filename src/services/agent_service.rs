//! Agent management service
//!
//! Shared by the admin HTTP API and the CLI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{Result, WalinkError};
use crate::services::roles::{Capability, role_by_name};
use crate::storage::{Agent, AgentDraft, SeaOrmStorage};

/// 创建/更新推广员的输入
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentInput {
    pub display_name: String,
    pub email: String,
    pub referral_code: String,
    pub phone_number: String,
}

impl AgentInput {
    pub fn into_draft(self) -> Result<AgentDraft> {
        let required = [
            ("display_name", &self.display_name),
            ("email", &self.email),
            ("referral_code", &self.referral_code),
            ("phone_number", &self.phone_number),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(WalinkError::validation(format!("{} is required", name)));
        }

        Ok(AgentDraft {
            display_name: self.display_name.trim().to_string(),
            email: self.email.trim().to_string(),
            referral_code: self.referral_code.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

/// 推广员列表行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRow {
    pub id: i64,
    pub display_name: String,
    pub contact: Contact,
    /// 推荐码
    pub affiliate: String,
    pub role: String,
    pub capabilities: Vec<Capability>,
}

impl From<&Agent> for AgentRow {
    fn from(a: &Agent) -> Self {
        let capabilities = role_by_name(&a.role)
            .map(|r| r.capabilities.to_vec())
            .unwrap_or_default();
        Self {
            id: a.id,
            display_name: a.display_name.clone(),
            contact: Contact {
                phone: a.phone_number.clone(),
                email: a.email.clone(),
            },
            affiliate: a.referral_code.clone(),
            role: a.role.clone(),
            capabilities,
        }
    }
}

pub struct AgentService {
    storage: Arc<SeaOrmStorage>,
}

impl AgentService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 推荐码重复时只记警告，不拒绝
    async fn warn_on_shared_code(&self, code: &str, own_id: Option<i64>) -> Result<()> {
        if let Some(existing) = self.storage.find_agent_by_referral_code(code).await?
            && Some(existing.id) != own_id
        {
            warn!(
                "Referral code '{}' is already used by agent #{}; attribution for it is ambiguous",
                code, existing.id
            );
        }
        Ok(())
    }

    pub async fn create_agent(&self, input: AgentInput) -> Result<Agent> {
        let draft = input.into_draft()?;
        self.warn_on_shared_code(&draft.referral_code, None).await?;
        let agent = self.storage.insert_agent(&draft).await?;
        info!(
            "AgentService: created #{} with code '{}'",
            agent.id, agent.referral_code
        );
        Ok(agent)
    }

    pub async fn update_agent(&self, id: i64, input: AgentInput) -> Result<Agent> {
        let draft = input.into_draft()?;
        self.warn_on_shared_code(&draft.referral_code, Some(id)).await?;
        self.storage.update_agent(id, &draft).await
    }

    pub async fn delete_agent(&self, id: i64) -> Result<()> {
        self.storage.delete_agent(id).await
    }

    pub async fn get_agent(&self, id: i64) -> Result<AgentRow> {
        self.storage
            .get_agent(id)
            .await?
            .map(|a| AgentRow::from(&a))
            .ok_or_else(|| WalinkError::not_found(format!("Agent #{} not found", id)))
    }

    pub async fn list_agents(&self) -> Result<Vec<AgentRow>> {
        let agents = self.storage.list_agents().await?;
        Ok(agents.iter().map(AgentRow::from).collect())
    }
}

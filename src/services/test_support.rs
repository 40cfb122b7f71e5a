//! 单元测试用的内存存储

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::{Result, WalinkError};
use crate::storage::models::AGENT_ROLE;
use crate::storage::{Agent, Campaign, EntryStore, FormEntry, IdentityStore, NewFormEntry};

pub fn agent(id: i64, referral_code: &str, phone: &str) -> Agent {
    Agent {
        id,
        display_name: format!("Agent {}", referral_code),
        email: format!("{}@example.com", referral_code),
        referral_code: referral_code.to_string(),
        phone_number: phone.to_string(),
        role: AGENT_ROLE.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn campaign(id: i64, slug: &str, phone: &str, message: &str) -> Campaign {
    Campaign {
        id,
        title: format!("Campaign {}", slug),
        slug: slug.to_string(),
        admin_phone: phone.to_string(),
        whatsapp_message: message.to_string(),
        zapier_link: None,
        published: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    agents: Vec<Agent>,
    campaigns: Vec<Campaign>,
    entries: Mutex<Vec<FormEntry>>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_campaign(mut self, campaign: Campaign) -> Self {
        self.campaigns.push(campaign);
        self
    }

    /// 之后所有查询都返回数据库错误
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn saved_entries(&self) -> Vec<FormEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(WalinkError::database_connection("store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_agent_by_referral_code(&self, code: &str) -> Result<Option<Agent>> {
        self.check()?;
        Ok(self.agents.iter().find(|a| a.referral_code == code).cloned())
    }

    async fn get_agent(&self, id: i64) -> Result<Option<Agent>> {
        self.check()?;
        Ok(self.agents.iter().find(|a| a.id == id).cloned())
    }

    async fn get_campaign(&self, id: i64) -> Result<Option<Campaign>> {
        self.check()?;
        Ok(self.campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn find_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>> {
        self.check()?;
        Ok(self.campaigns.iter().find(|c| c.slug == slug).cloned())
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn save_entry(&self, entry: NewFormEntry) -> Result<FormEntry> {
        self.check()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| WalinkError::database_operation(e.to_string()))?;
        let saved = FormEntry {
            id: entries.len() as i64 + 1,
            form_id: entry.form_id,
            campaign_id: entry.campaign_id,
            agent_id: entry.agent_id,
            fields: entry.fields,
            created_at: Utc::now(),
        };
        entries.push(saved.clone());
        Ok(saved)
    }
}

//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::{Agent, Campaign};

/// 统一响应包装 `{code, message, data}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 活动详情
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CampaignResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub admin_phone: String,
    pub whatsapp_message: String,
    pub zapier_link: Option<String>,
    pub published: bool,
    /// 活动公开页面地址
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CampaignResponse {
    pub fn new(campaign: Campaign, url: String) -> Self {
        Self {
            id: campaign.id,
            title: campaign.title,
            slug: campaign.slug,
            admin_phone: campaign.admin_phone,
            whatsapp_message: campaign.whatsapp_message,
            zapier_link: campaign.zapier_link,
            published: campaign.published,
            url,
            created_at: campaign.created_at.to_rfc3339(),
            updated_at: campaign.updated_at.to_rfc3339(),
        }
    }
}

/// 推广员详情（创建/更新后返回）
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AgentResponse {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub referral_code: String,
    pub phone_number: String,
    pub role: String,
}

impl From<Agent> for AgentResponse {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id,
            display_name: agent.display_name,
            email: agent.email,
            referral_code: agent.referral_code,
            phone_number: agent.phone_number,
            role: agent.role,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct EntriesQuery {
    pub campaign_id: Option<i64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Clone, Debug)]
pub struct DeletedResponse {
    pub id: i64,
}

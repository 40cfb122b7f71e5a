use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 营销活动
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// 默认 WhatsApp 号码（国际格式，不含符号）
    pub admin_phone: String,
    /// WhatsApp 预填消息模板，原样使用
    pub whatsapp_message: String,
    pub zapier_link: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 推广员表中所有记录的角色名
pub const AGENT_ROLE: &str = "agent";

/// 推广员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub referral_code: String,
    pub phone_number: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建/更新活动时的可写字段
#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
    pub title: String,
    pub slug: String,
    pub admin_phone: String,
    pub whatsapp_message: String,
    pub zapier_link: Option<String>,
    pub published: bool,
}

/// 新建/更新推广员时的可写字段
#[derive(Debug, Clone, Default)]
pub struct AgentDraft {
    pub display_name: String,
    pub email: String,
    pub referral_code: String,
    pub phone_number: String,
}

/// 表单字段（有序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 已保存的表单提交记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub id: i64,
    pub form_id: String,
    pub campaign_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
}

/// 待写入的表单提交记录
#[derive(Debug, Clone)]
pub struct NewFormEntry {
    pub form_id: String,
    pub campaign_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub fields: Vec<FormField>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}

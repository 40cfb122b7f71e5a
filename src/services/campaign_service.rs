//! Campaign management service
//!
//! Shared by the admin HTTP API and the CLI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::StaticConfig;
use crate::errors::{Result, WalinkError};
use crate::services::form_bridge::campaign_page_url;
use crate::storage::{Campaign, CampaignDraft, SeaOrmStorage};
use crate::utils::slugify;
use crate::utils::url_validator::validate_absolute_url;

/// 拼接活动页与推荐链接所需的站点参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignLinks {
    pub base_url: String,
    pub campaign_prefix: String,
    pub ref_param: String,
}

impl CampaignLinks {
    pub fn from_config(config: &StaticConfig) -> Self {
        Self {
            base_url: config.site.base_url.clone(),
            campaign_prefix: config.routes.campaign_prefix.clone(),
            ref_param: config.attribution.ref_param.clone(),
        }
    }

    pub fn campaign_url(&self, slug: &str) -> String {
        campaign_page_url(&self.base_url, &self.campaign_prefix, slug)
    }

    /// `<活动页>?ref=<推荐码>`
    pub fn referral_url(&self, slug: &str, referral_code: &str) -> String {
        format!(
            "{}?{}={}",
            self.campaign_url(slug),
            self.ref_param,
            urlencoding::encode(referral_code)
        )
    }
}

/// 创建/更新活动的输入
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignInput {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub admin_phone: String,
    pub whatsapp_message: String,
    #[serde(default)]
    pub zapier_link: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl CampaignInput {
    /// 校验必填项并生成可写入的草稿
    pub fn into_draft(self) -> Result<CampaignDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(WalinkError::validation("title is required"));
        }
        let admin_phone = self.admin_phone.trim().to_string();
        if admin_phone.is_empty() {
            return Err(WalinkError::validation("admin_phone is required"));
        }
        if self.whatsapp_message.trim().is_empty() {
            return Err(WalinkError::validation("whatsapp_message is required"));
        }

        let zapier_link = match self.zapier_link.filter(|l| !l.trim().is_empty()) {
            Some(link) => {
                validate_absolute_url(&link)
                    .map_err(|e| WalinkError::validation(format!("zapier_link: {}", e)))?;
                Some(link.trim().to_string())
            }
            None => None,
        };

        let slug = match self.slug.filter(|s| !s.trim().is_empty()) {
            Some(s) => slugify(&s),
            None => slugify(&title),
        };
        if slug.is_empty() {
            return Err(WalinkError::validation(
                "slug cannot be derived from title, please provide one",
            ));
        }

        Ok(CampaignDraft {
            title,
            slug,
            admin_phone,
            // 消息模板原样保存
            whatsapp_message: self.whatsapp_message,
            zapier_link,
            published: self.published.unwrap_or(true),
        })
    }
}

/// 活动列表行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignRow {
    pub id: i64,
    pub title: String,
    pub default_number: String,
}

impl From<&Campaign> for CampaignRow {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            default_number: c.admin_phone.clone(),
        }
    }
}

/// 某个推广员在某个活动下的推荐链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralLink {
    pub agent_id: i64,
    pub display_name: String,
    pub referral_code: String,
    pub url: String,
}

pub struct CampaignService {
    storage: Arc<SeaOrmStorage>,
    links: CampaignLinks,
}

impl CampaignService {
    pub fn new(storage: Arc<SeaOrmStorage>, links: CampaignLinks) -> Self {
        Self { storage, links }
    }

    pub fn links(&self) -> &CampaignLinks {
        &self.links
    }

    pub async fn create_campaign(&self, input: CampaignInput) -> Result<Campaign> {
        let draft = input.into_draft()?;
        let campaign = self.storage.insert_campaign(&draft).await?;
        info!(
            "CampaignService: created #{} -> {}",
            campaign.id,
            self.links.campaign_url(&campaign.slug)
        );
        Ok(campaign)
    }

    pub async fn update_campaign(&self, id: i64, input: CampaignInput) -> Result<Campaign> {
        let draft = input.into_draft()?;
        self.storage.update_campaign(id, &draft).await
    }

    pub async fn delete_campaign(&self, id: i64) -> Result<()> {
        self.storage.delete_campaign(id).await
    }

    pub async fn get_campaign(&self, id: i64) -> Result<Campaign> {
        self.storage
            .get_campaign(id)
            .await?
            .ok_or_else(|| WalinkError::not_found(format!("Campaign #{} not found", id)))
    }

    pub async fn list_campaigns(&self) -> Result<Vec<CampaignRow>> {
        let campaigns = self.storage.list_campaigns().await?;
        Ok(campaigns.iter().map(CampaignRow::from).collect())
    }

    /// 活动下每个推广员的推荐链接
    pub async fn referral_links(&self, campaign_id: i64) -> Result<Vec<ReferralLink>> {
        let campaign = self.get_campaign(campaign_id).await?;
        let agents = self.storage.list_agents().await?;

        Ok(agents
            .into_iter()
            .map(|a| ReferralLink {
                url: self.links.referral_url(&campaign.slug, &a.referral_code),
                agent_id: a.id,
                display_name: a.display_name,
                referral_code: a.referral_code,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CampaignInput {
        CampaignInput {
            title: "Promo Ramadan".to_string(),
            admin_phone: "6281111111111".to_string(),
            whatsapp_message: "Hi, I'm interested ".to_string(),
            ..Default::default()
        }
    }

    fn links() -> CampaignLinks {
        CampaignLinks {
            base_url: "https://shop.example".to_string(),
            campaign_prefix: "/c".to_string(),
            ref_param: "ref".to_string(),
        }
    }

    #[test]
    fn test_into_draft_derives_slug_and_keeps_message() {
        let draft = input().into_draft().unwrap();
        assert_eq!(draft.slug, "promo-ramadan");
        assert_eq!(draft.whatsapp_message, "Hi, I'm interested ");
        assert!(draft.published);
        assert!(draft.zapier_link.is_none());
    }

    #[test]
    fn test_into_draft_requires_fields() {
        let mut i = input();
        i.title = "  ".to_string();
        assert!(matches!(i.into_draft(), Err(WalinkError::Validation(_))));

        let mut i = input();
        i.admin_phone = String::new();
        assert!(matches!(i.into_draft(), Err(WalinkError::Validation(_))));

        let mut i = input();
        i.whatsapp_message = String::new();
        assert!(matches!(i.into_draft(), Err(WalinkError::Validation(_))));
    }

    #[test]
    fn test_into_draft_validates_zapier_link() {
        let mut i = input();
        i.zapier_link = Some("not a url".to_string());
        assert!(matches!(i.into_draft(), Err(WalinkError::Validation(_))));

        let mut i = input();
        i.zapier_link = Some("https://hooks.zapier.com/hooks/catch/1/a/".to_string());
        assert!(i.into_draft().unwrap().zapier_link.is_some());

        let mut i = input();
        i.zapier_link = Some("".to_string());
        assert!(i.into_draft().unwrap().zapier_link.is_none());
    }

    #[test]
    fn test_explicit_slug_is_normalized() {
        let mut i = input();
        i.slug = Some("My Promo".to_string());
        assert_eq!(i.into_draft().unwrap().slug, "my-promo");
    }

    #[test]
    fn test_referral_url() {
        assert_eq!(
            links().referral_url("promo", "budi 01"),
            "https://shop.example/c/promo?ref=budi%2001"
        );
    }
}

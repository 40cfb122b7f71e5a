//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, SqlErr};
use tracing::info;

use super::converters::{
    agent_draft_to_active_model, campaign_draft_to_active_model, model_to_agent,
    model_to_campaign, model_to_form_entry, new_entry_to_active_model,
};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, WalinkError};
use crate::storage::models::{
    AGENT_ROLE, Agent, AgentDraft, Campaign, CampaignDraft, FormEntry, NewFormEntry,
};

use migration::entities::{agent, campaign, form_entry};

/// slug 唯一约束冲突转换为 Conflict，其余为数据库操作错误
fn map_campaign_write_err(slug: &str, context: &str, err: DbErr) -> WalinkError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        WalinkError::conflict(format!("活动 slug 已存在: {}", slug))
    } else {
        WalinkError::database_operation(format!("{}: {}", context, err))
    }
}

impl SeaOrmStorage {
    pub async fn insert_campaign(&self, draft: &CampaignDraft) -> Result<Campaign> {
        self.ensure_slug_available(&draft.slug, None).await?;

        let db = &self.db;
        let now = Utc::now();
        let model = retry::with_retry("insert_campaign", self.retry_config, || {
            campaign_draft_to_active_model(draft, None, now).insert(db)
        })
        .await
        .map_err(|e| map_campaign_write_err(&draft.slug, "创建活动失败", e))?;

        info!("Campaign created: #{} {}", model.id, model.slug);
        Ok(model_to_campaign(model))
    }

    pub async fn update_campaign(&self, id: i64, draft: &CampaignDraft) -> Result<Campaign> {
        if self.get_campaign(id).await?.is_none() {
            return Err(WalinkError::not_found(format!("活动不存在: #{}", id)));
        }
        self.ensure_slug_available(&draft.slug, Some(id)).await?;

        let db = &self.db;
        let now = Utc::now();
        let model = retry::with_retry(&format!("update_campaign({})", id), self.retry_config, || {
            campaign_draft_to_active_model(draft, Some(id), now).update(db)
        })
        .await
        .map_err(|e| map_campaign_write_err(&draft.slug, "更新活动失败", e))?;

        info!("Campaign updated: #{}", id);
        Ok(model_to_campaign(model))
    }

    pub async fn delete_campaign(&self, id: i64) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry(&format!("delete_campaign({})", id), self.retry_config, || {
            campaign::Entity::delete_by_id(id).exec(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("删除活动失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(WalinkError::not_found(format!("活动不存在: #{}", id)));
        }

        info!("Campaign deleted: #{}", id);
        Ok(())
    }

    /// 新建推广员，角色固定为 agent
    pub async fn insert_agent(&self, draft: &AgentDraft) -> Result<Agent> {
        let db = &self.db;
        let now = Utc::now();
        let model = retry::with_retry("insert_agent", self.retry_config, || {
            agent_draft_to_active_model(draft, AGENT_ROLE, None, now).insert(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("创建推广员失败: {}", e)))?;

        info!("Agent created: #{} ({})", model.id, model.referral_code);
        Ok(model_to_agent(model))
    }

    pub async fn update_agent(&self, id: i64, draft: &AgentDraft) -> Result<Agent> {
        if self.get_agent(id).await?.is_none() {
            return Err(WalinkError::not_found(format!("推广员不存在: #{}", id)));
        }

        let db = &self.db;
        let now = Utc::now();
        let model = retry::with_retry(&format!("update_agent({})", id), self.retry_config, || {
            agent_draft_to_active_model(draft, AGENT_ROLE, Some(id), now).update(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("更新推广员失败: {}", e)))?;

        info!("Agent updated: #{}", id);
        Ok(model_to_agent(model))
    }

    pub async fn delete_agent(&self, id: i64) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry(&format!("delete_agent({})", id), self.retry_config, || {
            agent::Entity::delete_by_id(id).exec(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("删除推广员失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(WalinkError::not_found(format!("推广员不存在: #{}", id)));
        }

        info!("Agent deleted: #{}", id);
        Ok(())
    }

    pub async fn insert_entry(&self, entry: &NewFormEntry) -> Result<FormEntry> {
        let active = new_entry_to_active_model(entry, Utc::now())?;

        let db = &self.db;
        let model = retry::with_retry("insert_entry", self.retry_config, || {
            active.clone().insert(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("保存表单记录失败: {}", e)))?;

        info!(
            "Form entry saved: #{} form={} campaign={:?} agent={:?}",
            model.id, model.form_id, model.campaign_id, model.agent_id
        );
        model_to_form_entry(model)
    }

    /// slug 被其他活动占用时返回 Conflict
    async fn ensure_slug_available(&self, slug: &str, own_id: Option<i64>) -> Result<()> {
        match self.find_campaign_by_slug(slug).await? {
            Some(existing) if Some(existing.id) != own_id => Err(WalinkError::conflict(format!(
                "活动 slug 已存在: {}",
                slug
            ))),
            _ => Ok(()),
        }
    }
}

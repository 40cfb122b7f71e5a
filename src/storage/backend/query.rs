//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use super::converters::{model_to_agent, model_to_campaign, model_to_form_entry};
use super::{EntryFilter, SeaOrmStorage, retry};
use crate::errors::{Result, WalinkError};
use crate::storage::models::{Agent, Campaign, FormEntry};

use migration::entities::{agent, campaign, form_entry};

impl SeaOrmStorage {
    pub async fn get_campaign(&self, id: i64) -> Result<Option<Campaign>> {
        let db = &self.db;
        let model = retry::with_retry(&format!("get_campaign({})", id), self.retry_config, || {
            campaign::Entity::find_by_id(id).one(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("查询活动失败: {}", e)))?;

        Ok(model.map(model_to_campaign))
    }

    pub async fn find_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_campaign_by_slug({})", slug),
            self.retry_config,
            || {
                campaign::Entity::find()
                    .filter(campaign::Column::Slug.eq(slug))
                    .one(db)
            },
        )
        .await
        .map_err(|e| WalinkError::database_operation(format!("查询活动失败: {}", e)))?;

        Ok(model.map(model_to_campaign))
    }

    /// 所有活动，最新创建的在前
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let models = retry::with_retry("list_campaigns", self.retry_config, || {
            campaign::Entity::find()
                .order_by_desc(campaign::Column::CreatedAt)
                .order_by_desc(campaign::Column::Id)
                .all(&self.db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("加载活动列表失败: {}", e)))?;

        debug!("Loaded {} campaigns", models.len());
        Ok(models.into_iter().map(model_to_campaign).collect())
    }

    pub async fn count_campaigns(&self) -> Result<u64> {
        retry::with_retry("count_campaigns", self.retry_config, || {
            campaign::Entity::find().count(&self.db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("统计活动数量失败: {}", e)))
    }

    pub async fn get_agent(&self, id: i64) -> Result<Option<Agent>> {
        let db = &self.db;
        let model = retry::with_retry(&format!("get_agent({})", id), self.retry_config, || {
            agent::Entity::find_by_id(id).one(db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("查询推广员失败: {}", e)))?;

        Ok(model.map(model_to_agent))
    }

    /// 按推荐码取一条推广员记录（LIMIT 1）
    ///
    /// 推荐码没有唯一约束，重复时不保证取到哪一条
    pub async fn find_agent_by_referral_code(&self, code: &str) -> Result<Option<Agent>> {
        let db = &self.db;
        let model = retry::with_retry(
            "find_agent_by_referral_code",
            self.retry_config,
            || {
                agent::Entity::find()
                    .filter(agent::Column::ReferralCode.eq(code))
                    .limit(1)
                    .one(db)
            },
        )
        .await
        .map_err(|e| WalinkError::database_operation(format!("按推荐码查询失败: {}", e)))?;

        Ok(model.map(model_to_agent))
    }

    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        let models = retry::with_retry("list_agents", self.retry_config, || {
            agent::Entity::find()
                .order_by_asc(agent::Column::DisplayName)
                .order_by_asc(agent::Column::Id)
                .all(&self.db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("加载推广员列表失败: {}", e)))?;

        debug!("Loaded {} agents", models.len());
        Ok(models.into_iter().map(model_to_agent).collect())
    }

    pub async fn count_agents(&self) -> Result<u64> {
        retry::with_retry("count_agents", self.retry_config, || {
            agent::Entity::find().count(&self.db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("统计推广员数量失败: {}", e)))
    }

    /// 表单记录，最新的在前
    pub async fn list_entries(&self, filter: EntryFilter) -> Result<Vec<FormEntry>> {
        let models = retry::with_retry("list_entries", self.retry_config, || {
            let mut query = form_entry::Entity::find();
            if let Some(campaign_id) = filter.campaign_id {
                query = query.filter(form_entry::Column::CampaignId.eq(campaign_id));
            }
            if let Some(limit) = filter.limit {
                query = query.limit(limit);
            }
            query
                .order_by_desc(form_entry::Column::CreatedAt)
                .order_by_desc(form_entry::Column::Id)
                .all(&self.db)
        })
        .await
        .map_err(|e| WalinkError::database_operation(format!("加载表单记录失败: {}", e)))?;

        models.into_iter().map(model_to_form_entry).collect()
    }
}

//! 存储抽象
//!
//! 核心服务（归因、跳转、表单桥接）只依赖这里的 trait，
//! 生产环境由 `SeaOrmStorage` 实现，测试可替换为内存实现。

use async_trait::async_trait;

use crate::errors::Result;
use crate::storage::models::{Agent, Campaign, FormEntry, NewFormEntry};

/// 活动与推广员的只读查询
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// 按推荐码查找推广员，最多取一条。
    ///
    /// 推荐码不保证唯一，多条匹配时返回哪一条未定义。
    async fn find_agent_by_referral_code(&self, code: &str) -> Result<Option<Agent>>;

    async fn get_agent(&self, id: i64) -> Result<Option<Agent>>;

    async fn get_campaign(&self, id: i64) -> Result<Option<Campaign>>;

    async fn find_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>>;
}

/// 表单提交记录写入
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn save_entry(&self, entry: NewFormEntry) -> Result<FormEntry>;
}

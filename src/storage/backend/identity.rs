use async_trait::async_trait;

use super::SeaOrmStorage;
use crate::errors::Result;
use crate::storage::models::{Agent, Campaign, FormEntry, NewFormEntry};
use crate::storage::traits::{EntryStore, IdentityStore};

#[async_trait]
impl IdentityStore for SeaOrmStorage {
    async fn find_agent_by_referral_code(&self, code: &str) -> Result<Option<Agent>> {
        SeaOrmStorage::find_agent_by_referral_code(self, code).await
    }

    async fn get_agent(&self, id: i64) -> Result<Option<Agent>> {
        SeaOrmStorage::get_agent(self, id).await
    }

    async fn get_campaign(&self, id: i64) -> Result<Option<Campaign>> {
        SeaOrmStorage::get_campaign(self, id).await
    }

    async fn find_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>> {
        SeaOrmStorage::find_campaign_by_slug(self, slug).await
    }
}

#[async_trait]
impl EntryStore for SeaOrmStorage {
    async fn save_entry(&self, entry: NewFormEntry) -> Result<FormEntry> {
        self.insert_entry(&entry).await
    }
}

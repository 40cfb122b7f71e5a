pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_campaigns;
mod m20260301_000002_agents;
mod m20260301_000003_form_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_campaigns::Migration),
            Box::new(m20260301_000002_agents::Migration),
            Box::new(m20260301_000003_form_entries::Migration),
        ]
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 form_entries 表
        manager
            .create_table(
                Table::create()
                    .table(FormEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormEntry::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FormEntry::FormId).string().not_null())
                    .col(ColumnDef::new(FormEntry::CampaignId).big_integer().null())
                    .col(ColumnDef::new(FormEntry::AgentId).big_integer().null())
                    .col(ColumnDef::new(FormEntry::Fields).text().not_null())
                    .col(
                        ColumnDef::new(FormEntry::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_form_entries_campaign")
                    .table(FormEntry::Table)
                    .col(FormEntry::CampaignId)
                    .col(FormEntry::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_form_entries_campaign").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FormEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormEntry {
    #[sea_orm(iden = "form_entries")]
    Table,
    Id,
    FormId,
    CampaignId,
    AgentId,
    Fields,
    CreatedAt,
}

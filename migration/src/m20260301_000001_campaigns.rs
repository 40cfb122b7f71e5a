use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 campaigns 表
        manager
            .create_table(
                Table::create()
                    .table(Campaign::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaign::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaign::Title).string().not_null())
                    .col(ColumnDef::new(Campaign::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Campaign::AdminPhone).string().not_null())
                    .col(ColumnDef::new(Campaign::WhatsappMessage).text().not_null())
                    .col(ColumnDef::new(Campaign::ZapierLink).string().null())
                    .col(
                        ColumnDef::new(Campaign::Published)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Campaign::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaign::UpdatedAt)
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
                    .name("idx_campaigns_created_at")
                    .table(Campaign::Table)
                    .col(Campaign::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_campaigns_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Campaign::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Campaign {
    #[sea_orm(iden = "campaigns")]
    Table,
    Id,
    Title,
    Slug,
    AdminPhone,
    WhatsappMessage,
    ZapierLink,
    Published,
    CreatedAt,
    UpdatedAt,
}

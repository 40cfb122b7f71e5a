use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 agents 表
        manager
            .create_table(
                Table::create()
                    .table(Agent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Agent::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Agent::DisplayName).string().not_null())
                    .col(ColumnDef::new(Agent::Email).string().not_null())
                    .col(ColumnDef::new(Agent::ReferralCode).string().not_null())
                    .col(ColumnDef::new(Agent::PhoneNumber).string().not_null())
                    .col(
                        ColumnDef::new(Agent::Role)
                            .string()
                            .not_null()
                            .default("agent"),
                    )
                    .col(
                        ColumnDef::new(Agent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agent::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 推荐码查询索引（非唯一）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_agents_referral_code")
                    .table(Agent::Table)
                    .col(Agent::ReferralCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_agents_referral_code").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Agent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Agent {
    #[sea_orm(iden = "agents")]
    Table,
    Id,
    DisplayName,
    Email,
    ReferralCode,
    PhoneNumber,
    Role,
    CreatedAt,
    UpdatedAt,
}

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "form_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub form_id: String,
    pub campaign_id: Option<i64>,
    pub agent_id: Option<i64>,
    /// JSON 数组 `[{"name": .., "value": ..}]`，保持字段顺序
    #[sea_orm(column_type = "Text")]
    pub fields: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

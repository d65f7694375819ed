use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// 8-char uppercase alphanumeric code; unique among all cards
    #[sea_orm(unique)]
    pub code: String,

    pub status: String,

    pub created_at: String,

    pub created_by: String,

    pub last_used: Option<String>,

    pub owner: Option<String>,

    pub configured: bool,

    /// JSON-encoded `CardConfig`
    pub config: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

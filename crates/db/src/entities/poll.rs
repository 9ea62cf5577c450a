//! Poll entity for watchit polls.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Watchit the poll belongs to
    pub watchit_uuid: String,

    pub title: String,

    /// Poll choices (JSON array of strings)
    #[sea_orm(column_type = "Json")]
    pub choices: JsonValue,

    /// Configuration overriding the event default (null to inherit)
    #[sea_orm(nullable)]
    pub poll_config_id: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::poll_config::Entity",
        from = "Column::PollConfigId",
        to = "super::poll_config::Column::Id",
        on_delete = "SetNull"
    )]
    PollConfig,
}

impl Related<super::poll_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PollConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Event configuration entity.
//!
//! One row per watchit, pointing at its default poll and question
//! configurations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// External watchit identifier
    #[sea_orm(unique)]
    pub watchit_uuid: String,

    #[sea_orm(nullable)]
    pub default_polls_config_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub default_questions_config_id: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::poll_config::Entity",
        from = "Column::DefaultPollsConfigId",
        to = "super::poll_config::Column::Id",
        on_delete = "SetNull"
    )]
    DefaultPollsConfig,
    #[sea_orm(
        belongs_to = "super::question_config::Entity",
        from = "Column::DefaultQuestionsConfigId",
        to = "super::question_config::Column::Id",
        on_delete = "SetNull"
    )]
    DefaultQuestionsConfig,
}

impl Related<super::poll_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefaultPollsConfig.def()
    }
}

impl Related<super::question_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefaultQuestionsConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

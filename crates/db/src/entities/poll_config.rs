//! Poll configuration entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Whether polls are enabled under this configuration
    pub enabled: bool,

    /// Whether voters may pick more than one choice
    pub allow_multiple_choices: bool,

    /// Whether running results are visible to participants
    pub show_results: bool,

    /// Whether votes are recorded without voter identity
    pub anonymous_votes: bool,

    /// Voting window in seconds (0 for no time limit)
    pub duration_seconds: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::poll::Entity")]
    Poll,
}

impl Related<super::poll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Question configuration entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Whether audience questions are enabled
    pub enabled: bool,

    /// Whether questions may be asked without a name
    pub allow_anonymous: bool,

    /// Whether questions are held until a moderator approves them
    pub requires_moderation: bool,

    /// Whether the audience can upvote questions
    pub allow_upvotes: bool,

    /// Maximum question length in characters
    pub max_length: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

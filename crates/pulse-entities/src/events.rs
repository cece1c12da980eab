//! `SeaORM` Entity for the events hypertable

use pulse_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Occurrence timestamp, also the hypertable partitioning column.
    /// Set once at creation and never mutated by updates.
    pub time: UtcDateTime,
    pub page: String,
    pub user_agent: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

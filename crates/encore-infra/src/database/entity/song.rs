//! Song entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub performer: String,
    pub album_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion to the domain song used in playlist exports.
impl From<Model> for encore_core::domain::Song {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            performer: model.performer,
        }
    }
}

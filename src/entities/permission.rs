use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subuser_id: i32,
    pub permission: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subuser::Entity",
        from = "Column::SubuserId",
        to = "super::subuser::Column::Id",
        on_delete = "Cascade"
    )]
    Subuser,
}

impl Related<super::subuser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subuser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! 访问码实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "access_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub class_name: String,
    pub is_used: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id"
    )]
    Evaluation,
    #[sea_orm(has_many = "super::evaluation_responses::Entity")]
    EvaluationResponses,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::evaluation_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_access_code(self) -> crate::models::access_codes::entities::AccessCode {
        use crate::models::access_codes::entities::AccessCode;
        use chrono::{DateTime, Utc};

        AccessCode {
            id: self.id,
            evaluation_id: self.evaluation_id,
            code: self.code,
            class_name: self.class_name,
            is_used: self.is_used,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}

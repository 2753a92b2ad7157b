use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 评价活动表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Name).string().not_null())
                    .col(ColumnDef::new(Evaluations::Description).text().null())
                    .col(
                        ColumnDef::new(Evaluations::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Evaluations::StartDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EndDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 访问码表 ====================
        // code 列全表唯一，生成冲突时由存储层重试
        manager
            .create_table(
                Table::create()
                    .table(AccessCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccessCodes::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccessCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AccessCodes::ClassName).string().not_null())
                    .col(
                        ColumnDef::new(AccessCodes::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AccessCodes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AccessCodes::Table, AccessCodes::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 评价回复表 ====================
        // access_code_id 唯一：每个访问码最多对应一条回复
        manager
            .create_table(
                Table::create()
                    .table(EvaluationResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::AccessCodeId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::Criteria)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationResponses::Comment).text().null())
                    .col(
                        ColumnDef::new(EvaluationResponses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationResponses::Table,
                                EvaluationResponses::EvaluationId,
                            )
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationResponses::Table, EvaluationResponses::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationResponses::Table, EvaluationResponses::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationResponses::Table, EvaluationResponses::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationResponses::Table,
                                EvaluationResponses::AccessCodeId,
                            )
                            .to(AccessCodes::Table, AccessCodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 评价活动索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_school_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::SchoolId)
                    .to_owned(),
            )
            .await?;

        // 访问码索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_access_codes_evaluation_id")
                    .table(AccessCodes::Table)
                    .col(AccessCodes::EvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_access_codes_code")
                    .table(AccessCodes::Table)
                    .col(AccessCodes::Code)
                    .to_owned(),
            )
            .await?;

        // 评价回复索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_responses_evaluation_id")
                    .table(EvaluationResponses::Table)
                    .col(EvaluationResponses::EvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_responses_teacher_id")
                    .table(EvaluationResponses::Table)
                    .col(EvaluationResponses::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EvaluationResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccessCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Schools {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    SchoolId,
    Name,
    Description,
    Status,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AccessCodes {
    #[sea_orm(iden = "access_codes")]
    Table,
    Id,
    EvaluationId,
    Code,
    ClassName,
    IsUsed,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EvaluationResponses {
    #[sea_orm(iden = "evaluation_responses")]
    Table,
    Id,
    EvaluationId,
    TeacherId,
    SubjectId,
    ClassId,
    AccessCodeId,
    Criteria,
    Comment,
    CreatedAt,
}

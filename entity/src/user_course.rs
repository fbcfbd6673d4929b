use sea_orm::entity::prelude::*;

/// A user's enrolment in a course, pointing at where they left off.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
    pub current_unit_id: Option<i32>,
    pub current_module_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::CurrentUnitId",
        to = "super::unit::Column::Id",
        on_delete = "SetNull"
    )]
    Unit,
    #[sea_orm(
        belongs_to = "super::module::Entity",
        from = "Column::CurrentModuleId",
        to = "super::module::Column::Id",
        on_delete = "SetNull"
    )]
    Module,
}

impl ActiveModelBehavior for ActiveModel {}

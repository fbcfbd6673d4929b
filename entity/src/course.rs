use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub requirements: Option<String>,
    pub what_you_learn: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
    /// Estimated duration in minutes.
    pub duration: i32,
    /// One of `beginner`, `intermediate`, `advanced`, `expert`.
    pub difficulty_level: String,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::unit::Entity")]
    Unit,
    #[sea_orm(has_many = "super::course_author::Entity")]
    CourseAuthor,
    #[sea_orm(has_many = "super::course_tag::Entity")]
    CourseTag,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

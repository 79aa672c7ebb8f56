use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "manuscript")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub submitter_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub abstract_text: String,
    pub article_type: String,
    pub authors: Json,
    pub country: String,
    pub institution: String,
    pub file_url: Option<String>,
    pub status: String,
    pub copy_editing_stage: String,
    pub volume: Option<i32>,
    pub issue: Option<i32>,
    #[sea_orm(unique)]
    pub doi: Option<String>,
    pub published_date: Option<DateTimeUtc>,
    pub views: i64,
    pub downloads: i64,
    pub citations: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SubmitterId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
    #[sea_orm(has_many = "super::correction::Entity")]
    Correction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::correction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Correction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

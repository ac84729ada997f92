use sea_orm::entity::prelude::*;

/// Represents a student registered in the system.
/// The registration number (`rm`) is assigned by the school, so it is the
/// primary key and is never auto-generated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rm: i32,
    pub name: String,
    pub email: String,
    /// The class group the student belongs to, e.g. "3A".
    pub class_group: String,
    /// The locker assigned to this student, if any. At most one student per
    /// locker, enforced by a unique index.
    #[sea_orm(unique)]
    pub locker_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A user holds at most one locker.
    #[sea_orm(
        belongs_to = "super::locker::Entity",
        from = "Column::LockerId",
        to = "super::locker::Column::Number"
    )]
    Locker,
}

impl Related<super::locker::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

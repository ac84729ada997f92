use model::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    QueryFilter, Set,
};

/// Data-access layer for users.
///
/// Every method forwards its arguments to the corresponding SeaORM call and
/// returns the result unchanged. Lookups resolve with `Ok(None)` when nothing
/// matches; update and delete surface the database outcome as-is. Translation
/// into HTTP status codes happens in the handlers, not here.
#[derive(Clone, Debug)]
pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new user.
    pub async fn create(&self, user: user::ActiveModel) -> Result<user::Model, DbErr> {
        user.insert(&self.db).await
    }

    /// Look up a user by registration number.
    pub async fn get_by_rm(&self, rm: i32) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(rm).one(&self.db).await
    }

    /// Look up the first user with the given name.
    pub async fn get_by_username(&self, name: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Look up the first user with the given email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Fetch all users.
    pub async fn list(&self) -> Result<Vec<user::Model>, DbErr> {
        user::Entity::find().all(&self.db).await
    }

    /// Update the user with the given registration number.
    ///
    /// Rejects with `DbErr::RecordNotUpdated` when no such user exists.
    pub async fn update_by_rm(
        &self,
        rm: i32,
        mut user: user::ActiveModel,
    ) -> Result<user::Model, DbErr> {
        user.rm = Set(rm);
        user.update(&self.db).await
    }

    /// Delete the user with the given registration number.
    pub async fn delete_by_rm(&self, rm: i32) -> Result<DeleteResult, DbErr> {
        user::Entity::delete_by_id(rm).exec(&self.db).await
    }
}

use model::entities::{locker, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    QueryFilter, Set,
};

/// Data-access layer for lockers.
///
/// Same pass-through contract as [`super::UserService`], plus the two reads
/// that reach a locker through its holding user. The traversals resolve with
/// `Ok(None)` both when the user does not exist and when the user holds no
/// locker.
#[derive(Clone, Debug)]
pub struct LockerService {
    db: DatabaseConnection,
}

impl LockerService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new locker.
    pub async fn create(&self, locker: locker::ActiveModel) -> Result<locker::Model, DbErr> {
        locker.insert(&self.db).await
    }

    /// Look up a locker by its number.
    pub async fn get_by_number(&self, number: i32) -> Result<Option<locker::Model>, DbErr> {
        locker::Entity::find_by_id(number).one(&self.db).await
    }

    /// Fetch all lockers.
    pub async fn list(&self) -> Result<Vec<locker::Model>, DbErr> {
        locker::Entity::find().all(&self.db).await
    }

    /// Update the locker with the given number.
    ///
    /// Rejects with `DbErr::RecordNotUpdated` when no such locker exists.
    pub async fn update_by_number(
        &self,
        number: i32,
        mut locker: locker::ActiveModel,
    ) -> Result<locker::Model, DbErr> {
        locker.number = Set(number);
        locker.update(&self.db).await
    }

    /// Delete the locker with the given number.
    pub async fn delete_by_number(&self, number: i32) -> Result<DeleteResult, DbErr> {
        locker::Entity::delete_by_id(number).exec(&self.db).await
    }

    /// Locker held by the user with the given registration number.
    pub async fn get_for_user_rm(&self, rm: i32) -> Result<Option<locker::Model>, DbErr> {
        Ok(user::Entity::find_by_id(rm)
            .find_also_related(locker::Entity)
            .one(&self.db)
            .await?
            .and_then(|(_, locker)| locker))
    }

    /// Locker held by the first user matching the given name.
    pub async fn get_for_username(&self, name: &str) -> Result<Option<locker::Model>, DbErr> {
        Ok(user::Entity::find()
            .filter(user::Column::Name.eq(name))
            .find_also_related(locker::Entity)
            .one(&self.db)
            .await?
            .and_then(|(_, locker)| locker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_service() -> LockerService {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        LockerService::new(db)
    }

    fn sample_locker(number: i32) -> locker::ActiveModel {
        locker::ActiveModel {
            number: Set(number),
            location: Set(Some("B wing, ground floor".to_string())),
        }
    }

    async fn insert_user(service: &LockerService, rm: i32, name: &str, locker_id: Option<i32>) {
        user::ActiveModel {
            rm: Set(rm),
            name: Set(name.to_string()),
            email: Set(format!("user{}@school.example", rm)),
            class_group: Set("3A".to_string()),
            locker_id: Set(locker_id),
        }
        .insert(&service.db)
        .await
        .expect("Failed to insert user");
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let service = setup_service().await;

        let created = service.create(sample_locker(101)).await.expect("create failed");
        assert_eq!(created.number, 101);
        assert_eq!(created.location.as_deref(), Some("B wing, ground floor"));
    }

    #[tokio::test]
    async fn test_get_by_number_missing_returns_none() {
        let service = setup_service().await;

        let found = service.get_by_number(999).await.expect("lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_number_surfaces_rejection() {
        let service = setup_service().await;

        let changes = locker::ActiveModel {
            location: Set(Some("moved".to_string())),
            ..Default::default()
        };
        let err = service.update_by_number(999, changes).await.unwrap_err();
        assert!(matches!(err, DbErr::RecordNotUpdated));
    }

    #[tokio::test]
    async fn test_delete_missing_number_affects_no_rows() {
        let service = setup_service().await;

        let result = service.delete_by_number(999).await.expect("delete failed");
        assert_eq!(result.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_get_for_user_rm_traverses_relation() {
        let service = setup_service().await;
        service.create(sample_locker(101)).await.unwrap();
        insert_user(&service, 2301, "Ana Souza", Some(101)).await;

        let found = service
            .get_for_user_rm(2301)
            .await
            .expect("lookup failed")
            .expect("no locker found");
        assert_eq!(found.number, 101);
    }

    #[tokio::test]
    async fn test_get_for_user_rm_without_locker_returns_none() {
        let service = setup_service().await;
        insert_user(&service, 2302, "Bruno Lima", None).await;

        let found = service.get_for_user_rm(2302).await.expect("lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_for_user_rm_missing_user_returns_none() {
        let service = setup_service().await;

        let found = service.get_for_user_rm(9999).await.expect("lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_for_username_traverses_relation() {
        let service = setup_service().await;
        service.create(sample_locker(101)).await.unwrap();
        insert_user(&service, 2301, "Ana Souza", Some(101)).await;

        let found = service
            .get_for_username("Ana Souza")
            .await
            .expect("lookup failed")
            .expect("no locker found");
        assert_eq!(found.number, 101);

        let missing = service.get_for_username("Bruno Lima").await.unwrap();
        assert!(missing.is_none());
    }
}

//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the locker management application here.
//! The structure mirrors the school's registration records: students are
//! identified by their registration number and may hold a single locker.

pub mod locker;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::locker::Entity as Locker;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        // Setup database
        let db = setup_db().await?;

        // Create lockers
        let locker1 = locker::ActiveModel {
            number: Set(101),
            location: Set(Some("B wing, ground floor".to_string())),
        }
        .insert(&db)
        .await?;

        let locker2 = locker::ActiveModel {
            number: Set(102),
            location: Set(None),
        }
        .insert(&db)
        .await?;

        // Create users
        let user1 = user::ActiveModel {
            rm: Set(2301),
            name: Set("Ana Souza".to_string()),
            email: Set("ana.souza@school.example".to_string()),
            class_group: Set("3A".to_string()),
            locker_id: Set(Some(locker1.number)),
        }
        .insert(&db)
        .await?;

        let user2 = user::ActiveModel {
            rm: Set(2302),
            name: Set("Bruno Lima".to_string()),
            email: Set("bruno.lima@school.example".to_string()),
            class_group: Set("3B".to_string()),
            locker_id: Set(None),
        }
        .insert(&db)
        .await?;

        // Read back and verify data
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.name == "Ana Souza"));
        assert!(users.iter().any(|u| u.name == "Bruno Lima"));

        let lockers = Locker::find().all(&db).await?;
        assert_eq!(lockers.len(), 2);
        assert!(lockers.iter().any(|l| l.number == 101));
        assert!(lockers.iter().any(|l| l.number == 102));

        // Traverse from user to locker
        let held = user1.find_related(Locker).one(&db).await?;
        assert_eq!(held.map(|l| l.number), Some(locker1.number));

        let none_held = user2.find_related(Locker).one(&db).await?;
        assert!(none_held.is_none());

        // Traverse from locker to user
        let holder = locker1.find_related(User).one(&db).await?;
        assert_eq!(holder.map(|u| u.rm), Some(user1.rm));

        let vacant = locker2.find_related(User).one(&db).await?;
        assert!(vacant.is_none());

        // Registration numbers are unique
        let duplicate_rm = user::ActiveModel {
            rm: Set(2301),
            name: Set("Carla Dias".to_string()),
            email: Set("carla.dias@school.example".to_string()),
            class_group: Set("2C".to_string()),
            locker_id: Set(None),
        }
        .insert(&db)
        .await;
        assert!(duplicate_rm.is_err());

        // At most one user per locker
        let duplicate_locker = user::ActiveModel {
            rm: Set(2303),
            name: Set("Carla Dias".to_string()),
            email: Set("carla.dias@school.example".to_string()),
            class_group: Set("2C".to_string()),
            locker_id: Set(Some(locker1.number)),
        }
        .insert(&db)
        .await;
        assert!(duplicate_locker.is_err());

        // Filtered lookups used by the data-access layer
        let by_email = User::find()
            .filter(user::Column::Email.eq("bruno.lima@school.example"))
            .one(&db)
            .await?;
        assert_eq!(by_email.map(|u| u.rm), Some(2302));

        Ok(())
    }
}

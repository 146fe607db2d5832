pub mod entities;

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    };

    use super::*;
    use entities::{exercise, user};
    use entities::prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // SQLite leaves foreign keys off unless asked
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let alice = user::ActiveModel {
            username: Set("alice".to_string()),
            ..Default::default()
        }
            .insert(&db)
            .await?;

        // Duplicate usernames are allowed
        let other_alice = user::ActiveModel {
            username: Set("alice".to_string()),
            ..Default::default()
        }
            .insert(&db)
            .await?;
        assert_ne!(alice.id, other_alice.id);

        for (description, duration, date) in [
            ("swim", 45, day(2023, 12, 31)),
            ("run", 30, day(2023, 1, 1)),
            ("bike", 60, day(2023, 6, 15)),
        ] {
            exercise::ActiveModel {
                user_id: Set(alice.id),
                description: Set(description.to_string()),
                duration: Set(duration),
                date: Set(date),
                ..Default::default()
            }
                .insert(&db)
                .await?;
        }

        exercise::ActiveModel {
            user_id: Set(other_alice.id),
            description: Set("yoga".to_string()),
            duration: Set(20),
            date: Set(day(2023, 3, 3)),
            ..Default::default()
        }
            .insert(&db)
            .await?;

        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);

        let log = Exercise::find()
            .filter(exercise::Column::UserId.eq(alice.id))
            .order_by_asc(exercise::Column::Date)
            .all(&db)
            .await?;
        let descriptions: Vec<&str> = log.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["run", "bike", "swim"]);

        // Walk the relation from the user side
        let related = other_alice.find_related(Exercise).all(&db).await?;
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].description, "yoga");
        assert_eq!(related[0].date, day(2023, 3, 3));

        Ok(())
    }

    #[tokio::test]
    async fn test_exercise_requires_existing_user() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let orphan = exercise::ActiveModel {
            user_id: Set(999),
            description: Set("ghost run".to_string()),
            duration: Set(10),
            date: Set(day(2024, 1, 1)),
            ..Default::default()
        }
            .insert(&db)
            .await;

        assert!(orphan.is_err());
        assert!(Exercise::find().all(&db).await?.is_empty());
        Ok(())
    }
}

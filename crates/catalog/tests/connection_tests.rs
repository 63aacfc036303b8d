use catalog::{run_migrations, MealRepository};
use core_types::Difficulty;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[tokio::test]
async fn a_file_backed_catalog_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meals.db");

    {
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();

        let repository = MealRepository::new(pool.clone());
        repository
            .create_meal("Bibimbap", "Korean", 16.0, Difficulty::High)
            .await
            .unwrap();
        pool.close().await;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(&path))
        .await
        .unwrap();
    // Running the migrations again is a no-op on an up-to-date schema.
    run_migrations(&pool).await.unwrap();

    let repository = MealRepository::new(pool);
    let meal = repository.get_meal_by_name("Bibimbap").await.unwrap();
    assert_eq!(meal.price, 16.0);
    assert_eq!(meal.difficulty, Difficulty::High);
}

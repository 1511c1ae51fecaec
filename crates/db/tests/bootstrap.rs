use sqlx::PgPool;

/// Connect, migrate, verify the roles seed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    biosecure_db::health_check(&pool).await.unwrap();

    let roles = biosecure_db::repositories::RoleRepo::list(&pool).await.unwrap();
    let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, biosecure_core::roles::VALID_ROLES);
}

/// Role ids follow seed order so tests can refer to them by number.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_ids_are_stable(pool: PgPool) {
    let regulator = biosecure_db::repositories::RoleRepo::find_by_name(&pool, "regulator")
        .await
        .unwrap()
        .expect("regulator role should be seeded");
    assert_eq!(regulator.id, 4);
}

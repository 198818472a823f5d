use diesel::prelude::*;
use diesel::sql_types::Text;

mod common;

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

#[test]
fn test_migrations_create_catalog_tables() {
    let base = "test_migrations_create_catalog_tables.db";

    {
        let test_db = common::TestDb::new(base);
        let mut conn = test_db.pool().get().expect("connection");

        let mut tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name IN ('products', 'tags', 'media_properties', 'product_tags')",
        )
        .load::<TableName>(&mut conn)
        .expect("query sqlite_master")
        .into_iter()
        .map(|row| row.name)
        .collect();
        tables.sort();

        assert_eq!(
            tables,
            vec!["media_properties", "product_tags", "products", "tags"]
        );
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}

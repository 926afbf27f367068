use diesel::prelude::*;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeys>(&mut conn)
        .expect("should read pragma");

    assert_eq!(pragma.foreign_keys, 1);
}

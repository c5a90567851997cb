use super::*;

#[test]
fn tables_survive_reopening_the_root() {
    let dir = TempDir::new().unwrap();
    {
        let tm = TableManager::new(dir.path()).unwrap();
        tm.create_table("users", &users_schema()).unwrap();
        tm.insert("users", user(1, "Alice")).unwrap();
        tm.insert("users", user(2, "Bob")).unwrap();
        tm.update("users", [("name", Value::from("Robert"))], &[Filter::eq("id", 2i64)])
            .unwrap();
    }

    let tm = TableManager::new(dir.path()).unwrap();
    assert_eq!(tm.table_names().unwrap(), vec!["users"]);
    let rows = tm.get_all_data("users", &[], &all_columns()).unwrap();
    assert_eq!(names(&rows), vec!["Alice", "Robert"]);

    let err = tm.create_table("users", &users_schema()).unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists { .. }));
}

#[test]
fn nonexistent_root_is_created() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("db");
    let tm = TableManager::new(&root).unwrap();
    assert!(root.join("tables").is_dir());
    assert_eq!(tm.root(), root.as_path());
    assert!(tm.table_names().unwrap().is_empty());
}

#[test]
fn each_table_is_one_file_with_schema_header() -> anyhow::Result<()> {
    let (dir, tm) = test_manager();
    tm.create_table("users", &users_schema())?;
    tm.create_table("events", &Schema::new(vec![Column::int("ts")]))?;
    tm.insert("users", user(1, "tab\there"))?;

    assert_eq!(tm.table_names()?, vec!["events", "users"]);

    let content = std::fs::read_to_string(dir.path().join("tables").join("users.tbl"))?;
    let mut lines = content.lines();
    let header: serde_json::Value = serde_json::from_str(lines.next().unwrap())?;
    assert_eq!(header["columns"][0]["name"], "id");
    assert_eq!(header["columns"][0]["type"], "int");
    assert_eq!(header["columns"][1]["type"], "varchar");
    assert_eq!(header["columns"][1]["length"], 50);
    assert_eq!(lines.next(), Some("i:1\tt:tab\\there"));
    assert_eq!(lines.next(), None);
    Ok(())
}

#[test]
fn corrupt_rows_are_reported_not_reinterpreted() -> anyhow::Result<()> {
    let (dir, tm) = test_manager();
    seed_users(&tm, &["Alice"]);

    let path = dir.path().join("tables").join("users.tbl");
    let mut content = std::fs::read_to_string(&path)?;
    content.push_str("t:2\tt:Bob\n");
    std::fs::write(&path, content)?;

    let err = tm.get_all_data("users", &[], &all_columns()).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { line: 3, .. }), "{err}");

    // The header is still readable without touching rows.
    assert_eq!(tm.schema("users")?, users_schema());
    Ok(())
}

#[test]
fn varchar_bound_is_enforced_on_read_back() -> anyhow::Result<()> {
    let (dir, tm) = test_manager();
    tm.create_table("short", &Schema::new(vec![Column::varchar("code", 3)]))?;

    let path = dir.path().join("tables").join("short.tbl");
    let mut content = std::fs::read_to_string(&path)?;
    content.push_str("t:abcd\n");
    std::fs::write(&path, content)?;

    let err = tm.count("short", &[]).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    Ok(())
}

#[test]
fn options_can_come_from_json() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let json = serde_json::json!({ "root": dir.path(), "sync_writes": false }).to_string();
    let options = StoreOptions::from_json_str(&json)?;
    assert!(!options.sync_writes);

    let tm = TableManager::open(options)?;
    tm.create_table("users", &users_schema())?;
    assert!(tm.has_table("users")?);
    Ok(())
}

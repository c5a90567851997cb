use super::*;

#[test]
fn scan_without_filters_returns_every_row_in_insert_order() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["John", "Bob", "Carol"]);

    let rows = tm.get_all_data("users", &[], &all_columns()).unwrap();
    assert_eq!(names(&rows), vec!["John", "Bob", "Carol"]);
    assert_eq!(rows[2]["id"], Value::Int(3));
}

#[test]
fn equality_filter_is_selective() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice", "Bob"]);

    let filters = [Filter::new("name", "=", "Alice").unwrap()];
    let rows = tm.get_all_data("users", &filters, &all_columns()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Alice");
    assert_eq!(rows[0]["id"], Value::Int(1));
}

#[test]
fn multiple_filters_combine_with_and() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice", "Bob", "Alice"]);

    let filters = [Filter::eq("name", "Alice"), Filter::eq("id", 3i64)];
    let rows = tm.get_all_data("users", &filters, &all_columns()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], Value::Int(3));

    let none = [Filter::eq("name", "Bob"), Filter::eq("id", 1i64)];
    assert!(tm.get_all_data("users", &none, &all_columns()).unwrap().is_empty());
}

#[test]
fn projection_follows_requested_order() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice"]);

    let rows = tm
        .get_all_data("users", &[], &SelectedColumns::new(["name", "id"]))
        .unwrap();
    assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["name", "id"]);
    assert_eq!(
        rows[0].values().cloned().collect::<Vec<_>>(),
        vec![Value::from("Alice"), Value::Int(1)]
    );

    let only_name = tm
        .get_all_data("users", &[], &SelectedColumns::new(["name"]))
        .unwrap();
    assert_eq!(only_name[0].len(), 1);
    assert!(only_name[0].get("id").is_none());
}

#[test]
fn empty_selection_projects_every_column_in_schema_order() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice"]);

    let rows = tm.get_all_data("users", &[], &SelectedColumns::all()).unwrap();
    assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["id", "name"]);
}

#[test]
fn duplicate_selected_columns_collapse() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice"]);

    let rows = tm
        .get_all_data("users", &[], &SelectedColumns::new(["name", "id", "name"]))
        .unwrap();
    assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["name", "id"]);
}

#[test]
fn unknown_columns_are_errors_even_on_empty_tables() {
    let (_dir, tm) = test_manager();
    tm.create_table("users", &users_schema()).unwrap();

    let err = tm
        .get_all_data("users", &[Filter::eq("age", 3i64)], &all_columns())
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { ref column } if column == "age"));

    let err = tm
        .get_all_data("users", &[], &SelectedColumns::new(["id", "email"]))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { ref column } if column == "email"));
}

#[test]
fn filter_literal_must_match_column_type() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice"]);

    let err = tm
        .get_all_data("users", &[Filter::eq("id", "1")], &all_columns())
        .unwrap_err();
    assert!(matches!(err, StoreError::TypeMismatch { ref column, .. } if column == "id"));
}

#[test]
fn scanning_missing_table_is_not_found() {
    let (_dir, tm) = test_manager();
    let err = tm.get_all_data("users", &[], &all_columns()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn ordering_operators_compare_ints_and_text() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["dave", "alice", "carol", "bob"]);

    let gt = [Filter::new("id", ">", 2i64).unwrap()];
    assert_eq!(
        names(&tm.get_all_data("users", &gt, &all_columns()).unwrap()),
        vec!["carol", "bob"]
    );

    let lte = [Filter::with_op("id", CompareOp::Lte, 2i64)];
    assert_eq!(tm.count("users", &lte).unwrap(), 2);

    let before_c = [Filter::new("name", "<", "c").unwrap()];
    assert_eq!(
        names(&tm.get_all_data("users", &before_c, &all_columns()).unwrap()),
        vec!["alice", "bob"]
    );

    let not_bob = [Filter::new("name", "!=", "bob").unwrap()];
    assert_eq!(tm.count("users", &not_bob).unwrap(), 3);

    let range = [
        Filter::new("id", ">=", 2i64).unwrap(),
        Filter::new("id", "<", 4i64).unwrap(),
    ];
    assert_eq!(
        names(&tm.get_all_data("users", &range, &all_columns()).unwrap()),
        vec!["alice", "carol"]
    );
}

#[test]
fn unknown_operator_is_rejected_when_building_filter() {
    let err = Filter::new("name", "LIKE", "a%").unwrap_err();
    assert!(matches!(err, StoreError::UnsupportedOperator(ref op) if op == "LIKE"));
}

#[test]
fn null_cells_only_equal_null() {
    let (_dir, tm) = test_manager();
    tm.create_table("users", &users_schema()).unwrap();
    tm.insert("users", user(1, "a")).unwrap();
    tm.insert("users", vec![Value::Int(2), Value::Null]).unwrap();

    assert_eq!(tm.count("users", &[Filter::eq("name", Value::Null)]).unwrap(), 1);
    assert_eq!(
        tm.count("users", &[Filter::new("name", ">", "").unwrap()]).unwrap(),
        1
    );
    assert_eq!(
        tm.count("users", &[Filter::new("name", "!=", Value::Null).unwrap()]).unwrap(),
        1
    );
}

#[test]
fn repeated_scans_are_identical() {
    let (_dir, tm) = test_manager();
    seed_users(&tm, &["Alice", "Bob", "Alice"]);

    let filters = [Filter::eq("name", "Alice")];
    let selected = SelectedColumns::new(["name", "id"]);
    let first = tm.get_all_data("users", &filters, &selected).unwrap();
    let second = tm.get_all_data("users", &filters, &selected).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

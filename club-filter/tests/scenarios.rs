//! End-to-end compile scenarios for the portal's list endpoints.

use club_filter::{
    FieldSpec, Operator, Pagination, RawQuery, Reason, Registry, Resource, Value, compile,
};

fn users() -> FieldSpec {
    FieldSpec::builder()
        .equality_only(&["role", "status"])
        .any_operator(&["age", "name", "joined_at"])
        .build()
        .unwrap()
}

fn raw(pairs: &[(&str, &str)]) -> RawQuery {
    pairs.iter().copied().collect()
}

// =============================================================================
// Accepted queries
// =============================================================================

#[test]
fn range_filter_with_pagination() {
    let q = compile(
        &raw(&[
            ("age_gte", "18"),
            ("age_lte", "30"),
            ("status", "active"),
            ("page", "2"),
            ("limit", "5"),
        ]),
        &users(),
    )
    .unwrap();

    let age = q.filter.get("age");
    assert_eq!(age.len(), 2);
    assert!(age.iter().any(|c| c.op == Operator::Gte && c.value == Value::Int(18)));
    assert!(age.iter().any(|c| c.op == Operator::Lte && c.value == Value::Int(30)));
    assert_eq!(q.filter.get("status").len(), 1);
    assert_eq!(q.filter.get("status")[0].op, Operator::Eq);
    assert_eq!(q.filter.get("status")[0].value, Value::text("active"));
    assert_eq!(q.filter.len(), 3);
    assert_eq!(q.pagination, Pagination::new(2, 5));
    assert_eq!(q.pagination.skip(), 5);
}

#[test]
fn like_filter_with_page() {
    let spec = FieldSpec::builder().any_operator(&["title"]).build().unwrap();
    let q = compile(&raw(&[("title_like", "club"), ("page", "2")]), &spec).unwrap();

    assert_eq!(q.filter.len(), 1);
    assert_eq!(q.filter.get("title")[0].op, Operator::Like);
    assert_eq!(q.filter.get("title")[0].value, Value::text("club"));
    assert_eq!(q.pagination, Pagination::new(2, 10));
}

#[test]
fn no_filters_defaults_pagination() {
    let q = compile(&RawQuery::new(), &users()).unwrap();
    assert!(q.filter.is_empty());
    assert_eq!((q.pagination.page, q.pagination.limit), (1, 10));
}

#[test]
fn invalid_pagination_uses_defaults() {
    let q = compile(&raw(&[("page", "abc"), ("limit", "0")]), &users()).unwrap();
    assert_eq!((q.pagination.page, q.pagination.limit), (1, 10));
}

#[test]
fn like_value_is_not_coerced() {
    let q = compile(&raw(&[("name_like", "007")]), &users()).unwrap();
    assert_eq!(q.filter.get("name")[0].value, Value::text("007"));
}

#[test]
fn eq_value_is_typed() {
    let spec = FieldSpec::builder()
        .equality_only(&["is_read", "user_id", "kind"])
        .build()
        .unwrap();
    let q = compile(
        &raw(&[("is_read", "false"), ("user_id", "7"), ("kind", "mention")]),
        &spec,
    )
    .unwrap();

    assert_eq!(q.filter.get("is_read")[0].value, Value::Bool(false));
    assert_eq!(q.filter.get("user_id")[0].value, Value::Int(7));
    assert_eq!(q.filter.get("kind")[0].value, Value::text("mention"));
}

// =============================================================================
// Rejected queries
// =============================================================================

#[test]
fn operator_on_equality_only_attribute() {
    let spec = FieldSpec::builder().equality_only(&["status"]).build().unwrap();
    assert!(compile(&raw(&[("status", "active")]), &spec).is_ok());

    let err = compile(&raw(&[("status", "active"), ("status_ne", "pending")]), &spec)
        .unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].key, "status_ne");
    assert_eq!(
        err.errors[0].reason,
        Reason::IllegalOperatorForField {
            attribute: "status".into(),
            operator: Operator::Ne,
        }
    );
}

#[test]
fn non_numeric_range_value() {
    let err = compile(&raw(&[("age_gt", "abc")]), &users()).unwrap_err();
    assert_eq!(err.keys().collect::<Vec<_>>(), vec!["age_gt"]);
    assert_eq!(err.errors[0].reason.kind(), "value_coercion_failure");
}

#[test]
fn unknown_attribute_is_rejected() {
    let err = compile(&raw(&[("password", "x")]), &users()).unwrap_err();
    assert_eq!(
        err.get("password"),
        Some(&Reason::UnknownAttribute {
            attribute: "password".into()
        })
    );
}

#[test]
fn several_bad_keys_are_reported_together() {
    let err = compile(
        &raw(&[
            ("unknown_field", "x"),
            ("status_ne", "pending"),
            ("age", "21"),
        ]),
        &users(),
    )
    .unwrap_err();

    let mut keys: Vec<_> = err.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["status_ne", "unknown_field"]);
    assert!(err.to_string().contains("status_ne"));
    assert!(err.to_string().contains("unknown_field"));
}

#[test]
fn rejection_is_all_or_nothing() {
    let spec = users();
    let good = raw(&[("age_gte", "18"), ("status", "active")]);
    assert!(compile(&good, &spec).is_ok());

    let mut bad = good;
    bad.insert("age_lt", "soon");
    let err = compile(&bad, &spec).unwrap_err();
    assert_eq!(err.keys().collect::<Vec<_>>(), vec!["age_lt"]);
}

// =============================================================================
// Through the registry and the query string
// =============================================================================

#[test]
fn portal_events_listing() {
    let registry = Registry::portal().unwrap();
    let raw = RawQuery::parse(
        "status=open&start_date_gte=20250601&capacity_gt=50&title_like=summer+fair&sort=-start_date&limit=500",
    )
    .unwrap();

    let q = registry.compile(Resource::Events, &raw).unwrap().unwrap();
    assert_eq!(q.filter.len(), 4);
    assert_eq!(q.filter.get("title")[0].value, Value::text("summer fair"));
    assert_eq!(q.reserved("sort"), Some("-start_date"));
    // clamped to the endpoint's max_limit
    assert_eq!(q.pagination, Pagination::new(1, 100));
}

#[test]
fn portal_notifications_default_limit() {
    let registry = Registry::portal().unwrap();
    let q = registry
        .compile(Resource::Notifications, &RawQuery::parse("is_read=false").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(q.pagination.limit, 20);
}

#[test]
fn attachments_sort_is_not_reserved() {
    let registry = Registry::portal().unwrap();
    let err = registry
        .compile(Resource::Attachments, &RawQuery::parse("sort=file_name").unwrap())
        .unwrap()
        .unwrap_err();
    assert_eq!(err.keys().collect::<Vec<_>>(), vec!["sort"]);
}

#[test]
fn spec_is_shared_across_threads() {
    let registry = Registry::portal().unwrap();
    std::thread::scope(|s| {
        for page in 1..=4u32 {
            let registry = &registry;
            s.spawn(move || {
                let raw = RawQuery::parse(&format!("title_like=news&page={page}")).unwrap();
                let q = registry.compile(Resource::Posts, &raw).unwrap().unwrap();
                assert_eq!(q.pagination.page, page);
            });
        }
    });
}

//! End-to-end tests over whole tables.

use column_comment_core::{
    CollectingSink, ColumnType, CommentSource, DiagnosticKind, FieldDescriptor, Generator,
    LengthOverride, MySqlDialect, Severity, TableDescriptor, TypeName, effective_length, render,
};

// =============================================================================
// Reference statements
// =============================================================================

#[test]
fn test_user_name_statement() {
    let sink = CollectingSink::new();
    let field = FieldDescriptor::new("userName", TypeName::parse("String"), "user login name")
        .length(LengthOverride::Legacy(0));
    let entry = Generator::mysql()
        .process_field(&TableDescriptor::new("User"), &field, &sink)
        .unwrap();

    assert_eq!(
        entry.sql,
        "ALTER TABLE `User` CHANGE `user_name` `user_name` VARCHAR (255) COMMENT 'user login name'"
    );
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn test_created_at_statement() {
    let sink = CollectingSink::new();
    let field = FieldDescriptor::new(
        "createdAt",
        TypeName::parse("java.time.LocalDateTime"),
        "row creation time",
    )
    .not_null();
    let entry = Generator::mysql()
        .process_field(&TableDescriptor::new("Order"), &field, &sink)
        .unwrap();

    assert_eq!(
        entry.sql,
        "ALTER TABLE `Order` CHANGE `created_at` `created_at` NOT NULL DATETIME (6) COMMENT 'row creation time'"
    );
}

#[test]
fn test_large_text_ignores_length() {
    let sink = CollectingSink::new();
    let field = FieldDescriptor::new("body", TypeName::Text, "post body")
        .large_text()
        .length(LengthOverride::Explicit(4000));
    let entry = Generator::mysql()
        .process_field(&TableDescriptor::new("Post"), &field, &sink)
        .unwrap();

    assert_eq!(entry.statement.column_type, ColumnType::Longtext);
    assert_eq!(
        entry.sql,
        "ALTER TABLE `Post` CHANGE `body` `body` LONGTEXT COMMENT 'post body'"
    );
}

#[test]
fn test_lengthless_types_never_render_length() {
    for (ty, length) in [
        ("f32", 10),
        ("f64", 255),
        ("Decimal", 19),
        ("NaiveDate", 0),
        ("NaiveTime", 8),
    ] {
        let sink = CollectingSink::new();
        let field = FieldDescriptor::new("value", TypeName::parse(ty), "value")
            .length(LengthOverride::Legacy(length));
        let entry = Generator::mysql()
            .process_field(&TableDescriptor::new("T"), &field, &sink)
            .unwrap();
        assert!(!entry.sql.contains('('), "{ty}: {}", entry.sql);
    }
}

#[test]
fn test_effective_length_properties() {
    assert_eq!(effective_length(ColumnType::Bigint, 255), 20);
    assert_eq!(effective_length(ColumnType::Int, 255), 11);
    assert_eq!(effective_length(ColumnType::Bit, 255), 1);
    assert_eq!(effective_length(ColumnType::Varchar, 0), 255);
}

#[test]
fn test_nullability_inversion() {
    let not_null = render("t", "c", ColumnType::Int, false, 11, "x");
    let nullable = render("t", "c", ColumnType::Int, true, 11, "x");
    assert!(not_null.contains("NOT NULL"));
    assert!(!nullable.contains("NOT NULL"));
}

// =============================================================================
// Whole-pass behaviour
// =============================================================================

struct Member;

impl CommentSource for Member {
    fn table() -> TableDescriptor {
        TableDescriptor::resolve("Member", Some("member"), None)
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", TypeName::Int64, "member id").not_null(),
            FieldDescriptor::new("status", TypeName::Other("MemberStatus".into()), "status")
                .enumerated(),
            FieldDescriptor::new("profile", TypeName::Other("Profile".into()), "profile"),
            FieldDescriptor::new("point", TypeName::Int32, "point")
                .length(LengthOverride::Legacy(255)),
        ]
    }
}

#[test]
fn test_pass_reports_and_continues() {
    let sink = CollectingSink::new();
    let comments = Generator::mysql().run_source::<Member>(&sink).unwrap();

    assert_eq!(comments.table.name, "member");
    assert_eq!(comments.len(), 3);
    assert_eq!(
        comments.get("status").unwrap().sql,
        "ALTER TABLE `member` CHANGE `status` `status` VARCHAR (255) COMMENT 'status'"
    );
    assert_eq!(
        comments.get("point").unwrap().sql,
        "ALTER TABLE `member` CHANGE `point` `point` INT (11) COMMENT 'point'"
    );

    let diagnostics = sink.into_diagnostics();
    let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        [DiagnosticKind::UnsupportedType, DiagnosticKind::AmbiguousLength]
    );
}

#[test]
fn test_rendering_is_idempotent() {
    let first = Generator::mysql().run_source::<Member>(&CollectingSink::new());
    let second = Generator::new(MySqlDialect::new()).run_source::<Member>(&CollectingSink::new());
    assert_eq!(first, second);
}

#[test]
fn test_parallel_tables_share_one_sink() {
    let sink = CollectingSink::new();
    let generator = Generator::mysql();
    let results: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| generator.run_source::<Member>(&sink).map_or(0, |t| t.len())))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(results, [3, 3, 3, 3]);
    assert_eq!(sink.count(Severity::Error), 4);
    assert_eq!(sink.count(Severity::Warning), 4);
}

//! Building queries through the public API the way data-access code does.

use pgboil::{
    BoilError, JoinKind, Param, Query, Statement, params, set_from, set_having,
    set_group_by, set_join, set_last_where_as_or, set_limit, set_offset, set_order_by, set_select,
    set_sql, set_statement, set_update, set_where,
};

/// Paged listing with optional filters, the common generated-code shape.
fn list_videos(q: &mut Query, owner: Option<i64>, search: Option<&'static str>, page: i64) {
    set_from(q, "videos v");
    set_select(q, ["v.id", "v.title"]);
    set_join(q, JoinKind::Inner, "u.id = v.owner_id", params![]);
    if let Some(owner) = owner {
        set_where(q, "v.owner_id = $1", params![owner]);
    }
    if let Some(search) = search {
        set_where(q, "v.title ILIKE $1", params![search]);
        set_where(q, "v.description ILIKE $1", params![search]);
        set_last_where_as_or(q);
    }
    set_order_by(q, "v.created_at DESC");
    set_limit(q, 20);
    set_offset(q, (page - 1) * 20);
}

#[test]
fn optional_filters_compose() {
    let mut q = Query::new();
    list_videos(&mut q, Some(42), Some("%cat%"), 3);

    let built = q.render().unwrap();
    assert_eq!(
        built.sql,
        "SELECT v.id, v.title FROM videos v INNER JOIN ON u.id = v.owner_id \
         WHERE v.owner_id = $1 AND v.title ILIKE $2 OR v.description ILIKE $3 \
         ORDER BY v.created_at DESC LIMIT 20 OFFSET 40"
    );
    assert_eq!(format!("{:?}", built.params), r#"[42, "%cat%", "%cat%"]"#);
    assert_eq!(built.params_ref().len(), 3);
}

#[test]
fn first_page_without_filters() {
    let mut q = Query::new();
    list_videos(&mut q, None, None, 1);

    let built = q.render().unwrap();
    assert_eq!(
        built.sql,
        "SELECT v.id, v.title FROM videos v INNER JOIN ON u.id = v.owner_id \
         ORDER BY v.created_at DESC LIMIT 20"
    );
    assert!(built.params.is_empty());
}

#[test]
fn cloned_query_renders_independently() {
    let mut base = Query::new();
    set_from(&mut base, "orders");
    set_where(&mut base, "status = $1", params!["open"]);

    let mut counted = base.clone();
    set_select(&mut counted, ["user_id", "COUNT(*)"]);
    set_group_by(&mut counted, "user_id");
    set_having(&mut counted, "COUNT(*) >= $1", params![3_i64]);

    assert_eq!(base.to_sql().unwrap(), "SELECT * FROM orders WHERE status = $1");
    assert_eq!(
        counted.to_sql().unwrap(),
        "SELECT user_id, COUNT(*) FROM orders WHERE status = $1 \
         GROUP BY user_id HAVING COUNT(*) >= $2"
    );
}

#[test]
fn bulk_update_by_ids() {
    let mut q = Query::new();
    set_from(&mut q, "accounts");
    set_update(
        &mut q,
        [
            ("disabled", Param::new(true)),
            ("reason", Param::new("fraud")),
        ],
    );
    set_where(&mut q, "id = ANY($1)", params![vec![1_i64, 2, 3]]);

    let built = q.render().unwrap();
    assert_eq!(
        built.sql,
        "UPDATE accounts SET disabled = $1, reason = $2 WHERE id = ANY($3)"
    );
    assert_eq!(format!("{:?}", built.params), r#"[true, "fraud", [1, 2, 3]]"#);
}

#[test]
fn statement_kind_is_explicit() {
    let mut q = Query::new();
    set_from(&mut q, "t");
    set_statement(&mut q, Statement::Delete);
    assert!(q.statement().is_delete());
    assert_eq!(q.to_sql().unwrap(), "DELETE FROM t");
}

#[test]
fn raw_mode_trusts_caller_numbering() {
    let mut q = Query::new();
    set_from(&mut q, "ignored");
    set_sql(
        &mut q,
        "WITH x AS (SELECT $1::int AS a) SELECT a FROM x WHERE a > $2",
        params![1_i32, 0_i32],
    );

    let (sql, args) = q.render().unwrap().into_parts();
    assert_eq!(sql, "WITH x AS (SELECT $1::int AS a) SELECT a FROM x WHERE a > $2");
    assert_eq!(args.len(), 2);
}

#[test]
fn errors_display_context() {
    let mut q = Query::new();
    set_from(&mut q, "t");
    set_where(&mut q, "a = $1 AND b = $2", params![1_i32]);

    let err = q.render().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Argument count mismatch in WHERE `a = $1 AND b = $2`: placeholders [1, 2] do not match 1 argument(s)"
    );

    let err = Query::new().render().unwrap_err();
    assert!(matches!(err, BoilError::MissingFromClause));
}

/// Log output captured in memory.
#[cfg(feature = "tracing")]
#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(feature = "tracing")]
impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(feature = "tracing")]
impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "tracing")]
#[test]
fn render_emits_tracing_event() {
    use pgboil::RenderConfig;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    let mut q = Query::new();
    set_from(&mut q, "t");
    set_where(&mut q, "id = $1", params![1_i32]);

    let config = RenderConfig::new()
        .level(tracing::Level::INFO)
        .max_sql_length(10);
    let built = tracing::subscriber::with_default(subscriber, || q.render_with(&config).unwrap());
    assert_eq!(built.sql, "SELECT * FROM t WHERE id = $1");

    let out = logs.contents();
    let line = out
        .lines()
        .find(|l| l.contains("rendered query"))
        .unwrap_or_else(|| panic!("no render event in {out:?}"));
    assert!(line.contains("INFO"), "{line}");
    assert!(line.contains("pgboil.sql"), "{line}");
    assert!(line.contains(r#"statement="SELECT""#), "{line}");
    assert!(line.contains("raw=false"), "{line}");
    assert!(line.contains("param_count=1"), "{line}");
    assert!(line.contains("sql=SELECT * F..."), "{line}");
    assert!(!line.contains("WHERE"), "{line}");
}

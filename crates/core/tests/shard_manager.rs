mod common;

use common::{member_row, row, Call, MockConnection};
use fedsql_core::shard::{PARTITION_CATALOG_SQL, SELECT_ROOT_SQL};
use fedsql_core::{
    ConnectionParams, DistributionValue, SelectOptions, ShardManager, ShardingError,
    SqlAzureShardManager, SqlValue,
};
use serde_json::json;

fn manager() -> SqlAzureShardManager<MockConnection> {
    SqlAzureShardManager::new(MockConnection::new("abc", "foo", false)).unwrap()
}

#[test]
fn test_missing_federation_name_fails_construction() {
    let mut params = ConnectionParams::new();
    params.insert("distributionKey".into(), json!("foo"));
    let err = SqlAzureShardManager::new(MockConnection::with_params(params)).unwrap_err();
    assert!(matches!(err, ShardingError::MissingFederationName));
    assert!(err.is_configuration_error());
}

#[test]
fn test_missing_distribution_key_fails_construction() {
    let mut params = ConnectionParams::new();
    params.insert("federationName".into(), json!("abc"));
    let err = SqlAzureShardManager::new(MockConnection::with_params(params)).unwrap_err();
    assert!(matches!(err, ShardingError::MissingDistributionKey));
}

#[test]
fn test_unsafe_federation_name_fails_construction() {
    let conn = MockConnection::new("abc; DROP TABLE users", "foo", false);
    let err = SqlAzureShardManager::new(conn).unwrap_err();
    assert!(matches!(err, ShardingError::InvalidIdentifier(_)));
    assert!(err.is_configuration_error());

    let conn = MockConnection::new("abc", &"k".repeat(200), false);
    let err = SqlAzureShardManager::new(conn).unwrap_err();
    assert!(matches!(err, ShardingError::InvalidIdentifier(_)));
}

#[test]
fn test_new_manager_starts_at_root() {
    let sm = manager();
    assert_eq!(sm.current_distribution_value(), None);
    assert_eq!(sm.config().federation_name, "abc");
    assert_eq!(sm.config().distribution_key, "foo");
    assert!(!sm.config().filtering_enabled);
    assert!(sm.connection().calls.is_empty());
}

#[test]
fn test_select_global_during_transaction_fails() {
    let mut sm = manager();
    sm.select_shard(SqlValue::Int(5)).unwrap();
    sm.connection_mut().transaction_active = true;

    let err = sm.select_global().unwrap_err();
    assert!(matches!(err, ShardingError::TransactionActive));
    assert_eq!(sm.connection().executed().len(), 1);
    assert_eq!(
        sm.current_distribution_value(),
        Some(&DistributionValue::Int(5))
    );
}

#[test]
fn test_select_global() {
    let mut sm = manager();
    sm.select_shard(SqlValue::Int(5)).unwrap();
    sm.select_global().unwrap();

    assert_eq!(
        sm.connection().executed().last(),
        Some(&(SELECT_ROOT_SQL.to_string(), vec![]))
    );
    assert_eq!(sm.connection().executed_sql()[1], "USE FEDERATION ROOT WITH RESET");
    assert_eq!(sm.current_distribution_value(), None);
}

#[test]
fn test_select_shard_rejects_non_scalar_values() {
    let mut sm = manager();
    for value in [SqlValue::Bool(true), SqlValue::Bool(false), SqlValue::Null] {
        let err = sm.select_shard(value).unwrap_err();
        assert!(matches!(err, ShardingError::InvalidDistributionValue(_)));
    }
    assert!(sm.connection().calls.is_empty());
    assert_eq!(sm.current_distribution_value(), None);
}

#[test]
fn test_select_shard() {
    let mut sm = manager();
    sm.select_shard(SqlValue::Int(1234)).unwrap();

    assert_eq!(
        sm.connection().executed(),
        vec![(
            "USE FEDERATION abc (foo = ?) WITH RESET, FILTERING = OFF".to_string(),
            vec![SqlValue::Int(1234)]
        )]
    );
    assert_eq!(
        sm.current_distribution_value(),
        Some(&DistributionValue::Int(1234))
    );
}

#[test]
fn test_select_shard_with_filtering_enabled() {
    let mut sm =
        SqlAzureShardManager::new(MockConnection::new("abc", "foo", true)).unwrap();
    sm.select_shard(SqlValue::from("ALFKI")).unwrap();

    assert_eq!(
        sm.connection().executed_sql(),
        vec!["USE FEDERATION abc (foo = ?) WITH RESET, FILTERING = ON".to_string()]
    );
}

#[test]
fn test_select_shard_during_transaction_fails() {
    let mut sm = manager();
    sm.connection_mut().transaction_active = true;

    let err = sm.select_shard(SqlValue::Int(1)).unwrap_err();
    assert!(matches!(err, ShardingError::TransactionActive));
    assert!(sm.connection().calls.is_empty());
}

#[test]
fn test_failed_switch_keeps_previous_value() {
    let mut conn = MockConnection::new("abc", "foo", false);
    conn.fail_execute_at(1, "Federation member not found");
    let mut sm = SqlAzureShardManager::new(conn).unwrap();

    sm.select_shard(SqlValue::Int(1)).unwrap();
    let err = sm.select_shard(SqlValue::Int(2)).unwrap_err();

    assert!(matches!(err, ShardingError::Database(ref e) if e.message == "Federation member not found"));
    assert_eq!(
        sm.current_distribution_value(),
        Some(&DistributionValue::Int(1))
    );
}

#[test]
fn test_select_shards_is_not_implemented() {
    let mut sm = manager();
    let err = sm
        .select_shards(&[SqlValue::Int(1), SqlValue::Int(2)])
        .unwrap_err();
    assert!(matches!(err, ShardingError::NotImplemented(_)));
    assert!(sm.connection().calls.is_empty());
}

#[test]
fn test_get_shards() {
    let mut sm = manager();
    sm.connection_mut()
        .push_rows(vec![member_row(1, "0", "100"), member_row(2, "100", "")]);

    let shards = sm.get_shards().unwrap();
    assert_eq!(shards.len(), 2);
    assert_eq!(shards[0].id, SqlValue::Int(1));
    assert_eq!(shards[1].range_low, SqlValue::from("100"));
    assert_eq!(shards[0].distribution_key, "user_id");

    assert_eq!(
        sm.connection().calls,
        vec![Call::Fetch(
            PARTITION_CATALOG_SQL.to_string(),
            vec![SqlValue::from("abc")]
        )]
    );
    assert!(PARTITION_CATALOG_SQL.contains("sys.federation_member_distributions"));
    assert!(PARTITION_CATALOG_SQL.contains("sys.federations"));
}

#[test]
fn test_query_all_concatenates_and_restores_root() {
    let mut sm = manager();
    let conn = sm.connection_mut();
    conn.push_rows(vec![member_row(1, "0", "100"), member_row(2, "100", "200")]);
    conn.push_rows(vec![
        row(&[("name", SqlValue::from("a"))]),
        row(&[("name", SqlValue::from("b"))]),
    ]);
    conn.push_rows(vec![row(&[("name", SqlValue::from("c"))])]);

    let rows = sm
        .query_all("SELECT name FROM users WHERE active = ?", &[SqlValue::Int(1)])
        .unwrap();

    let names: Vec<_> = rows.iter().map(|r| r["name"].to_string()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let switch = "USE FEDERATION abc (foo = ?) WITH RESET, FILTERING = OFF".to_string();
    let query = "SELECT name FROM users WHERE active = ?".to_string();
    assert_eq!(
        sm.connection().calls[1..],
        [
            Call::Execute(switch.clone(), vec![SqlValue::from("0")]),
            Call::Fetch(query.clone(), vec![SqlValue::Int(1)]),
            Call::Execute(switch, vec![SqlValue::from("100")]),
            Call::Fetch(query, vec![SqlValue::Int(1)]),
            Call::Execute(SELECT_ROOT_SQL.to_string(), vec![]),
        ]
    );
    assert_eq!(sm.current_distribution_value(), None);
}

#[test]
fn test_query_all_restores_previous_member() {
    let mut sm = manager();
    sm.select_shard(SqlValue::Int(42)).unwrap();
    sm.connection_mut()
        .push_rows(vec![member_row(1, "0", "100")]);

    sm.query_all("SELECT 1", &[]).unwrap();

    let executed = sm.connection().executed();
    assert_eq!(executed.last().map(|(_, p)| p.clone()), Some(vec![SqlValue::Int(42)]));
    assert_eq!(
        sm.current_distribution_value(),
        Some(&DistributionValue::Int(42))
    );
}

#[test]
fn test_query_all_without_members_still_restores() {
    let mut sm = manager();
    sm.select_shard(SqlValue::from("ALFKI")).unwrap();

    let rows = sm.query_all("SELECT 1", &[]).unwrap();
    assert!(rows.is_empty());

    let executed = sm.connection().executed();
    assert_eq!(executed.len(), 2);
    assert_eq!(executed[1].1, vec![SqlValue::from("ALFKI")]);
    assert_eq!(
        sm.current_distribution_value(),
        Some(&DistributionValue::Text("ALFKI".into()))
    );
}

#[test]
fn test_query_all_restores_overridden_federation() {
    let mut sm = manager();
    let options = SelectOptions::default()
        .federation("Orders")
        .distribution_key("order_id");
    sm.select_shard_with(SqlValue::Int(5), &options).unwrap();

    sm.query_all("SELECT 1", &[]).unwrap();

    let executed = sm.connection().executed();
    assert_eq!(executed.len(), 2);
    assert_eq!(executed[0], executed[1]);
    assert_eq!(
        executed[1],
        (
            "USE FEDERATION Orders (order_id = ?) WITH RESET, FILTERING = OFF".to_string(),
            vec![SqlValue::Int(5)]
        )
    );
    assert_eq!(sm.current_federation(), Some("Orders"));
}

#[test]
fn test_query_all_restores_overridden_filtering_after_fan_out() {
    let mut sm = manager();
    sm.select_shard_with(SqlValue::Int(7), &SelectOptions::default().filtering(true))
        .unwrap();
    sm.connection_mut()
        .push_rows(vec![member_row(1, "0", "100")]);

    sm.query_all("SELECT 1", &[]).unwrap();

    let sql = sm.connection().executed_sql();
    assert_eq!(sql[1], "USE FEDERATION abc (foo = ?) WITH RESET, FILTERING = OFF");
    assert_eq!(
        sql.last().map(String::as_str),
        Some("USE FEDERATION abc (foo = ?) WITH RESET, FILTERING = ON")
    );
    assert_eq!(
        sm.current_distribution_value(),
        Some(&DistributionValue::Int(7))
    );
}

#[test]
fn test_query_all_failure_restores_and_reports_loop_error() {
    let mut sm = manager();
    let conn = sm.connection_mut();
    conn.push_rows(vec![member_row(1, "0", "100"), member_row(2, "100", "200")]);
    conn.push_rows(vec![row(&[("name", SqlValue::from("a"))])]);
    conn.push_fetch_error("Invalid object name 'users'");

    let err = sm.query_all("SELECT name FROM users", &[]).unwrap_err();
    assert!(matches!(err, ShardingError::Database(ref e) if e.message == "Invalid object name 'users'"));

    assert_eq!(
        sm.connection().executed_sql().last().map(String::as_str),
        Some(SELECT_ROOT_SQL)
    );
    assert_eq!(sm.current_distribution_value(), None);
}

#[test]
fn test_query_all_reports_loop_error_when_restore_also_fails() {
    let mut conn = MockConnection::new("abc", "foo", false);
    conn.push_rows(vec![member_row(1, "0", "100")]);
    conn.push_fetch_error("timeout");
    conn.fail_execute_at(1, "connection lost");
    let mut sm = SqlAzureShardManager::new(conn).unwrap();

    let err = sm.query_all("SELECT 1", &[]).unwrap_err();
    assert!(matches!(err, ShardingError::Database(ref e) if e.message == "timeout"));
}

#[test]
fn test_query_all_reports_restore_error_after_successful_loop() {
    let mut conn = MockConnection::new("abc", "foo", false);
    conn.push_rows(vec![member_row(1, "0", "100")]);
    conn.fail_execute_at(1, "connection lost");
    let mut sm = SqlAzureShardManager::new(conn).unwrap();

    let err = sm.query_all("SELECT 1", &[]).unwrap_err();
    assert!(matches!(err, ShardingError::Database(ref e) if e.message == "connection lost"));
}

#[test]
fn test_router_works_through_a_borrowed_connection() {
    let mut conn = MockConnection::new("abc", "foo", false);
    {
        let mut sm = SqlAzureShardManager::new(&mut conn).unwrap();
        sm.select_shard(SqlValue::Int(3)).unwrap();
    }
    assert_eq!(conn.executed().len(), 1);
}

#[test]
fn test_into_inner_returns_connection() {
    let mut sm = manager();
    sm.select_global().unwrap();
    let conn = sm.into_inner();
    assert_eq!(conn.executed_sql(), vec![SELECT_ROOT_SQL.to_string()]);
}

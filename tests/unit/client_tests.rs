use chrono::{NaiveDate, TimeZone, Utc};
use quakequery::{QuakeQuery, QueryError};

use crate::common::mocks::{MockHttpTransport, MockTransportError};
use crate::common::test_helpers::{TEST_BASE_URL, fixture_client, serve_fixture};

#[test]
fn test_construction_fetches_schema_once() {
    let (client, transport) = fixture_client();

    assert_eq!(client.params().len(), 10);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(
        transport.request_log()[0].as_str(),
        "http://localhost:8080/fdsnws/event/1/application.wadl"
    );
}

#[test]
fn test_construction_fails_when_schema_unreachable() {
    let result = QuakeQuery::with_transport(MockHttpTransport::failing(), TEST_BASE_URL);
    assert!(matches!(result, Err(QueryError::SchemaFetch { .. })));
}

#[test]
fn test_describe_unknown_parameter() {
    let (client, _) = fixture_client();

    match client.describe("magnitude") {
        Err(QueryError::UnknownParameter { name, valid }) => {
            assert_eq!(name, "magnitude");
            assert_eq!(valid.len(), 10);
            assert!(valid.contains(&"minmagnitude".to_string()));
        }
        other => panic!("Expected UnknownParameter, got {:?}", other),
    }
}

#[test]
fn test_execute_overrides_format() {
    let (mut client, transport) = fixture_client();

    client
        .set_format("csv")
        .unwrap()
        .occur_between("2021-11-12", None::<&str>)
        .unwrap();
    let response = client.execute().unwrap();

    assert_eq!(response.status, 200);
    let sent = transport.request_log().last().cloned().unwrap();
    assert_eq!(sent.path(), "/fdsnws/event/1/query");
    let pairs: Vec<(String, String)> = sent.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("format".to_string(), "geojson".to_string())));
    assert!(!pairs.contains(&("format".to_string(), "csv".to_string())));
}

#[test]
fn test_execute_sends_accumulated_dates() {
    let (mut client, transport) = fixture_client();
    let start = Utc.with_ymd_and_hms(2021, 11, 12, 0, 0, 0).unwrap();

    client
        .occur_between(start, Some("2021-11-13"))
        .unwrap()
        .updated_after(NaiveDate::from_ymd_opt(2021, 11, 14).unwrap())
        .unwrap();
    client.execute().unwrap();

    let sent = transport.request_log().last().cloned().unwrap();
    let pairs: Vec<(String, String)> = sent.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("endtime".to_string(), "2021-11-13".to_string()),
            ("format".to_string(), "geojson".to_string()),
            ("starttime".to_string(), "2021-11-12T00:00:00".to_string()),
            ("updatedafter".to_string(), "2021-11-14T00:00:00".to_string()),
        ]
    );
}

#[test]
fn test_open_ended_range_has_no_endtime() {
    let (mut client, transport) = fixture_client();

    client.occur_between("2021-11-12", None::<&str>).unwrap();
    client.execute().unwrap();

    let sent = transport.request_log().last().cloned().unwrap();
    assert!(sent.query_pairs().all(|(key, _)| key != "endtime"));
}

#[test]
fn test_failed_validation_sends_nothing() {
    let (mut client, transport) = fixture_client();

    assert!(client.occur_between("2021-13-01", None::<&str>).is_err());
    assert!(client.set_format("pdf").is_err());
    assert!(client.updated_after(3.5).is_err());

    assert!(client.query().is_empty());
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn test_transport_error_propagates_unwrapped() {
    let transport = serve_fixture(MockHttpTransport::new().with_failing_queries());
    let mut client = QuakeQuery::with_transport(transport.clone(), TEST_BASE_URL).unwrap();

    client.occur_between("2021-11-12", None::<&str>).unwrap();
    let error: MockTransportError = client.execute().unwrap_err();

    assert!(error.to_string().contains("connection refused"));
    assert_eq!(transport.request_count(), 2);
}

use quakequery::{DEFAULT_DATA_TYPE, QueryError, SchemaLoader, parse_schema};
use url::Url;

use crate::common::mocks::MockHttpTransport;
use crate::common::test_helpers::{TEST_BASE_URL, TestFixtures, fixture_transport};

#[test]
fn test_fixture_parameters_in_document_order() {
    let registry = parse_schema(&TestFixtures::new().application_wadl_content()).unwrap();

    assert_eq!(
        registry.names(),
        [
            "starttime",
            "endtime",
            "updatedafter",
            "minlatitude",
            "maxlatitude",
            "minmagnitude",
            "limit",
            "format",
            "orderby",
            "includeallorigins"
        ]
    );
}

#[test]
fn test_fixture_enumerated_parameter() {
    let registry = parse_schema(&TestFixtures::new().application_wadl_content()).unwrap();
    let format = registry.describe("format").unwrap();

    assert_eq!(format.data_type, DEFAULT_DATA_TYPE);
    assert_eq!(format.default.as_deref(), Some("quakeml"));
    assert_eq!(
        format.allowed_values.as_deref().unwrap(),
        ["csv", "geojson", "kml", "quakeml", "text", "xml"]
    );
}

#[test]
fn test_fixture_typed_parameter_with_default() {
    let registry = parse_schema(&TestFixtures::new().application_wadl_content()).unwrap();
    let minlatitude = registry.describe("minlatitude").unwrap();

    assert_eq!(minlatitude.data_type, "xs:double");
    assert_eq!(minlatitude.default.as_deref(), Some("-90"));
    assert!(!minlatitude.is_enumerated());
}

#[test]
fn test_values_stop_at_next_header() {
    let doc = r#"<application xmlns="http://wadl.dev.java.net/2009/02">
  <param name="alertlevel"><option value="green"/><option value="yellow"/></param>
  <param name="eventtype"><option value="earthquake"/></param>
</application>"#;

    let registry = parse_schema(doc).unwrap();
    assert_eq!(
        registry.describe("alertlevel").unwrap().allowed_values,
        Some(vec!["green".to_string(), "yellow".to_string()])
    );
    assert_eq!(
        registry.describe("eventtype").unwrap().allowed_values,
        Some(vec!["earthquake".to_string()])
    );
}

#[test]
fn test_minmagnitude_without_type_or_default() {
    let doc = r#"<application xmlns="http://wadl.dev.java.net/2009/02">
  <param name="minmagnitude"><option value="1"/><option value="2"/></param>
</application>"#;

    let registry = parse_schema(doc).unwrap();
    let minmagnitude = registry.describe("minmagnitude").unwrap();

    assert_eq!(minmagnitude.data_type, "xs:string");
    assert_eq!(minmagnitude.default, None);
    assert_eq!(
        minmagnitude.allowed_values,
        Some(vec!["1".to_string(), "2".to_string()])
    );
}

#[test]
fn test_prefixed_namespace_is_recognised() {
    let doc = r#"<wadl:application xmlns:wadl="http://wadl.dev.java.net/2009/02">
  <wadl:param name="catalog" type="xs:string"/>
</wadl:application>"#;

    let registry = parse_schema(doc).unwrap();
    assert_eq!(registry.names(), ["catalog"]);
}

#[test]
fn test_repeated_parameter_replaced_in_place() {
    let doc = r#"<application xmlns="http://wadl.dev.java.net/2009/02">
  <param name="a" type="xs:integer"/>
  <param name="b"/>
  <param name="a" type="xs:date"/>
</application>"#;

    let registry = parse_schema(doc).unwrap();
    assert_eq!(registry.names(), ["a", "b"]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.describe("a").unwrap().data_type, "xs:date");
    assert_eq!(registry.describe("b").unwrap().data_type, DEFAULT_DATA_TYPE);
}

#[test]
fn test_orphan_value_is_parse_error() {
    let doc = r#"<application xmlns="http://wadl.dev.java.net/2009/02">
  <param value="orphan"/>
</application>"#;

    match parse_schema(doc) {
        Err(QueryError::SchemaParse { details }) => assert!(details.contains("orphan")),
        other => panic!("Expected SchemaParse, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_loader_fetches_from_transport() {
    let transport = fixture_transport();
    let url = Url::parse(&format!("{}application.wadl", TEST_BASE_URL)).unwrap();

    let registry = SchemaLoader::new(&transport).load(&url).unwrap();

    assert_eq!(registry.len(), 10);
    assert_eq!(transport.request_log(), vec![url]);
}

#[test]
fn test_loader_missing_document_is_fetch_error() {
    let transport = MockHttpTransport::new();
    let url = Url::parse(&format!("{}application.wadl", TEST_BASE_URL)).unwrap();

    let result = SchemaLoader::new(&transport).load(&url);
    assert!(matches!(result, Err(QueryError::SchemaFetch { .. })));
}

use std::path::PathBuf;

use quakequery::QuakeQuery;

use super::mocks::MockHttpTransport;

/// Base URL the mock service is mounted under
pub const TEST_BASE_URL: &str = "http://localhost:8080/fdsnws/event/1/";

/// Test fixture paths
pub struct TestFixtures {
    pub fixtures_dir: PathBuf,
}

impl TestFixtures {
    pub fn new() -> Self {
        let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures");

        Self { fixtures_dir }
    }

    pub fn application_wadl(&self) -> PathBuf {
        self.fixtures_dir.join("application.wadl")
    }

    pub fn application_wadl_content(&self) -> String {
        std::fs::read_to_string(self.application_wadl()).expect("Failed to read WADL fixture")
    }
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

/// A mock transport serving the fixture WADL under [`TEST_BASE_URL`]
pub fn fixture_transport() -> MockHttpTransport {
    serve_fixture(MockHttpTransport::new())
}

/// Register the fixture WADL on an existing mock transport
pub fn serve_fixture(transport: MockHttpTransport) -> MockHttpTransport {
    transport.add_document(
        &format!("{}application.wadl", TEST_BASE_URL),
        &TestFixtures::new().application_wadl_content(),
    );
    transport
}

/// A client built over [`fixture_transport`]
pub fn fixture_client() -> (QuakeQuery<MockHttpTransport>, MockHttpTransport) {
    let transport = fixture_transport();
    let client = QuakeQuery::with_transport(transport.clone(), TEST_BASE_URL)
        .expect("Failed to build client from fixture schema");
    (client, transport)
}

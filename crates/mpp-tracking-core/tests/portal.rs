//! Login, search and detail flows against a mock portal

use mpp_tracking_core::{
    Credentials, PortalSession, SearchQuery, TrackingError, TrackingScraper,
};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "tok123abc";

fn login_page() -> String {
    format!(
        r#"<html><head><title>Login</title></head><body>
            <form method="POST" action="/sim/login">
                <input type="hidden" name="_token" value="{}">
                <input name="username"><input type="password" name="password">
            </form>
        </body></html>"#,
        TOKEN
    )
}

fn results_page(rows: &str) -> String {
    format!(
        r#"<html><body>
            <table id="tabel1">
                <thead><tr><th>Aksi</th><th>No</th></tr></thead>
                <tbody>{}</tbody>
            </table>
        </body></html>"#,
        rows
    )
}

fn row(detail_href: Option<&str>, number: &str, name: &str, stage: &str) -> String {
    let detail = detail_href
        .map(|href| format!(r#"<a href="{}">Detail</a>"#, href))
        .unwrap_or_default();
    format!(
        r#"<tr><td>{}</td><td>{}</td><td>Izin Usaha Mikro</td><td>Kec. A</td><td>{}</td>
           <td>Jl. Merdeka</td><td>+62 812-3456-7890</td><td>10-11-2025</td><td>{}</td></tr>"#,
        detail, number, name, stage
    )
}

fn credentials(server: &MockServer) -> Credentials {
    Credentials::new(&server.uri(), "operator", "secret", "7").unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sim"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sim/login"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/sim", server.uri())),
        )
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer) -> PortalSession {
    mount_login(server).await;
    TrackingScraper::new()
        .login(&credentials(server))
        .await
        .expect("login should succeed")
}

#[tokio::test]
async fn login_follows_redirect_to_home() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sim"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sim/login"))
        .and(body_string_contains(format!("_token={}", TOKEN)))
        .and(body_string_contains("db_name=7"))
        .and(body_string_contains("username=operator"))
        .and(body_string_contains("password=secret"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/sim", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = TrackingScraper::new().login(&credentials(&server)).await;
    assert!(session.is_ok());
    assert_eq!(session.unwrap().base_url(), server.uri());
}

#[tokio::test]
async fn login_accepts_marker_in_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sim"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sim/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Sim MPP - Beranda</title></head></html>"),
        )
        .mount(&server)
        .await;

    let result = TrackingScraper::new().login(&credentials(&server)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn login_without_token_does_not_post() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sim"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Maintenance</body></html>"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sim/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = TrackingScraper::new().login(&credentials(&server)).await;
    assert!(matches!(result, Err(TrackingError::CsrfTokenMissing)));
}

#[tokio::test]
async fn login_rejected_by_portal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sim"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sim/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Username atau password salah</body></html>"),
        )
        .mount(&server)
        .await;

    let result = TrackingScraper::new().login(&credentials(&server)).await;
    assert!(matches!(result, Err(TrackingError::AuthenticationFailed)));
}

#[tokio::test]
async fn search_enriches_issued_and_rejected_rows() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    let rows = format!(
        "{}{}{}{}",
        row(Some("/sim/permohonan/detail/1"), "PRM-001", "Budi Santoso", "SK DITERBITKAN"),
        row(Some("sim/permohonan/detail/2"), "PRM-002", "Siti Aminah", "DITOLAK"),
        row(None, "PRM-003", "Andi", "VERIFIKASI"),
        "<tr><td>ringkasan</td><td>3 data</td></tr>",
    );

    Mock::given(method("GET"))
        .and(path("/sim/permohonan"))
        .and(query_param("cari", "Budi"))
        .and(query_param("status", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&rows)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan/detail/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><embed type="application/pdf" src="/storage/sk/1.pdf"></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan"))
        .and(query_param("cari", "Siti Aminah"))
        .and(query_param("status", "tolak"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(
            r#"<tr><td>1</td><td>PRM-002</td><td>Izin</td><td>Kec</td><td>Siti Aminah</td>
               <td>Jl</td><td>0812</td><td>09-11-2025</td><td>DITOLAK</td><td>Berkas tidak lengkap</td></tr>"#,
        )))
        .mount(&server)
        .await;

    let records = session.search(&SearchQuery::new("Budi")).await.unwrap();
    assert_eq!(records.len(), 3);

    let issued = &records[0];
    assert_eq!(issued.application_number, "PRM-001");
    assert_eq!(issued.phone_number, "6281234567890");
    assert_eq!(
        issued.detail_link,
        Some(format!("{}/sim/permohonan/detail/1", server.uri()))
    );
    assert_eq!(
        issued.permit_document_link,
        Some(format!("{}/storage/sk/1.pdf", server.uri()))
    );
    assert_eq!(issued.rejection_reason, None);

    let rejected = &records[1];
    assert_eq!(
        rejected.detail_link,
        Some(format!("{}/sim/permohonan/detail/2", server.uri()))
    );
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Berkas tidak lengkap"));
    assert_eq!(rejected.permit_document_link, None);

    let plain = &records[2];
    assert_eq!(plain.detail_link, None);
    assert_eq!(plain.permit_document_link, None);
    assert_eq!(plain.rejection_reason, None);
}

#[tokio::test]
async fn issued_row_without_pdf_keeps_link_empty() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    let rows = row(Some("/sim/permohonan/detail/9"), "PRM-009", "Budi", "SK DITERBITKAN");
    Mock::given(method("GET"))
        .and(path("/sim/permohonan"))
        .and(query_param("status", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&rows)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan/detail/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Belum ada dokumen</body></html>"))
        .mount(&server)
        .await;

    let records = session.search(&SearchQuery::new("Budi")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].permit_document_link, None);
}

#[tokio::test]
async fn failed_rejection_lookup_keeps_record() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    let rows = row(None, "PRM-004", "Siti", "DITOLAK");
    Mock::given(method("GET"))
        .and(path("/sim/permohonan"))
        .and(query_param("status", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&rows)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan"))
        .and(query_param("status", "tolak"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let records = session.search(&SearchQuery::new("Siti")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stage, "DITOLAK");
    assert_eq!(records[0].rejection_reason, None);
}

#[tokio::test]
async fn search_endpoint_failure_is_reported() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = session.search(&SearchQuery::new("Budi")).await;
    assert!(matches!(result, Err(TrackingError::SearchFailed(_))));
}

#[tokio::test]
async fn get_detail_reports_pdf_or_nothing() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan/detail/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><embed src="https://files.example/sk/123.pdf?t=1"></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sim/permohonan/detail/124"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let found = session
        .get_detail(&format!("{}/sim/permohonan/detail/123", server.uri()))
        .await;
    assert_eq!(
        found.permit_document_link.as_deref(),
        Some("https://files.example/sk/123.pdf?t=1")
    );
    assert_eq!(found.error, None);

    let empty = session
        .get_detail(&format!("{}/sim/permohonan/detail/124", server.uri()))
        .await;
    assert_eq!(empty.permit_document_link, None);
    assert_eq!(empty.error, None);
}

#[tokio::test]
async fn get_detail_reports_errors_in_band() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    let missing = session
        .get_detail(&format!("{}/sim/permohonan/detail/404", server.uri()))
        .await;
    assert_eq!(missing.permit_document_link, None);
    assert!(missing.error.is_some());

    let unreachable = session.get_detail("http://127.0.0.1:1/sim/detail").await;
    assert!(unreachable.error.is_some());
}

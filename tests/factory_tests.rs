use std::time::Duration;

use proptest::prelude::*;
use reqwest::Method;
use sakari_analytics::{
    ACCOUNT_ID_HEADER, AUTH_HEADER, Connection, ConnectionError, ConnectionFactory,
};

fn factory() -> ConnectionFactory {
    ConnectionFactory::new().expect("factory should build with default config")
}

fn header<'a>(conn: &'a Connection, name: &str) -> Option<&'a str> {
    conn.headers().get(name).map(|v| v.to_str().unwrap())
}

#[test]
fn upload_is_post_with_auth_and_account_headers() {
    let conn = factory().upload("wk_123", "acct_9").unwrap();

    assert_eq!(conn.method(), Method::POST);
    assert_eq!(conn.url().as_str(), "https://jpeg.sakari.ai/v1/batch");
    assert_eq!(header(&conn, "X-AuthSakari"), Some("wk_123"));
    assert_eq!(header(&conn, "X-AccountID"), Some("acct_9"));
}

#[test]
fn attribution_is_post_with_output_enabled() {
    let conn = factory().attribution("wk_123", "acct_9").unwrap();

    assert_eq!(conn.method(), Method::POST);
    assert_eq!(conn.url().as_str(), "https://jpeg.sakari.ai/v1/attribution");
    assert!(conn.output_enabled());
    assert_eq!(header(&conn, AUTH_HEADER), Some("wk_123"));
    assert_eq!(header(&conn, ACCOUNT_ID_HEADER), Some("acct_9"));
}

#[test]
fn project_settings_embeds_write_key_and_has_no_auth() {
    let conn = factory().project_settings("wk_123", "acct_9").unwrap();

    assert_eq!(conn.method(), Method::GET);
    assert!(conn.url().path().ends_with("/projects/wk_123/settings"));
    assert!(header(&conn, AUTH_HEADER).is_none());
    assert!(header(&conn, ACCOUNT_ID_HEADER).is_none());
    assert!(!conn.output_enabled());
}

#[test]
fn upload_and_project_settings_do_not_enable_output() {
    let f = factory();
    assert!(!f.upload("wk", "acct").unwrap().output_enabled());
    assert!(!f.project_settings("wk", "acct").unwrap().output_enabled());
}

#[test]
fn every_handle_carries_shared_defaults() {
    let f = factory();
    let handles = [
        f.project_settings("wk_123", "acct_9").unwrap(),
        f.upload("wk_123", "acct_9").unwrap(),
        f.attribution("wk_123", "acct_9").unwrap(),
    ];

    for conn in &handles {
        assert_eq!(conn.connect_timeout(), Duration::from_millis(15_000));
        assert_eq!(conn.read_timeout(), Duration::from_millis(20_000));
        assert_eq!(
            header(conn, "Content-Type"),
            Some("application/json; utf-8")
        );
        assert!(
            header(conn, "User-Agent")
                .unwrap()
                .contains("sakari-analytics-rust")
        );
    }
}

#[test]
fn builder_redirects_handles_to_proxy() {
    let f = ConnectionFactory::builder()
        .settings_base_url("https://settings.proxy.test")
        .api_base_url("https://proxy.test/")
        .build()
        .unwrap();

    assert_eq!(
        f.project_settings("wk", "acct").unwrap().url().as_str(),
        "https://settings.proxy.test/v1/projects/wk/settings"
    );
    assert_eq!(
        f.upload("wk", "acct").unwrap().url().as_str(),
        "https://proxy.test/v1/batch"
    );
    assert_eq!(
        f.attribution("wk", "acct").unwrap().url().as_str(),
        "https://proxy.test/v1/attribution"
    );
}

#[test]
fn corrupted_base_url_is_an_error_not_a_silent_handle() {
    let f = ConnectionFactory::builder()
        .api_base_url("::not-a-url::")
        .build()
        .unwrap();

    assert!(matches!(
        f.upload("wk", "acct"),
        Err(ConnectionError::Http(_))
    ));
    assert!(matches!(
        f.attribution("wk", "acct"),
        Err(ConnectionError::Http(_))
    ));
}

#[test]
fn set_json_body_preserves_headers() {
    let mut conn = factory().upload("wk_123", "acct_9").unwrap();
    conn.set_json_body(&serde_json::json!({ "batch": [{ "type": "track" }] }))
        .unwrap();

    assert!(conn.output_enabled());
    assert_eq!(header(&conn, AUTH_HEADER), Some("wk_123"));
    assert_eq!(
        header(&conn, "Content-Type"),
        Some("application/json; utf-8")
    );
    assert!(
        conn.into_request()
            .body()
            .and_then(|b| b.as_bytes())
            .is_some()
    );
}

#[test]
fn factory_is_shareable_across_threads() {
    let f = factory();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let f = f.clone();
            std::thread::spawn(move || {
                let conn = f.upload(&format!("wk_{i}"), "acct").unwrap();
                conn.method().clone()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Method::POST);
    }
}

proptest! {
    #[test]
    fn upload_headers_echo_any_credentials(
        write_key in "[A-Za-z0-9_-]{1,40}",
        account_id in "[A-Za-z0-9_-]{1,40}",
    ) {
        let conn = factory().upload(&write_key, &account_id).unwrap();
        prop_assert_eq!(conn.method(), &Method::POST);
        prop_assert_eq!(header(&conn, AUTH_HEADER), Some(write_key.as_str()));
        prop_assert_eq!(header(&conn, ACCOUNT_ID_HEADER), Some(account_id.as_str()));
    }

    #[test]
    fn settings_url_embeds_any_write_key(write_key in "[A-Za-z0-9_-]{1,40}") {
        let conn = factory().project_settings(&write_key, "acct").unwrap();
        let expected_suffix = format!("/projects/{write_key}/settings");
        prop_assert!(conn.url().path().ends_with(&expected_suffix));
        prop_assert!(header(&conn, AUTH_HEADER).is_none());
    }
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricdump_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
upstream:
  base_url: "https://sonar.example.com"
  token: "t"
  timeout: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
upstream:
  base_url: "https://sonar.example.com/"
  token: "squ_abc"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert_eq!(cfg.upstream.base(), "https://sonar.example.com");
    assert_eq!(cfg.upstream.timeout_ms, 10000);
    assert_eq!(cfg.upstream.catalog_page_size, 500);
    assert_eq!(cfg.output.dir, ".");
}

#[test]
fn upstream_section_is_required() {
    let err = config::load_from_str("version: 1\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn wrong_version_is_rejected() {
    let bad = r#"
version: 2
upstream: { base_url: "https://sonar.example.com", token: "t" }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn out_of_range_values_are_rejected() {
    let cases = [
        r#"{ base_url: "ftp://sonar.example.com", token: "t" }"#,
        r#"{ base_url: "https://sonar.example.com", token: "  " }"#,
        r#"{ base_url: "https://sonar.example.com", token: "t", timeout_ms: 50 }"#,
        r#"{ base_url: "https://sonar.example.com", token: "t", catalog_page_size: 0 }"#,
        r#"{ base_url: "https://sonar.example.com", token: "t", catalog_page_size: 501 }"#,
    ];
    for upstream in cases {
        let doc = format!("version: 1\nupstream: {upstream}\n");
        let err = config::load_from_str(&doc).expect_err(upstream);
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "case={upstream}");
    }

    let bad_listen = r#"
version: 1
server: { listen: "not-an-addr" }
upstream: { base_url: "https://sonar.example.com", token: "t" }
"#;
    assert!(config::load_from_str(bad_listen).is_err());
}

#[test]
fn debug_output_hides_token() {
    let ok = r#"
version: 1
upstream: { base_url: "https://sonar.example.com", token: "very-secret" }
"#;
    let cfg = config::load_from_str(ok).unwrap();
    let dbg = format!("{:?}", cfg);
    assert!(!dbg.contains("very-secret"));
    assert!(dbg.contains("<redacted>"));
}

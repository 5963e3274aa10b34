//! Integration tests for route table construction and prefix matching.

use pathgate::config::model::RouteEntry;
use pathgate::config::upstreams::BUILTIN_UPSTREAMS;
use pathgate::config::RouteTable;
use pathgate::error::GatewayError;
use pathgate::proxy::forward::build_target_url;

#[test]
fn every_builtin_key_routes_to_its_host() {
    let table = RouteTable::builtin().unwrap();

    for (key, host) in BUILTIN_UPSTREAMS {
        let bare = format!("/{key}");
        let matched = table.match_path(&bare).unwrap();
        assert_eq!(matched.prefix, bare);
        assert_eq!(matched.upstream, format!("https://{host}"));

        let nested = format!("/{key}/v1/chat");
        let matched = table.match_path(&nested).unwrap();
        let url = build_target_url(matched, &nested, None).unwrap();
        assert_eq!(url.as_str(), format!("https://{host}/v1/chat"));
    }
}

#[test]
fn similar_keys_do_not_shadow_each_other() {
    let table = RouteTable::builtin().unwrap();

    assert_eq!(table.match_path("/d1/x").unwrap().prefix, "/d1");
    assert_eq!(table.match_path("/d10/x").unwrap().prefix, "/d10");
    assert_eq!(table.match_path("/d19").unwrap().prefix, "/d19");
    assert!(table.match_path("/d21").is_none());
    assert!(table.match_path("/d").is_none());
}

#[test]
fn longest_prefix_wins_for_overlapping_entries() {
    let table = RouteTable::new(vec![
        RouteEntry::new("/a", "https://a.example.com").unwrap(),
        RouteEntry::new("/ab", "https://ab.example.com").unwrap(),
        RouteEntry::new("/ab/cd", "https://abcd.example.com").unwrap(),
    ])
    .unwrap();

    assert_eq!(table.match_path("/ab/x").unwrap().prefix, "/ab");
    assert_eq!(table.match_path("/ab/cd/x").unwrap().prefix, "/ab/cd");
    assert_eq!(table.match_path("/ab/cde").unwrap().prefix, "/ab");
    assert_eq!(table.match_path("/abc").map(|m| m.prefix), None);
    assert_eq!(table.match_path("/a").unwrap().prefix, "/a");
}

#[test]
fn query_strings_are_forwarded_unmodified() {
    let table = RouteTable::builtin().unwrap();
    let matched = table.match_path("/d1/foo").unwrap();

    let url = build_target_url(matched, "/d1/foo", Some("x=1&y=2")).unwrap();
    assert_eq!(url.path(), "/foo");
    assert_eq!(url.query(), Some("x=1&y=2"));
    assert_eq!(url.as_str(), "https://d1.api.example.com/foo?x=1&y=2");
}

#[test]
fn broken_table_never_builds() {
    let err = RouteTable::from_hosts(&[("d1", ""), ("d2", "not a host"), ("d3", "ok.example.com")])
        .unwrap_err();

    let GatewayError::Configuration { errors } = err else {
        panic!("expected a configuration error");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.field == "host"));
}

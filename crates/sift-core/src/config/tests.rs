use super::*;

#[test]
fn empty_toml_uses_defaults() {
    let config = QueryConfig::from_toml_str("").expect("empty config should parse");

    assert_eq!(config, QueryConfig::default());
    assert_eq!(config.key_comparer, KeyComparer::IgnoreCase);
    assert_eq!(config.default_page_size, 20);
}

#[test]
fn toml_overrides_every_field() {
    let config = QueryConfig::from_toml_str(
        r#"
        key_comparer = "ordinal"
        default_page_size = 50
        "#,
    )
    .expect("full config should parse");

    assert_eq!(config.key_comparer, KeyComparer::Ordinal);
    assert_eq!(config.default_page_size, 50);
}

#[test]
fn zero_page_size_is_rejected() {
    let err = QueryConfig::from_toml_str("default_page_size = 0")
        .expect_err("zero page size should be rejected");

    assert!(matches!(err, ConfigError::InvalidPageSize));
}

#[test]
fn unknown_keys_and_bad_values_are_parse_errors() {
    let unknown = QueryConfig::from_toml_str("page_size = 5")
        .expect_err("unknown key should be rejected");
    assert!(matches!(unknown, ConfigError::Parse(_)));

    let bad = QueryConfig::from_toml_str("key_comparer = \"loose\"")
        .expect_err("unknown comparer should be rejected");
    assert!(matches!(bad, ConfigError::Parse(_)));
}

#[test]
fn builder_methods_replace_fields() {
    let config = QueryConfig::default()
        .with_key_comparer(KeyComparer::Ordinal)
        .with_default_page_size(7);

    assert_eq!(config.key_comparer, KeyComparer::Ordinal);
    assert_eq!(config.default_page_size, 7);
    assert!(config.validate().is_ok());
}

use scene_demos::{DemoConfig, DemoError, DemoKind};

#[test]
fn empty_query_selects_swarm() {
    assert_eq!(DemoConfig::from_query(""), Ok(DemoConfig::default()));
    assert_eq!(DemoConfig::from_query("?").unwrap().kind, DemoKind::Swarm);
}

#[test]
fn query_overrides() {
    let config = DemoConfig::from_query("?demo=helix&seed=42&count=64").unwrap();
    assert_eq!(
        config,
        DemoConfig::new(DemoKind::Helix).with_seed(42).with_count(64)
    );
}

#[test]
fn unknown_keys_and_empty_values_are_ignored() {
    let config = DemoConfig::from_query("utm=x&demo=wave&seed=&flag").unwrap();
    assert_eq!(config, DemoConfig::new(DemoKind::Wave));
}

#[test]
fn bad_values_are_reported() {
    assert_eq!(
        DemoConfig::from_query("demo=teapot"),
        Err(DemoError::UnknownDemo("teapot".to_string()))
    );
    assert_eq!(
        DemoConfig::from_query("seed=-3"),
        Err(DemoError::InvalidParameter {
            name: "seed",
            value: "-3".to_string()
        })
    );
    let err = DemoConfig::from_query("count=lots").unwrap_err();
    assert_eq!(err.to_string(), "invalid value for `count`: lots");
}

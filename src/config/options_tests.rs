//! Tests for platform options file parsing.

use std::path::Path;

use super::options::{BrokerOptions, BrokerSettings, PlatformOptions};
use super::ResolveError;

fn options(json: &str) -> PlatformOptions {
    PlatformOptions::parse(json, Path::new("/data/options.json")).unwrap()
}

mod parsing {
    use super::*;

    #[test]
    fn parse_keeps_full_object() {
        let opts = options(r#"{"mqtt_host": "broker", "mqtt_port": 1883, "interval": 30}"#);

        assert_eq!(opts.raw().len(), 3);
        assert_eq!(opts.raw()["interval"], 30);
        assert_eq!(opts.path(), Path::new("/data/options.json"));
    }

    #[test]
    fn malformed_json_returns_parse_error() {
        let result = PlatformOptions::parse("{not json", Path::new("/data/options.json"));

        assert!(matches!(result, Err(ResolveError::OptionsParse { .. })));
    }

    #[test]
    fn non_object_returns_error() {
        let result = PlatformOptions::parse("[1, 2, 3]", Path::new("/data/options.json"));

        assert!(matches!(result, Err(ResolveError::OptionsNotObject { .. })));
    }

    #[test]
    fn load_missing_file_returns_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlatformOptions::load(&dir.path().join("options.json"));

        assert!(matches!(result, Err(ResolveError::OptionsRead { .. })));
    }
}

mod external_broker {
    use super::*;

    #[test]
    fn all_keys() {
        let opts = options(
            r#"{
                "mqtt_host": "broker.local",
                "mqtt_port": 8883,
                "mqtt_user": "addon",
                "mqtt_password": "secret",
                "mqtt_ca_certs": "/ssl/ca.pem"
            }"#,
        );

        assert_eq!(
            opts.broker().unwrap(),
            Some(BrokerOptions::External(BrokerSettings {
                host: Some("broker.local".to_string()),
                port: Some(8883),
                user: "addon".to_string(),
                password: "secret".to_string(),
                ca_certs: "/ssl/ca.pem".to_string(),
            }))
        );
    }

    #[test]
    fn optional_keys_default_to_empty() {
        let opts = options(r#"{"mqtt_host": "broker", "mqtt_port": 1883}"#);

        let Some(BrokerOptions::External(settings)) = opts.broker().unwrap() else {
            panic!("expected external broker");
        };
        assert_eq!(settings.user, "");
        assert_eq!(settings.password, "");
        assert_eq!(settings.ca_certs, "");
    }

    #[test]
    fn null_port_defaults_to_1883() {
        let opts = options(r#"{"mqtt_host": "broker", "mqtt_port": null}"#);

        let Some(BrokerOptions::External(settings)) = opts.broker().unwrap() else {
            panic!("expected external broker");
        };
        assert_eq!(settings.port, Some(1883));
    }

    #[test]
    fn string_port_is_accepted() {
        let opts = options(r#"{"mqtt_host": "broker", "mqtt_port": "1884"}"#);

        let Some(BrokerOptions::External(settings)) = opts.broker().unwrap() else {
            panic!("expected external broker");
        };
        assert_eq!(settings.port, Some(1884));
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        let opts = options(r#"{"mqtt_host": "broker", "mqtt_port": 70000}"#);

        assert!(matches!(
            opts.broker(),
            Err(ResolveError::InvalidPort { .. })
        ));
    }

    #[test]
    fn host_alone_is_not_enough() {
        let opts = options(r#"{"mqtt_host": "broker"}"#);

        assert_eq!(opts.broker().unwrap(), None);
    }

    #[test]
    fn external_keys_win_over_internal_section() {
        let opts = options(
            r#"{
                "mqtt_host": "external",
                "mqtt_port": 1883,
                "mqtt": {"host": "core-mosquitto", "port": 1883}
            }"#,
        );

        assert!(matches!(
            opts.broker().unwrap(),
            Some(BrokerOptions::External(ref s)) if s.host.as_deref() == Some("external")
        ));
    }
}

mod internal_broker {
    use super::*;

    #[test]
    fn nested_section() {
        let opts = options(
            r#"{"mqtt": {"host": "core-mosquitto", "port": 1883, "username": "addons", "password": "pw", "ssl": false}}"#,
        );

        assert_eq!(
            opts.broker().unwrap(),
            Some(BrokerOptions::Internal(BrokerSettings {
                host: Some("core-mosquitto".to_string()),
                port: Some(1883),
                user: "addons".to_string(),
                password: "pw".to_string(),
                ca_certs: String::new(),
            }))
        );
    }

    #[test]
    fn missing_host_and_port_are_absent() {
        let opts = options(r#"{"mqtt": {}}"#);

        let Some(BrokerOptions::Internal(settings)) = opts.broker().unwrap() else {
            panic!("expected internal broker");
        };
        assert_eq!(settings.host, None);
        assert_eq!(settings.port, None);
        assert_eq!(settings.user, "");
        assert_eq!(settings.password, "");
    }

    #[test]
    fn section_that_is_not_an_object_is_rejected() {
        let opts = options(r#"{"mqtt": "core-mosquitto"}"#);

        assert!(matches!(
            opts.broker(),
            Err(ResolveError::InvalidValue { key: "mqtt", .. })
        ));
    }
}

#[test]
fn no_broker_keys_returns_none() {
    let opts = options(r#"{"log_level": "info"}"#);

    assert_eq!(opts.broker().unwrap(), None);
}

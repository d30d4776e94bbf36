//! Tests for the literal-only user config parser.

use std::path::Path;

use super::ResolveError;
use super::user_file::{Literal, UserConfig};

fn parse(content: &str) -> UserConfig {
    UserConfig::parse(content, Path::new("mqtt_config.py")).unwrap()
}

fn parse_err(content: &str) -> (usize, String) {
    match UserConfig::parse(content, Path::new("mqtt_config.py")) {
        Err(ResolveError::UserConfigParse { line, reason, .. }) => (line, reason),
        other => panic!("expected parse error, got {other:?}"),
    }
}

mod literals {
    use super::*;

    #[test]
    fn typical_config_file() {
        let config = parse(
            r#"
# MQTT broker settings
host = "broker.local"
port = 1883
user = 'mqtt'
pwd = "secret"
ca_certs = ""
"#,
        );

        assert_eq!(config.len(), 5);
        assert_eq!(config.get("host"), Some(&Literal::Str("broker.local".into())));
        assert_eq!(config.get("port"), Some(&Literal::Int(1883)));
        assert_eq!(config.get("user"), Some(&Literal::Str("mqtt".into())));
        assert_eq!(config.get("pwd"), Some(&Literal::Str("secret".into())));
        assert_eq!(config.get("ca_certs"), Some(&Literal::Str(String::new())));
    }

    #[test]
    fn keywords_and_numbers() {
        let config = parse("a = True\nb = False\nc = None\nd = -42\ne = 1_000\nf = 2.5\ng = +7");

        assert_eq!(config.get("a"), Some(&Literal::Bool(true)));
        assert_eq!(config.get("b"), Some(&Literal::Bool(false)));
        assert_eq!(config.get("c"), Some(&Literal::None));
        assert_eq!(config.get("d"), Some(&Literal::Int(-42)));
        assert_eq!(config.get("e"), Some(&Literal::Int(1000)));
        assert_eq!(config.get("f"), Some(&Literal::Float(2.5)));
        assert_eq!(config.get("g"), Some(&Literal::Int(7)));
    }

    #[test]
    fn string_escapes() {
        let config = parse(r#"pwd = "a\"b\\c\n" 
other = 'it\'s'"#);

        assert_eq!(config.get("pwd"), Some(&Literal::Str("a\"b\\c\n".into())));
        assert_eq!(config.get("other"), Some(&Literal::Str("it's".into())));
    }

    #[test]
    fn hash_inside_string_is_not_a_comment() {
        let config = parse(r#"pwd = "pa#ss"  # trailing comment"#);

        assert_eq!(config.get("pwd"), Some(&Literal::Str("pa#ss".into())));
    }

    #[test]
    fn type_annotation_is_allowed() {
        let config = parse("port: int = 8883\nhost : str = 'x'");

        assert_eq!(config.get("port"), Some(&Literal::Int(8883)));
        assert_eq!(config.get("host"), Some(&Literal::Str("x".into())));
    }

    #[test]
    fn last_assignment_wins() {
        let config = parse("port = 1883\nport = 8883");

        assert_eq!(config.get("port"), Some(&Literal::Int(8883)));
    }

    #[test]
    fn empty_file() {
        let config = parse("\n   \n# nothing here\n");

        assert!(config.is_empty());
    }
}

mod skipped_statements {
    use super::*;

    #[test]
    fn docstring_and_import_are_ignored() {
        let config = parse("\"\"\"MQTT broker settings.\"\"\"\nimport os\nhost = \"h\"\nport = 1883\n");

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("host"), Some(&Literal::Str("h".into())));
        assert_eq!(config.get("port"), Some(&Literal::Int(1883)));
    }

    #[test]
    fn multi_line_docstring_is_ignored() {
        let config = parse(
            r#"'''
Broker settings.

host = "not me"
'''
host = "broker"
"#,
        );

        assert_eq!(config.len(), 1);
        assert_eq!(config.get("host"), Some(&Literal::Str("broker".into())));
    }

    #[test]
    fn single_quoted_string_statement_is_ignored() {
        let config = parse("'settings'  # module doc\nport = 1\n");

        assert_eq!(config.get("port"), Some(&Literal::Int(1)));
    }

    #[test]
    fn from_imports_are_ignored() {
        let config = parse("from os import environ\nfrom typing import (\n    Final,\n)\nport: Final = 8883\n");

        assert_eq!(config.len(), 1);
        assert_eq!(config.get("port"), Some(&Literal::Int(8883)));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn function_call_is_rejected() {
        let (line, reason) = parse_err("host = 'x'\nport = int('1883')");

        assert_eq!(line, 2);
        assert!(reason.contains("not a literal"), "{reason}");
    }

    #[test]
    fn unclosed_docstring_is_rejected() {
        let (line, reason) = parse_err("host = 'h'\n\"\"\"Settings\nport = 1883\n");

        assert_eq!(line, 2);
        assert!(reason.contains("never closed"), "{reason}");
    }

    #[test]
    fn code_after_string_is_rejected() {
        let (line, _) = parse_err("'doc'.upper()");

        assert_eq!(line, 1);
    }

    #[test]
    fn expression_is_rejected() {
        let (_, reason) = parse_err("port = 1800 + 83");

        assert!(reason.contains("only literal values"), "{reason}");
    }

    #[test]
    fn name_reference_is_rejected() {
        let (_, reason) = parse_err("host = HOSTNAME");

        assert!(reason.contains("'HOSTNAME' is not a literal"), "{reason}");
    }

    #[test]
    fn unterminated_string_is_rejected() {
        let (_, reason) = parse_err("host = \"broker");

        assert_eq!(reason, "unterminated string");
    }

    #[test]
    fn missing_value_is_rejected() {
        let (_, reason) = parse_err("host =");

        assert_eq!(reason, "missing value after '='");
    }

    #[test]
    fn comparison_is_rejected() {
        let (_, reason) = parse_err("host == 'x'");

        assert_eq!(reason, "comparisons are not assignments");
    }

    #[test]
    fn malformed_number_is_rejected() {
        let (_, reason) = parse_err("port = 18__83");

        assert!(reason.starts_with("invalid number"), "{reason}");
    }
}

mod typed_access {
    use super::*;

    #[test]
    fn string_of_none_is_absent() {
        let config = parse("ca_certs = None");

        assert_eq!(config.string("ca_certs").unwrap(), None);
    }

    #[test]
    fn string_of_integer_is_invalid() {
        let config = parse("user = 5");

        assert!(matches!(
            config.string("user"),
            Err(ResolveError::InvalidValue { key: "user", .. })
        ));
    }

    #[test]
    fn required_string_reports_missing_key() {
        let config = parse("port = 1883");

        assert!(matches!(
            config.required_string("host"),
            Err(ResolveError::MissingKey { key: "host", .. })
        ));
    }
}

mod display {
    use super::*;

    #[test]
    fn literals_render_like_their_source_language() {
        assert_eq!(Literal::Str("broker".into()).to_string(), "broker");
        assert_eq!(Literal::Int(1883).to_string(), "1883");
        assert_eq!(Literal::Float(3.0).to_string(), "3.0");
        assert_eq!(Literal::Float(2.5).to_string(), "2.5");
        assert_eq!(Literal::Bool(true).to_string(), "True");
        assert_eq!(Literal::None.to_string(), "None");
    }
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mqtt_config.py");
    std::fs::write(&path, "host = 'from-file'\n").unwrap();

    let config = UserConfig::load(&path).unwrap();

    assert_eq!(config.required_string("host").unwrap(), "from-file");
    assert_eq!(config.path(), path);
}

#[test]
fn load_missing_file_returns_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = UserConfig::load(&dir.path().join("missing.py"));

    assert!(matches!(result, Err(ResolveError::UserConfigRead { .. })));
}

//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::{Cli, Command, ExportCli};

mod addon_helper {
    use super::*;

    #[test]
    fn defaults_to_demo_with_fixed_options_path() {
        let cli = Cli::parse_from_iter(["addon-helper"]);

        assert_eq!(cli.command(), Command::Demo);
        assert_eq!(cli.options_file, PathBuf::from("/data/options.json"));
        assert_eq!(cli.user_config, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_get_subcommand() {
        let cli = Cli::parse_from_iter(["addon-helper", "get", "host"]);

        assert_eq!(
            cli.command(),
            Command::Get {
                name: "host".to_string()
            }
        );
    }

    #[test]
    fn global_paths_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "addon-helper",
            "attributes",
            "--options-file",
            "/tmp/options.json",
            "--user-config",
            "/tmp/mqtt_config.py",
            "-v",
        ]);

        assert_eq!(cli.command(), Command::Attributes);
        assert!(cli.verbose);

        let paths = cli.source_paths();
        assert_eq!(paths.options, PathBuf::from("/tmp/options.json"));
        assert_eq!(paths.user_config, Some(PathBuf::from("/tmp/mqtt_config.py")));
    }

    #[test]
    fn user_config_defaults_to_home() {
        let cli = Cli::parse_from_iter(["addon-helper"]);

        let paths = cli.source_paths();
        if let Some(path) = paths.user_config {
            assert!(path.ends_with(".config/mqtt_config.py"));
        }
    }
}

mod parse_mqtt_config {
    use super::*;

    #[test]
    fn explicit_file() {
        let cli = ExportCli::parse_from_iter(["parse-mqtt-config", "--file", "/tmp/x.py"]);

        assert_eq!(cli.path(), Some(PathBuf::from("/tmp/x.py")));
    }

    #[test]
    fn default_file_is_home_relative() {
        let cli = ExportCli::parse_from_iter(["parse-mqtt-config"]);

        if let Some(path) = cli.path() {
            assert!(path.ends_with(".config/mqtt_config.py"));
        }
    }
}

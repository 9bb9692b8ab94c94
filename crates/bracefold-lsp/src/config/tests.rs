//! Tests for the configuration engine

use super::*;
use serde_json::json;

// ==================== SETTINGS PARSING TESTS ====================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_load_config_from_toml() {
        let toml = r#"
[scanner]
keyword = "css"
ignore_keyword_in_comments = false

[hover]
language = "jsx"
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(settings.scanner.keyword, "css");
        assert!(!settings.scanner.ignore_keyword_in_comments);
        assert_eq!(settings.hover.language, "jsx");
        assert_eq!(settings.folding, FoldingSettings::default());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.scanner.keyword, "sx");
        assert!(settings.scanner.ignore_keyword_in_comments);
        assert_eq!(settings.hover.language, "tsx");
        assert_eq!(settings.folding.collapsed_text.as_deref(), Some("{...}"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = Settings::from_toml_str("[scanner\nkeyword = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_type() {
        let result = Settings::from_toml_str("[scanner]\nignore_keyword_in_comments = \"yes\"");
        assert!(result.is_err());
    }
}

// ==================== EDITOR PAYLOAD TESTS ====================

mod json_tests {
    use super::*;

    #[test]
    fn test_bare_payload() {
        let settings = Settings::from_json(json!({
            "scanner": { "keyword": "style" }
        }))
        .unwrap();

        assert_eq!(settings.scanner.keyword, "style");
        assert!(settings.scanner.ignore_keyword_in_comments);
    }

    #[test]
    fn test_sectioned_payload() {
        let settings = Settings::from_json(json!({
            "bracefold": {
                "scanner": { "ignoreKeywordInComments": false },
                "folding": { "collapsedText": "…" }
            }
        }))
        .unwrap();

        assert!(!settings.scanner.ignore_keyword_in_comments);
        assert_eq!(settings.folding.collapsed_text.as_deref(), Some("…"));
    }

    #[test]
    fn test_null_payload_uses_defaults() {
        // Clients may send null when nothing is configured
        let settings = Settings::from_json(serde_json::Value::Null).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_payload() {
        let result = Settings::from_json(json!({ "scanner": { "keyword": 42 } }));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}

// ==================== LOADING TESTS ====================

mod loading_tests {
    use super::*;

    #[test]
    fn test_load_from_workspace_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(Settings::FILE_NAME),
            "[scanner]\nkeyword = \"css\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap().unwrap();
        assert_eq!(settings.scanner.keyword, "css");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(Settings::FILE_NAME), "[scanner").unwrap();

        assert!(matches!(
            Settings::load(dir.path()),
            Err(ConfigError::Toml(_))
        ));
    }
}

// ==================== SCANNER BUILD TESTS ====================

mod scanner_tests {
    use super::*;
    use bracefold_core::TextDocument;

    #[test]
    fn test_build_scanner() {
        let settings = ScannerSettings {
            keyword: "css".to_string(),
            ignore_keyword_in_comments: false,
        };

        let scanner = settings.build().unwrap();
        assert_eq!(scanner.keyword(), "css");
        assert!(!scanner.options().ignore_keyword_in_comments);

        let doc = crate::document::OpenDocument::new("// css={ a }", 1);
        assert_eq!(scanner.collect(doc.text()).len(), 1);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let settings = ScannerSettings {
            keyword: String::new(),
            ..Default::default()
        };

        assert!(matches!(settings.build(), Err(ConfigError::Scanner(_))));
    }
}

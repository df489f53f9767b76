//! Tests for Settings loading

use std::fs;

use tempfile::TempDir;

use googlecl::application::ApplicationError;
use googlecl::config::Settings;
use googlecl::domain::OptionField;

#[test]
fn given_explicit_config_file_when_loading_then_file_values_override_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
[general]
regex = false

[picasa]
title = "Holidays"

[docs]
format = "pdf"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(path.as_path())).unwrap();

    // Assert
    assert!(!settings.general.regex);
    assert!(settings.general.delete_prompt, "unspecified keys keep defaults");
    assert_eq!(
        settings.service_default("picasa", OptionField::Title).as_deref(),
        Some("Holidays")
    );
    assert_eq!(
        settings.service_default("docs", OptionField::Format).as_deref(),
        Some("pdf")
    );
    assert!(!settings.client_flags().regex);
}

#[test]
fn given_missing_explicit_file_when_loading_then_config_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    // Act
    let result = Settings::load(Some(path.as_path()));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error_names_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[general\nregex = ").unwrap();

    // Act
    let err = Settings::load(Some(path.as_path())).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn given_env_variable_when_loading_then_overrides_service_default() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[calendar]\ncal = \"Home\"\n").unwrap();
    std::env::set_var("GOOGLECL_CALENDAR__CAL", "Work");

    // Act
    let settings = Settings::load(Some(path.as_path())).unwrap();
    std::env::remove_var("GOOGLECL_CALENDAR__CAL");

    // Assert
    assert_eq!(
        settings.service_default("calendar", OptionField::Cal).as_deref(),
        Some("Work")
    );
}

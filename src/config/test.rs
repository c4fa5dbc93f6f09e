use crate::config::*;
use serde_json::json;

#[test]
fn defaults_are_valid() {
    let options = MatchOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.sq_search_radius(), 2500.0);
}

#[test]
fn validation_rejects_invalid_parameters() {
    let base = MatchOptions::default();

    let cases = [
        MatchOptions { sigma_z: 0.0, ..base },
        MatchOptions { beta: -1.0, ..base },
        MatchOptions { search_radius: -0.5, ..base },
        MatchOptions { turn_penalty_factor: -10.0, ..base },
        MatchOptions { sigma_z: f64::NAN, ..base },
    ];

    for case in cases {
        assert!(case.validate().is_err(), "Expected {case:?} to be rejected");
    }

    assert!(matches!(
        MatchOptions { beta: 0.0, ..base }.validate(),
        Err(ConfigError::Beta(_))
    ));

    // A zero radius is permitted
    assert!(MatchOptions { search_radius: 0.0, ..base }.validate().is_ok());
}

#[test]
fn merge_order() -> Result<(), ConfigError> {
    let config = MatcherConfig::from_json_value(json!({
        "mode": "bicycle",
        "default": { "beta": 5.0, "search_radius": 30.0, "breakage_distance": 1000.0 },
        "modes": {
            "bicycle": { "beta": 7.0, "search_radius": 40.0 }
        }
    }))?;

    assert_eq!(config.mode, "bicycle");

    let preferences = MatchPreferences {
        search_radius: Some(60.0),
        ..MatchPreferences::default()
    };

    let merged = config.merge("bicycle", &preferences);
    assert_eq!(merged.breakage_distance, 1000.0);
    assert_eq!(merged.beta, 7.0);
    assert_eq!(merged.search_radius, 60.0);

    // Other modes only see the defaults
    let merged = config.merge("auto", &MatchPreferences::default());
    assert_eq!(merged.beta, 5.0);
    assert_eq!(merged.search_radius, 30.0);

    // Unspecified values take their defaults
    assert_eq!(merged.sigma_z, MatchOptions::default().sigma_z);
    Ok(())
}

#[test]
fn search_radius_bounded() {
    let options = MatchOptions {
        search_radius: 500.0,
        max_search_radius: 100.0,
        ..MatchOptions::default()
    };

    assert_eq!(options.sq_search_radius(), 10_000.0);
}

#[test]
fn malformed_json() {
    let result = MatcherConfig::from_json_str(r#"{ "default": { "beta": "high" } }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

//! `.env` files flow through the figment provider chain.
//!
//! `dotenvy` never overrides variables that are already set, and the values
//! it loads stay in the process environment, so each test uses its own keys.

use figment::Jail;
use geoflag_config::GeoFlagConfig;
use pretty_assertions::assert_eq;

#[test]
fn dotenv_values_reach_the_config() {
    Jail::expect_with(|jail| {
        jail.create_file(
            ".env",
            "GEOFLAG_OUTPUT__DIRECTORY=from-dotenv\nGEOFLAG_OUTPUT__VALIDATE=true\n",
        )?;

        let config = GeoFlagConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.output.directory, "from-dotenv");
        assert!(config.output.validate);
        assert_eq!(config.report.generator, "GeoFlag");
        Ok(())
    });
}

#[test]
fn process_env_beats_dotenv() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "GEOFLAG_REPORT__DEFAULT_NAME=FromDotenv\n")?;
        jail.set_env("GEOFLAG_REPORT__DEFAULT_NAME", "FromEnv");

        let config = GeoFlagConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.report.default_name, "FromEnv");
        Ok(())
    });
}

#[test]
fn missing_dotenv_is_not_an_error() {
    Jail::expect_with(|_jail| {
        let config = GeoFlagConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.report.generator, "GeoFlag");
        Ok(())
    });
}

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.sallinggroup.com/v1/food-waste/";

/// Font family used for the PDF when `FOODWASTE_FONT_FAMILY` is unset.
pub const DEFAULT_FONT_FAMILY: &str = "LiberationSans";

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// callers and tests can supply a plain `HashMap` lookup.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] or [`ConfigError::EmptyEnvVar`] when
/// `SALLING_API_TOKEN` is absent or blank, and [`ConfigError::InvalidEnvVar`]
/// when an optional value cannot be parsed.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require_non_empty = |var: &str| -> Result<String, ConfigError> {
        let value = lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyEnvVar(var.to_string()));
        }
        Ok(trimmed.to_string())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected true/false, got \"{raw}\""),
        })
    };

    let api_token = require_non_empty("SALLING_API_TOKEN")?;

    let api_base_url = or_default("FOODWASTE_API_BASE_URL", DEFAULT_API_BASE_URL);
    let request_timeout_secs = parse_u64("FOODWASTE_REQUEST_TIMEOUT_SECS", "20")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FOODWASTE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("FOODWASTE_USER_AGENT", "foodwaste/0.1 (clearance-report)");
    let output_dir = PathBuf::from(or_default("FOODWASTE_OUTPUT_DIR", "./output"));
    let font_dir = PathBuf::from(or_default("FOODWASTE_FONT_DIR", "./fonts"));
    let font_family = or_default("FOODWASTE_FONT_FAMILY", DEFAULT_FONT_FAMILY);
    let pdf_images = parse_bool("FOODWASTE_PDF_IMAGES", "true")?;
    let log_level = or_default("FOODWASTE_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_token,
        api_base_url,
        request_timeout_secs,
        user_agent,
        output_dir,
        font_dir,
        font_family,
        pdf_images,
        log_level,
    })
}

/// Parse a boolean flag leniently (`true/false`, `1/0`, `yes/no`, `on/off`).
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with the required token populated.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SALLING_API_TOKEN", "test-token");
        m
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn build_app_config_fails_without_token() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SALLING_API_TOKEN"),
            "expected MissingEnvVar(SALLING_API_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_blank_token() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SALLING_API_TOKEN", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::EmptyEnvVar(ref v)) if v == "SALLING_API_TOKEN"),
            "expected EmptyEnvVar(SALLING_API_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).expect("config should load");
        assert_eq!(cfg.api_token, "test-token");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.request_timeout_secs, 20);
        assert_eq!(cfg.user_agent, "foodwaste/0.1 (clearance-report)");
        assert_eq!(cfg.output_dir, std::path::PathBuf::from("./output"));
        assert_eq!(cfg.font_dir, std::path::PathBuf::from("./fonts"));
        assert_eq!(cfg.font_family, "LiberationSans");
        assert!(cfg.pdf_images);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_trims_token() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SALLING_API_TOKEN", "  abc123\n");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_token, "abc123");
    }

    #[test]
    fn request_timeout_override() {
        let mut map = full_env();
        map.insert("FOODWASTE_REQUEST_TIMEOUT_SECS", "45");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 45);
    }

    #[test]
    fn request_timeout_invalid() {
        let mut map = full_env();
        map.insert("FOODWASTE_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FOODWASTE_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(FOODWASTE_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn request_timeout_zero_is_rejected() {
        let mut map = full_env();
        map.insert("FOODWASTE_REQUEST_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn pdf_images_can_be_disabled() {
        let mut map = full_env();
        map.insert("FOODWASTE_PDF_IMAGES", "false");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.pdf_images);
    }

    #[test]
    fn pdf_images_invalid() {
        let mut map = full_env();
        map.insert("FOODWASTE_PDF_IMAGES", "sometimes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FOODWASTE_PDF_IMAGES"),
            "expected InvalidEnvVar(FOODWASTE_PDF_IMAGES), got: {result:?}"
        );
    }

    #[test]
    fn output_and_font_dirs_override() {
        let mut map = full_env();
        map.insert("FOODWASTE_OUTPUT_DIR", "/tmp/reports");
        map.insert("FOODWASTE_FONT_DIR", "/usr/share/fonts/truetype/liberation");
        map.insert("FOODWASTE_FONT_FAMILY", "DejaVuSans");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.output_dir, std::path::PathBuf::from("/tmp/reports"));
        assert_eq!(
            cfg.font_dir,
            std::path::PathBuf::from("/usr/share/fonts/truetype/liberation")
        );
        assert_eq!(cfg.font_family, "DejaVuSans");
    }

    #[test]
    fn debug_output_redacts_token() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("[redacted]"));
    }
}

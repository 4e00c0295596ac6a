pub mod analysis;
pub mod domain;
pub mod export;
pub mod llm;
pub mod market;
pub mod time;
pub mod view;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("{key} is required")]
    pub struct MissingSetting {
        pub key: &'static str,
    }

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub gemini_api_key: Option<String>,
        pub gemini_base_url: Option<String>,
        pub gemini_model: Option<String>,
        pub gemini_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                gemini_api_key: non_empty_var("GEMINI_API_KEY"),
                gemini_base_url: non_empty_var("GEMINI_BASE_URL"),
                gemini_model: non_empty_var("GEMINI_MODEL"),
                gemini_timeout_secs: non_empty_var("GEMINI_TIMEOUT_SECS")
                    .map(|s| parse_timeout_secs(&s))
                    .transpose()?,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_gemini_api_key(&self) -> Result<&str, MissingSetting> {
            self.gemini_api_key.as_deref().ok_or(MissingSetting {
                key: "GEMINI_API_KEY",
            })
        }
    }

    /// Whole seconds, at least one.
    fn parse_timeout_secs(raw: &str) -> anyhow::Result<u64> {
        let secs = raw.parse::<u64>().with_context(|| {
            format!("GEMINI_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}")
        })?;
        anyhow::ensure!(secs > 0, "GEMINI_TIMEOUT_SECS must be greater than zero");
        Ok(secs)
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn empty() -> Settings {
            Settings {
                gemini_api_key: None,
                gemini_base_url: None,
                gemini_model: None,
                gemini_timeout_secs: None,
                sentry_dsn: None,
            }
        }

        #[test]
        fn missing_api_key_is_a_typed_error() {
            let err = empty().require_gemini_api_key().unwrap_err();
            assert_eq!(err.key, "GEMINI_API_KEY");
            assert_eq!(err.to_string(), "GEMINI_API_KEY is required");
        }

        #[test]
        fn present_api_key_is_returned() {
            let settings = Settings {
                gemini_api_key: Some("k".to_string()),
                ..empty()
            };
            assert_eq!(settings.require_gemini_api_key().unwrap(), "k");
        }

        #[test]
        fn timeout_must_be_positive_whole_seconds() {
            assert_eq!(parse_timeout_secs("30").unwrap(), 30);

            let err = parse_timeout_secs("30s").unwrap_err();
            assert!(err.to_string().contains("GEMINI_TIMEOUT_SECS"));
            assert!(parse_timeout_secs("-5").is_err());
            assert!(parse_timeout_secs("0").is_err());
        }
    }
}

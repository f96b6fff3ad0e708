/// Environment variable that turns the native release mechanism off for the
/// process-wide releaser when set to `1`, `true`, `yes` or `on`.
pub const DISABLE_NATIVE_RELEASE_ENV: &str = "DIRECT_MEM_DISABLE_NATIVE_RELEASE";

/// Options consulted by the capability probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Skip probing and report the mechanism as unavailable.
    pub disabled: bool,
}

impl ReleaseOptions {
    /// Reads the options from the process environment.
    pub fn from_env() -> ReleaseOptions {
        let value = std::env::var(DISABLE_NATIVE_RELEASE_ENV).ok();
        Self::from_env_value(value.as_deref())
    }

    pub fn with_disabled(mut self, disabled: bool) -> ReleaseOptions {
        self.disabled = disabled;
        self
    }

    fn from_env_value(value: Option<&str>) -> ReleaseOptions {
        ReleaseOptions {
            disabled: value.is_some_and(parse_flag),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_value() {
        assert!(!ReleaseOptions::from_env_value(None).disabled);
        assert!(!ReleaseOptions::from_env_value(Some("")).disabled);
        assert!(!ReleaseOptions::from_env_value(Some("0")).disabled);
        assert!(!ReleaseOptions::from_env_value(Some("false")).disabled);
        assert!(!ReleaseOptions::from_env_value(Some("maybe")).disabled);

        assert!(ReleaseOptions::from_env_value(Some("1")).disabled);
        assert!(ReleaseOptions::from_env_value(Some("TRUE")).disabled);
        assert!(ReleaseOptions::from_env_value(Some(" yes ")).disabled);
        assert!(ReleaseOptions::from_env_value(Some("On")).disabled);
    }

    #[test]
    fn test_with_disabled() {
        let options = ReleaseOptions::default();
        assert!(!options.disabled);
        assert!(options.with_disabled(true).disabled);
    }
}

//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::SessionOptions;
use crate::render::RenderOptions;
use crate::sequencer::Pacing;
use crate::threat::DangerLevel;

pub const DEFAULT_LINE_DELAY_MS: u64 = 350;
pub const DEFAULT_DANGER_LEVEL: u8 = 23;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub instant: bool,
    pub skip_boot: bool,
    pub debug_override: bool,
    pub no_color: bool,
    pub scripts_path: Option<PathBuf>,
    pub line_delay_ms: u64,
    pub initial_danger: DangerLevel,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            instant: env_flag("DBC_TERMINAL_INSTANT"),
            skip_boot: env_flag("DBC_TERMINAL_SKIP_BOOT"),
            debug_override: env_flag("DBC_TERMINAL_DEBUG_OVERRIDE"),
            no_color: env_flag("DBC_TERMINAL_NO_COLOR") || env_string_opt("NO_COLOR").is_some(),
            scripts_path: env_string_opt("DBC_TERMINAL_SCRIPTS").map(PathBuf::from),
            line_delay_ms: env_u64("DBC_TERMINAL_LINE_DELAY_MS").unwrap_or(DEFAULT_LINE_DELAY_MS),
            initial_danger: env_u64("DBC_TERMINAL_DANGER")
                .map(|value| DangerLevel::new(value.min(100) as u8))
                .unwrap_or(DangerLevel::new(DEFAULT_DANGER_LEVEL)),
            log_file: env_string_opt("DBC_TERMINAL_LOG").map(PathBuf::from),
            log_level: env_string_opt("RUST_LOG")
                .or_else(|| env_string_opt("DBC_TERMINAL_LOG_LEVEL")),
        }
    }

    pub fn pacing(&self) -> Pacing {
        if self.instant {
            Pacing::instant()
        } else {
            Pacing::new(Duration::from_millis(self.line_delay_ms))
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            play_boot: !self.skip_boot,
            bypass_enabled: self.debug_override,
            pacing: self.pacing(),
        }
    }

    /// `interactive` is true when the user's terminal already echoes typed input.
    pub fn render_options(&self, interactive: bool) -> RenderOptions {
        RenderOptions {
            color: !self.no_color,
            echo_input: !interactive,
            prompt: interactive,
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    const KEYS: [&str; 11] = [
        "DBC_TERMINAL_INSTANT",
        "DBC_TERMINAL_SKIP_BOOT",
        "DBC_TERMINAL_DEBUG_OVERRIDE",
        "DBC_TERMINAL_NO_COLOR",
        "NO_COLOR",
        "DBC_TERMINAL_SCRIPTS",
        "DBC_TERMINAL_LINE_DELAY_MS",
        "DBC_TERMINAL_DANGER",
        "DBC_TERMINAL_LOG",
        "DBC_TERMINAL_LOG_LEVEL",
        "RUST_LOG",
    ];

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    fn clear_all() -> Vec<EnvGuard> {
        KEYS.iter().map(|key| set_env_guard(*key, None)).collect()
    }

    #[test]
    fn env_defaults() {
        let _lock = env_lock();
        let _guards = clear_all();

        let config = EnvConfig::from_env();
        assert!(!config.instant);
        assert!(!config.skip_boot);
        assert!(!config.debug_override);
        assert!(!config.no_color);
        assert!(config.scripts_path.is_none());
        assert_eq!(config.line_delay_ms, DEFAULT_LINE_DELAY_MS);
        assert_eq!(config.initial_danger, DangerLevel::new(DEFAULT_DANGER_LEVEL));
        assert!(config.log_file.is_none());
        assert!(config.log_level.is_none());
        assert!(config.session_options().play_boot);
        assert!(!config.session_options().bypass_enabled);
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("DBC_TERMINAL_INSTANT", Some("1"));
        let _g2 = set_env_guard("DBC_TERMINAL_SKIP_BOOT", Some("1"));
        let _g3 = set_env_guard("DBC_TERMINAL_DEBUG_OVERRIDE", Some("1"));
        let _g4 = set_env_guard("DBC_TERMINAL_SCRIPTS", Some("/tmp/scripts.json"));
        let _g5 = set_env_guard("DBC_TERMINAL_LOG_LEVEL", Some("debug"));

        let config = EnvConfig::from_env();
        assert!(config.instant);
        assert_eq!(config.pacing(), Pacing::instant());
        assert!(!config.session_options().play_boot);
        assert!(config.session_options().bypass_enabled);
        assert_eq!(
            config.scripts_path.as_deref(),
            Some(std::path::Path::new("/tmp/scripts.json"))
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn flags_other_than_one_stay_off() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("DBC_TERMINAL_DEBUG_OVERRIDE", Some("true"));

        assert!(!EnvConfig::from_env().debug_override);
    }

    #[test]
    fn numeric_values_parse_and_clamp() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("DBC_TERMINAL_LINE_DELAY_MS", Some(" 40 "));
        let _g2 = set_env_guard("DBC_TERMINAL_DANGER", Some("250"));

        let config = EnvConfig::from_env();
        assert_eq!(config.line_delay_ms, 40);
        assert_eq!(config.initial_danger, DangerLevel::new(100));
    }

    #[test]
    fn invalid_numbers_and_empty_strings_fall_back() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("DBC_TERMINAL_LINE_DELAY_MS", Some("fast"));
        let _g2 = set_env_guard("DBC_TERMINAL_LOG", Some(""));

        let config = EnvConfig::from_env();
        assert_eq!(config.line_delay_ms, DEFAULT_LINE_DELAY_MS);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn no_color_honours_standard_variable() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("NO_COLOR", Some("yes"));

        let config = EnvConfig::from_env();
        assert!(config.no_color);
        assert!(!config.render_options(true).color);
        assert!(!config.render_options(true).echo_input);
        assert!(config.render_options(false).echo_input);
        assert!(config.render_options(true).prompt);
        assert!(!config.render_options(false).prompt);
    }
}

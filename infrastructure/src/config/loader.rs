//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "math-solver";
const PROJECT_FILE: &str = "math-solver.toml";
const ENV_PREFIX: &str = "MATH_SOLVER_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GEMINI_API_KEY`, `PORT`, `DEBUG`
    /// 2. `MATH_SOLVER_*` variables, e.g. `MATH_SOLVER_SERVER__PORT`
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./math-solver.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/math-solver/config.toml`
    /// 6. Default values
    ///
    /// A `.env` file in the working directory is read first, so its entries
    /// take part as environment variables.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::figment(global.as_deref(), project.as_deref(), config_path.map(|p| p.as_path()))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            debug!("Merging config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment = figment
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            )
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()));

        if let Some(debug) = std::env::var("DEBUG").ok().as_deref().and_then(parse_flag) {
            figment = figment.merge(Serialized::default("server.debug", debug));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/math-solver/config.toml if set,
    /// otherwise falls back to ~/.config/math-solver/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        for name in ["GEMINI_API_KEY", "PORT", "DEBUG"] {
            let state = if std::env::var(name).is_ok() { "SET  " } else { "     " };
            println!("  [{}] Env:     {}", state, name);
        }
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let state = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", state, path.display());
        }

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{}", PROJECT_FILE);
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

/// Accepts the usual spellings of a boolean flag (`1`, `true`, `True`, `yes`, ...)
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.gemini.timeout_seconds, 60);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("math-solver"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[server]\nhost = \"10.0.0.1\"\n\n[solver]\nextraction = \"span\"\n",
        );
        let explicit = write_toml(&dir, "explicit.toml", "[server]\nhost = \"127.0.0.1\"\n");

        let config: FileConfig = ConfigLoader::figment(Some(&global), None, Some(&explicit))
            .extract()
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.solver.extraction, "span");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_invalid_toml_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(&dir, "bad.toml", "[gemini]\ntimeout_seconds = \"soon\"\n");

        let result = ConfigLoader::figment(None, None, Some(&path)).extract::<FileConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}

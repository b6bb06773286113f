//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const APP_DIR: &str = "medguard";
const PROJECT_FILES: [&str; 2] = ["medguard.toml", ".medguard.toml"];
const ENV_PREFIX: &str = "MEDGUARD_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `MEDGUARD_<SECTION>__<KEY>` (e.g. `MEDGUARD_PIPELINE__RERANK_TOP_K`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./medguard.toml` or `./.medguard.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/medguard/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/medguard/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./medguard.toml or ./.medguard.toml");
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file_config::DEFAULT_MODEL;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.pipeline.retrieval_k, 5);
        assert_eq!(config.models.reranker, DEFAULT_MODEL);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("medguard"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[pipeline]\nrerank_top_k = 2\n\n[index]\npath = \"records.json\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.pipeline.rerank_top_k, 2);
        assert_eq!(config.pipeline.retrieval_k, 5);
        assert_eq!(config.index.path.as_deref(), Some("records.json"));
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("explicit.toml", "[pipeline]\nretrieval_k = 7\n")?;
            jail.set_env("MEDGUARD_PIPELINE__RETRIEVAL_K", "9");
            jail.set_env("MEDGUARD_MODELS__GENERATOR", "llama-3.1-8b-instant");

            let path = PathBuf::from("explicit.toml");
            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;
            assert_eq!(config.pipeline.retrieval_k, 9);
            assert_eq!(config.models.generator, "llama-3.1-8b-instant");
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_discovered() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("medguard.toml", "[output]\ncolor = false\n")?;
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(!config.output.color);
            Ok(())
        });
    }
}

//! Everything the source loaders read from the outside world

use super::env::Env;
use super::importer::Importer;
use super::registry::ModuleRegistry;
use std::path::PathBuf;

/// Extra module search directories, in platform path-list syntax.
pub const SEARCH_PATH_ENV_VAR: &str = "SUPERSET_CONFIG_SEARCH_PATH";

/// Inputs shared by the default and override loaders.
#[derive(Debug, Clone)]
pub struct SourceContext<'r> {
    env: Env,
    importer: Importer,
    registry: &'r ModuleRegistry,
    test_mode: bool,
}

impl<'r> SourceContext<'r> {
    /// An empty context over `registry`: no environment, empty search path.
    pub fn new(registry: &'r ModuleRegistry) -> Self {
        Self { env: Env::default(), importer: Importer::default(), registry, test_mode: false }
    }

    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.importer = Importer::new(search_path);
        self
    }

    /// Under a test harness the importable `superset_config` module is ignored.
    /// `SUPERSET_CONFIG_PATH` is still honored.
    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn get_env(&self) -> &Env {
        &self.env
    }

    pub fn importer(&self) -> &Importer {
        &self.importer
    }

    pub fn registry(&self) -> &'r ModuleRegistry {
        self.registry
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }
}

impl SourceContext<'static> {
    /// The production context: process environment, global registry, and a
    /// search path of the current directory followed by `SUPERSET_CONFIG_SEARCH_PATH`.
    pub fn from_process() -> Self {
        let env = Env::from_process();
        let cwd = std::env::current_dir().ok();
        let search_path = default_search_path(&env, cwd);
        SourceContext::new(ModuleRegistry::global()).search_path(search_path).env(env)
    }
}

/// The current directory (when known), then each non-empty entry of `SUPERSET_CONFIG_SEARCH_PATH`.
pub fn default_search_path(env: &Env, cwd: Option<PathBuf>) -> Vec<PathBuf> {
    let mut search_path: Vec<PathBuf> = cwd.into_iter().collect();
    if let Some(extra) = env.get(SEARCH_PATH_ENV_VAR) {
        search_path.extend(std::env::split_paths(extra).filter(|p| !p.as_os_str().is_empty()));
    }
    search_path
}

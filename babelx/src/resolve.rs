//! Plugin name resolution
//!
//! The transformer loads plugins by module specifier. A [Resolver] maps registry plugin names to
//! those specifiers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolved plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginHandle {
    /// Registry name of the plugin
    pub name: String,
    /// Module specifier or path the transformer should load
    pub module: String,
}

/// Plugin resolution abstraction
pub trait Resolver {
    /// Resolve a plugin name
    ///
    /// # Parameters
    ///
    /// * `name`: registry name of the plugin, e.g. `transform-es2015-classes`
    ///
    /// # Returns
    ///
    /// `None` if the plugin could not be found.
    fn resolve(&self, name: &str) -> Option<PluginHandle>;
}

impl<T: Resolver + ?Sized> Resolver for &T {
    fn resolve(&self, name: &str) -> Option<PluginHandle> {
        (**self).resolve(name)
    }
}

/// Resolver looking for installed plugin packages on the filesystem
#[derive(Default, Debug, Clone)]
pub struct NodeModulesResolver {
    search_dirs: Vec<PathBuf>,
}

impl NodeModulesResolver {
    /// Create a resolver with no search directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver searching the given directories, in order
    ///
    /// # Parameters
    ///
    /// * `search_dirs`: directories containing `node_modules` or `babel-plugin` folders
    pub fn with_search_dirs(search_dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            search_dirs: search_dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a resolver searching `start` and its ancestors, then `extra`
    pub fn from_dir(start: &Path, extra: impl IntoIterator<Item = PathBuf>) -> Self {
        Self::with_search_dirs(
            start
                .ancestors()
                .map(Path::to_path_buf)
                .chain(extra.into_iter()),
        )
    }

    /// Search directories, in lookup order
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    fn candidates(name: &str) -> [PathBuf; 4] {
        [
            Path::new("babel-plugin").join(format!("{}.js", name)),
            Path::new("node_modules").join(format!("@babel/plugin-{}", name)),
            Path::new("node_modules").join(format!("babel-plugin-{}", name)),
            Path::new("node_modules").join(format!("babel-plugin-transform-{}", name)),
        ]
    }
}

impl Resolver for NodeModulesResolver {
    fn resolve(&self, name: &str) -> Option<PluginHandle> {
        let candidates = Self::candidates(name);

        self.search_dirs
            .iter()
            .flat_map(|dir| candidates.iter().map(move |candidate| dir.join(candidate)))
            .find(|path| {
                trace!("trying {}", path.display());
                path.exists()
            })
            .map(|path| PluginHandle {
                name: name.to_owned(),
                module: path.to_string_lossy().into_owned(),
            })
    }
}

/// In-memory resolver
#[derive(Default, Debug, Clone)]
pub struct StaticResolver {
    modules: HashMap<String, String>,
}

impl StaticResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the module for a plugin name
    pub fn insert(&mut self, name: impl Into<String>, module: impl Into<String>) -> &mut Self {
        self.modules.insert(name.into(), module.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> std::iter::FromIterator<(K, V)> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            modules: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, name: &str) -> Option<PluginHandle> {
        self.modules.get(name).map(|module| PluginHandle {
            name: name.to_owned(),
            module: module.clone(),
        })
    }
}

//! Generator configuration consumed as plain values.

use std::str::FromStr;

use crate::error::Error;

/// Front-end flavour of TanStack Query the accessors are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framework {
    /// `@tanstack/react-query`
    #[default]
    React,
    /// `@tanstack/vue-query`
    Vue,
}

impl Framework {
    /// npm package the accessors import from.
    pub fn package(self) -> &'static str {
        match self {
            Framework::React => "@tanstack/react-query",
            Framework::Vue => "@tanstack/vue-query",
        }
    }

    /// Namespace identifier bound by `import * as <ns>`.
    pub fn namespace(self) -> &'static str {
        match self {
            Framework::React => "reactQuery",
            Framework::Vue => "vueQuery",
        }
    }
}

/// Reference to the user-supplied fetch wrapper: `<module>#<symbol>`.
///
/// Without a symbol the module's default export is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherRef {
    /// Import specifier of the module.
    pub module: String,
    /// Named export, or `None` for the default export.
    pub symbol: Option<String>,
}

impl FromStr for FetcherRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, symbol) = match s.split_once('#') {
            Some((module, symbol)) => (module.trim(), Some(symbol.trim())),
            None => (s.trim(), None),
        };
        if module.is_empty() || symbol.is_some_and(str::is_empty) {
            return Err(Error::InvalidFetcher(s.to_string()));
        }
        Ok(Self {
            module: module.to_string(),
            symbol: symbol.map(str::to_string),
        })
    }
}

/// Everything the emitter needs besides the normalized operations.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Fetch wrapper the accessors delegate to.
    pub fetcher: FetcherRef,
    /// Query library flavour.
    pub framework: Framework,
}

impl GeneratorConfig {
    /// Build a config for the given fetcher and framework.
    pub fn new(fetcher: FetcherRef, framework: Framework) -> Self {
        Self { fetcher, framework }
    }
}

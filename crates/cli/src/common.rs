//! Arguments shared by the generate and batch commands.

use clap::{Args, ValueEnum};
use querygen_core::{FetcherRef, Framework, GeneratorConfig};

/// Query library flavour.
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq, Default)]
#[value(rename_all = "lower")]
pub enum FrameworkArg {
    /// @tanstack/react-query
    #[default]
    React,
    /// @tanstack/vue-query
    Vue,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::React => Framework::React,
            FrameworkArg::Vue => Framework::Vue,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Fetch wrapper as `<module>#<symbol>`, or `<module>` for its default export
    #[arg(long, value_name = "MODULE#SYMBOL")]
    pub fetcher: FetcherRef,
    /// Query library the accessors are generated for
    #[arg(long, value_enum, default_value_t = FrameworkArg::React)]
    pub framework: FrameworkArg,
}

impl TargetArgs {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.fetcher.clone(), self.framework.into())
    }
}

use crate::config::{Config, Format};
use clap::Parser;

/// Structured Logger demo - renders sample records with the selected handler
#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Minimum enabled level (debug, info, warn, error)
    #[clap(short = 'l', long, default_value = crate::defaults::LEVEL, help_heading = "Core Options")]
    pub level: String,

    /// Base output format
    #[clap(short = 'f', long, value_enum, default_value_t = crate::defaults::FORMAT, help_heading = "Core Options")]
    pub format: Format,

    /// Deployment environment; development, local and dev enable colors
    #[clap(short = 'e', long, default_value = crate::defaults::ENVIRONMENT)]
    pub environment: String,

    /// Force colored output
    #[clap(long, default_value_t = false)]
    pub colors: bool,

    /// Do not capture call sites
    #[clap(long, default_value_t = false)]
    pub no_caller: bool,

    /// Ignore the other options and derive everything from the environment name
    #[clap(long, default_value_t = false)]
    pub from_env: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        if args.from_env {
            return Config::for_environment(&args.environment);
        }
        Self {
            level: args.level.clone(),
            format: args.format,
            enable_caller: !args.no_caller,
            enable_stacktrace: true,
            enable_colors: args.colors,
            environment: args.environment.clone(),
        }
    }
}

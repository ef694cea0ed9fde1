//! # Configuration Module
//!
//! Settings are layered, later sources override earlier ones:
//!
//! 1. the built-in defaults (`default-config.yaml`)
//! 2. an optional YAML file passed with `--config`
//! 3. command line arguments and their environment variables

mod args;

pub use args::Args;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base URL of the cluster, `_stats` is resolved relative to it.
    pub url: Url,
    /// How many indices the report lists.
    pub top: usize,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("url".to_string(), self.url.to_string().into());
        cache.insert("top".to_string(), (self.top as u64).into());
        Ok(cache)
    }
}

impl Config {
    pub fn new(args: &Args) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder().add_source(Config::default());

        if let Some(path) = &args.config {
            builder = builder.add_source(config::File::from(path.clone()).format(config::FileFormat::Yaml));
        }

        builder = builder.add_source(args.clone());

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }
}

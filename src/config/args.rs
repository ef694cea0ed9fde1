use clap::Parser;
use std::path::PathBuf;

/// Lists the indices of an Elasticsearch cluster that use the most query cache, fielddata,
/// segment and request cache memory.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// URL of the Elasticsearch cluster [default: http://127.0.0.1:9200]
    #[clap(long, env = "ES_INDEX_MEMORY_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Number of indices to report [default: 10]
    #[clap(long, env = "ES_INDEX_MEMORY_TOP", value_name = "N")]
    pub top: Option<usize>,

    /// Optional YAML file with `url` and `top` settings. Command line arguments take precedence.
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enables debug logging.
    #[clap(short, long, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(url) = &self.url {
                cache.insert("url".to_string(), url.clone().into());
            }
            if let Some(top) = self.top {
                cache.insert("top".to_string(), (top as u64).into());
            }
            Ok(cache)
        }
    }
}

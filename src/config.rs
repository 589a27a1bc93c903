//! Source list.
//!
//! Sources come from a YAML file passed with `--config`, or from the built-in
//! [`default_sources`] when none is given:
//!
//! ```yaml
//! sources:
//!   - name: toutiao
//!     urls: ["https://www.cunyuapi.top/jrtthot"]
//!     kind: json_api
//!   - name: ithome
//!     urls: ["https://www.ithome.com/"]
//!     kind: anchors
//!     section_marker: 日榜
//!     origin: https://www.ithome.com
//!     domain: ithome.com
//! ```
//!
//! `kind` selects the [`Adapter`]; the remaining keys are that adapter's
//! settings.

use crate::models::DailySnapshot;
use crate::scrapers::{Adapter, anchors, embedded_json, grouped, selector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// One configured source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Key of this source's list in the daily snapshot.
    pub name: String,
    /// Candidate URLs, tried in order until one answers.
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub adapter: Adapter,
}

#[derive(Debug, Serialize, Deserialize)]
struct SourcesFile {
    sources: Vec<Source>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid source list: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("source `{0}` has no URLs")]
    NoUrls(String),
    #[error("source `{0}` is listed twice")]
    Duplicate(String),
    #[error("source name `{0}` is reserved by the snapshot format")]
    ReservedName(String),
}

/// Parse a YAML source list.
pub fn parse_sources(yaml: &str) -> Result<Vec<Source>, ConfigError> {
    let file: SourcesFile = serde_yaml::from_str(yaml)?;
    let mut seen = std::collections::HashSet::new();
    for source in &file.sources {
        if source.urls.is_empty() {
            return Err(ConfigError::NoUrls(source.name.clone()));
        }
        if source.name == DailySnapshot::DATE_KEY {
            return Err(ConfigError::ReservedName(source.name.clone()));
        }
        if !seen.insert(source.name.as_str()) {
            return Err(ConfigError::Duplicate(source.name.clone()));
        }
    }
    Ok(file.sources)
}

/// Load the source list from `path`.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_sources(path: impl AsRef<Path>) -> Result<Vec<Source>, ConfigError> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let sources = parse_sources(&yaml)?;
    info!(count = sources.len(), "Loaded source list");
    Ok(sources)
}

/// The built-in source set.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source {
            name: "bbc".to_string(),
            urls: vec!["https://www.bbc.com/zhongwen/simp".to_string()],
            adapter: Adapter::EmbeddedJson(embedded_json::Settings::default()),
        },
        Source {
            name: "baidu".to_string(),
            urls: vec!["https://top.baidu.com/board?tab=realtime".to_string()],
            adapter: Adapter::Selector(selector::Settings {
                title_selector: "div.c-single-text-ellipsis".to_string(),
                link_selector: "div.category-wrap_iQLoo .title_dIF3B".to_string(),
            }),
        },
        Source {
            name: "toutiao".to_string(),
            urls: vec![
                "https://www.cunyuapi.top/jrtthot".to_string(),
                "https://dabenshi.cn/other/api/hot.php?type=toutiaoHot".to_string(),
            ],
            adapter: Adapter::JsonApi,
        },
        Source {
            name: "ithome".to_string(),
            urls: vec!["https://www.ithome.com/".to_string()],
            adapter: Adapter::Anchors(anchors::Settings {
                section_marker: "日榜".to_string(),
                origin: "https://www.ithome.com".to_string(),
                domain: "ithome.com".to_string(),
                menu_labels: ["日榜", "周榜", "月榜"].map(String::from).to_vec(),
            }),
        },
        Source {
            name: "dongqiudi".to_string(),
            urls: vec![
                "https://api.dongqiudi.com/app/tabs/iphone/104.json?mark=gif&version=500".to_string(),
                "https://api.dongqiudi.com/app/tabs/iphone/104.json".to_string(),
                "https://api.dongqiudi.com/app/tabs/iphone/104.json?version=500".to_string(),
            ],
            adapter: Adapter::Grouped(grouped::Settings {
                domain: Some("dongqiudi.com".to_string()),
                ..grouped::Settings::default()
            }),
        },
        Source {
            name: "bbc_rss".to_string(),
            urls: vec!["https://feeds.bbci.co.uk/zhongwen/simp/rss.xml".to_string()],
            adapter: Adapter::Rss,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
sources:
  - name: toutiao
    urls: ["https://www.cunyuapi.top/jrtthot"]
    kind: json_api
  - name: bbc
    urls: ["https://www.bbc.com/zhongwen/simp"]
    kind: embedded_json
  - name: feed
    urls: ["https://example.com/rss.xml"]
    kind: rss
  - name: ithome
    urls: ["https://www.ithome.com/"]
    kind: anchors
    section_marker: 日榜
    origin: https://www.ithome.com
    domain: ithome.com
  - name: baidu
    urls: ["https://top.baidu.com/board?tab=realtime"]
    kind: selector
    title_selector: div.c-single-text-ellipsis
    link_selector: a.title
  - name: dongqiudi
    urls:
      - https://api.dongqiudi.com/app/tabs/iphone/104.json
      - https://api.dongqiudi.com/app/tabs/iphone/104.json?version=500
    kind: grouped
    domain: dongqiudi.com
"#;

    #[test]
    fn test_parse_every_kind() {
        let sources = parse_sources(SAMPLE).unwrap();
        assert_eq!(sources.len(), 6);
        assert_eq!(sources[0].adapter, Adapter::JsonApi);
        assert_eq!(
            sources[1].adapter,
            Adapter::EmbeddedJson(embedded_json::Settings::default())
        );
        assert_eq!(sources[2].adapter, Adapter::Rss);

        let Adapter::Anchors(anchors) = &sources[3].adapter else {
            panic!("expected anchors, got {:?}", sources[3].adapter);
        };
        assert_eq!(anchors.section_marker, "日榜");
        assert!(anchors.menu_labels.is_empty());

        let Adapter::Grouped(grouped) = &sources[5].adapter else {
            panic!("expected grouped, got {:?}", sources[5].adapter);
        };
        assert_eq!(grouped.groups_key, "contents");
        assert_eq!(grouped.domain.as_deref(), Some("dongqiudi.com"));
        assert_eq!(sources[5].urls.len(), 2);
    }

    #[test]
    fn test_unknown_kind_is_error() {
        let yaml = "sources:\n  - name: x\n    urls: [\"http://x\"]\n    kind: telepathy\n";
        assert!(matches!(parse_sources(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_source_without_urls_is_error() {
        let yaml = "sources:\n  - name: x\n    urls: []\n    kind: rss\n";
        assert!(matches!(parse_sources(yaml), Err(ConfigError::NoUrls(name)) if name == "x"));
    }

    #[test]
    fn test_duplicate_names_are_error() {
        let yaml = "sources:\n  - {name: x, urls: [\"http://a\"], kind: rss}\n  - {name: x, urls: [\"http://b\"], kind: json_api}\n";
        assert!(matches!(parse_sources(yaml), Err(ConfigError::Duplicate(_))));
    }

    #[test]
    fn test_source_named_date_is_rejected() {
        let yaml = "sources:\n  - {name: date, urls: [\"http://a\"], kind: rss}\n";
        assert!(matches!(parse_sources(yaml), Err(ConfigError::ReservedName(name)) if name == "date"));
    }

    #[test]
    fn test_defaults_survive_yaml() {
        let file = SourcesFile {
            sources: default_sources(),
        };
        let yaml = serde_yaml::to_string(&file).unwrap();
        assert_eq!(parse_sources(&yaml).unwrap(), file.sources);
    }

    #[tokio::test]
    async fn test_load_sources_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let sources = load_sources(&path).await.unwrap();
        assert_eq!(sources[4].name, "baidu");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_sources(dir.path().join("absent.yaml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

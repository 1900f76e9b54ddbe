use std::{collections::BTreeMap, fmt};

use crate::{ArticleId, Time};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct ChainId(pub String);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ChainInfo {
    pub name: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Embed {
    /// Third-party markup, bound by the embed widget once rendered
    #[serde(default)]
    pub tweet: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedArticle {
    pub id: ArticleId,
    #[serde(default)]
    pub slug: String,
    pub date: Time,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub embed: Option<Embed>,
    #[serde(default)]
    pub important_embed: Option<bool>,
}

impl FeedArticle {
    pub fn url(&self) -> String {
        format!("/zpravy/{}/{}", self.id, self.slug)
    }

    pub fn tweet(&self) -> Option<&str> {
        self.embed.as_ref().and_then(|e| e.tweet.as_deref())
    }

    /// The important sidebar shows embeds unless explicitly opted out
    pub fn important_tweet(&self) -> Option<&str> {
        match self.important_embed {
            Some(false) => None,
            _ => self.tweet(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FeedDataset {
    #[serde(default)]
    pub articles: Vec<FeedArticle>,
    #[serde(default)]
    pub important: Vec<FeedArticle>,
    #[serde(default)]
    pub chains: BTreeMap<ChainId, ChainInfo>,
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FeedQuery {
    pub chain: Option<ChainId>,
}

impl FeedQuery {
    pub fn all() -> FeedQuery {
        FeedQuery { chain: None }
    }

    pub fn for_chain(chain: ChainId) -> FeedQuery {
        FeedQuery { chain: Some(chain) }
    }

    /// Query-string pairs, empty for the global feed
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        self.chain
            .iter()
            .map(|c| ("chain", c.0.clone()))
            .collect()
    }
}

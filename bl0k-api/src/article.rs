use std::{collections::BTreeSet, fmt};

use crate::{ChainId, Comment, HistoryEntry, Time, User, ARTICLE_ID_MARKER};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct ArticleId(pub String);

impl ArticleId {
    /// Builds an id from a route parameter, adding the marker if the route omitted it
    pub fn from_route_param(param: &str) -> ArticleId {
        match param.starts_with(ARTICLE_ID_MARKER) {
            true => ArticleId(String::from(param)),
            false => ArticleId(format!("{ARTICLE_ID_MARKER}{param}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum ArticleType {
    Draft,
    InQueue,
    Public,
    Other(String),
}

impl ArticleType {
    pub fn as_str(&self) -> &str {
        match self {
            ArticleType::Draft => "draft",
            ArticleType::InQueue => "in-queue",
            ArticleType::Public => "public",
            ArticleType::Other(s) => s,
        }
    }
}

impl From<String> for ArticleType {
    fn from(s: String) -> ArticleType {
        match &s as &str {
            "draft" => ArticleType::Draft,
            "in-queue" => ArticleType::InQueue,
            "public" => ArticleType::Public,
            _ => ArticleType::Other(s),
        }
    }
}

impl From<ArticleType> for String {
    fn from(t: ArticleType) -> String {
        match t {
            ArticleType::Other(s) => s,
            t => String::from(t.as_str()),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Card {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: String,
}

/// Output of the server-side renderer
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Rendered {
    #[serde(default)]
    pub card: Card,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ArticleData {
    pub text: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Chain {
    pub id: ChainId,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Link {
    pub url: String,
    pub surl: String,
    pub link: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,

    /// Short identifier, the one just-created articles are matched on
    pub sid: ArticleId,

    /// Canonical route of this article
    pub url: String,

    #[serde(rename = "type")]
    pub kind: ArticleType,
    pub author: User,
    pub date: Time,
    #[serde(default)]
    pub important: bool,

    /// Raw source, only sent along with the full representation
    #[serde(default)]
    pub data: Option<ArticleData>,
    #[serde(default)]
    pub card: Card,

    /// Renderer output, sent along with the full representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<Rendered>,

    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub chains: Vec<Chain>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub comments_count: usize,

    /// None until the comments were actually loaded
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,

    /// Edit history in chronological order, only sent to privileged viewers
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
}

impl Article {
    /// Card as the renderer produced it, the display card if the server did not send it
    pub fn rendered_card(&self) -> &Card {
        self.rendered.as_ref().map_or(&self.card, |r| &r.card)
    }

    pub fn is_draft(&self) -> bool {
        self.kind == ArticleType::Draft
    }

    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author.id == user.id
    }

    /// Comments are announced but not there yet
    pub fn comments_pending(&self) -> bool {
        self.comments_count > 0 && self.comments.is_none()
    }
}

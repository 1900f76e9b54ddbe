use std::collections::{BTreeMap, BTreeSet};

use bl0k_api::{
    Article, ArticleData, ArticleId, ArticleType, Card, Chain, ChainId, ChainInfo, Comment,
    CommentId, FeedArticle, FeedDataset, User, UserId,
};
use chrono::{Duration, Utc};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 5;
const NUM_ARTICLES: usize = 60;
const TITLE_WORDS: usize = 6;
const TEXT_WORDS: usize = 40;
const MAX_COMMENTS: usize = 4;
const COMMENT_WORDS: usize = 15;
const IMPORTANT_RATIO: f64 = 0.15;
const TWEET_RATIO: f64 = 0.2;

const CHAINS: &[(&str, &str)] = &[("btc", "Bitcoin"), ("eth", "Ethereum"), ("dot", "Polkadot")];

fn gen_users(rng: &mut impl Rng) -> Vec<User> {
    (0..NUM_USERS)
        .map(|i| {
            let name = lipsum::lipsum_words(1).to_lowercase();
            let name = name.trim_end_matches('.');
            User {
                id: UserId(format!("u{i}")),
                username: format!("{name}{i}"),
                avatar: format!("/avatars/{i}.png"),
                admin: i == 0 || rng.gen_bool(0.1),
            }
        })
        .collect()
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn gen_comment(rng: &mut impl Rng, users: &[User], i: usize, article: &Article) -> Comment {
    let text = lipsum::lipsum_words(COMMENT_WORDS);
    Comment {
        id: CommentId(format!("c{}-{i}", article.id)),
        author: users.choose(rng).unwrap_or(&users[0]).clone(),
        created: article.date + Duration::minutes(rng.gen_range(1..600)),
        html: format!("<p>{text}</p>"),
        text,
    }
}

fn gen_article(rng: &mut impl Rng, users: &[User], i: usize) -> Article {
    let id = ArticleId(format!("0x{i:04x}"));
    let title = lipsum::lipsum_title();
    let text = lipsum::lipsum_words(TEXT_WORDS);
    let (chain_id, chain_name) = CHAINS[rng.gen_range(0..CHAINS.len())];
    let mut a = Article {
        id: id.clone(),
        sid: id.clone(),
        url: format!("/zpravy/{id}/{}", slugify(&title)),
        kind: match rng.gen_range(0..10) {
            0 => ArticleType::Draft,
            1 => ArticleType::InQueue,
            _ => ArticleType::Public,
        },
        author: users.choose(rng).unwrap_or(&users[0]).clone(),
        date: Utc::now() - Duration::minutes(rng.gen_range(0..60 * 24 * 7)),
        important: rng.gen_bool(IMPORTANT_RATIO),
        data: Some(ArticleData {
            text: format!("{text} #{chain_id}"),
        }),
        card: Card {
            description: lipsum::lipsum_words(TITLE_WORDS * 2),
            html: format!("<p><b>{title}</b> {text}</p>"),
            text: text.clone(),
            title,
        },
        rendered: None,
        tags: BTreeSet::from([String::from(chain_id)]),
        chains: vec![Chain {
            id: ChainId(String::from(chain_id)),
            name: String::from(chain_name),
        }],
        sources: Vec::new(),
        links: Vec::new(),
        comments_count: 0,
        comments: None,
        history: None,
    };
    let comments = (0..rng.gen_range(0..=MAX_COMMENTS))
        .map(|c| gen_comment(rng, users, c, &a))
        .collect::<Vec<_>>();
    a.comments_count = comments.len();
    a.comments = Some(comments);
    a
}

fn feed_item(rng: &mut impl Rng, a: &Article) -> FeedArticle {
    FeedArticle {
        id: a.id.clone(),
        slug: a.url.rsplit('/').next().map(String::from).unwrap_or_default(),
        date: a.date,
        topic: a.chains.first().map(|c| c.name.clone()),
        html: a.card.html.clone(),
        embed: None,
        important_embed: rng.gen_bool(TWEET_RATIO).then(|| false),
    }
}

fn main() {
    let mut rng = rand::thread_rng();
    let users = gen_users(&mut rng);

    let mut articles = (0..NUM_ARTICLES)
        .map(|i| gen_article(&mut rng, &users, i))
        .collect::<Vec<_>>();
    articles.sort_by_key(|a| std::cmp::Reverse(a.date));

    let public = articles
        .iter()
        .filter(|a| a.kind == ArticleType::Public)
        .collect::<Vec<_>>();
    let feed = FeedDataset {
        articles: public.iter().map(|a| feed_item(&mut rng, a)).collect(),
        important: public
            .iter()
            .filter(|a| a.important)
            .map(|a| feed_item(&mut rng, a))
            .collect(),
        chains: CHAINS
            .iter()
            .map(|(id, name)| {
                (
                    ChainId(String::from(*id)),
                    ChainInfo {
                        name: String::from(*name),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
    };

    let out = serde_json::json!({
        "users": users,
        "feed": feed,
        "articles": articles,
    });
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("failed serializing test data: {e}"),
    }
}

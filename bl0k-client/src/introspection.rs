use chrono_tz::Tz;

use crate::{
    api::{Article, Time, User},
    datetime,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkTarget {
    pub href: String,
    pub text: String,
    pub mono: bool,
}

impl LinkTarget {
    pub fn new(href: &str, text: Option<&str>, mono: bool) -> LinkTarget {
        LinkTarget {
            href: String::from(href),
            text: String::from(text.unwrap_or(href)),
            mono,
        }
    }

    /// Links within the site; the router handles the ones it knows
    pub fn is_internal(&self) -> bool {
        self.href.starts_with('/')
    }

    pub fn opens_new_tab(&self) -> bool {
        !self.is_internal()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    /// Large bold monospace value
    Code(String),
    Link(LinkTarget),
    Author {
        profile: LinkTarget,
        id: String,
    },
    Text(String),
    Bold(String),

    /// Monospace block, for raw and rendered text
    Block(String),
    Tables(Vec<Vec<Row>>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    pub title: &'static str,
    pub value: Cell,
}

fn row(title: &'static str, value: Cell) -> Row {
    Row { title, value }
}

/// Only admins get to see the raw article, and only when the server sent it
pub fn introspection_visible(article: &Article, viewer: Option<&User>) -> bool {
    viewer.map_or(false, |v| v.admin) && article.data.is_some()
}

pub fn introspection_rows(a: &Article, now: Time, tz: Tz) -> Vec<Row> {
    let source = a.data.as_ref().map(|d| d.text.clone()).unwrap_or_default();
    vec![
        row("ID", Cell::Code(a.id.0.clone())),
        row(
            "sID",
            Cell::Link(LinkTarget::new(&format!("/{}", a.sid), Some(a.sid.as_str()), true)),
        ),
        row("URL", Cell::Link(LinkTarget::new(&a.url, None, false))),
        row("Status", Cell::Code(String::from(a.kind.as_str()))),
        row(
            "Autor",
            Cell::Author {
                profile: LinkTarget::new(
                    &a.author.profile_url(),
                    Some(&format!("@{}", a.author.username)),
                    false,
                ),
                id: a.author.id.0.clone(),
            },
        ),
        row(
            "Vytvořeno",
            Cell::Text(datetime::format_full_with_distance(a.date, now, tz)),
        ),
        row(
            "Duležitá zpráva",
            match a.important {
                true => Cell::Bold(String::from("ano")),
                false => Cell::Text(String::from("ne")),
            },
        ),
        row("Zdrojový text", Cell::Block(source)),
        row("Čistý text", Cell::Block(a.rendered_card().text.clone())),
        row(
            "Délka čistého textu",
            Cell::Text(format!("{} znaků", a.rendered_card().text.chars().count())),
        ),
        row(
            "Chainy",
            Cell::Text(
                a.chains
                    .iter()
                    .map(|c| &c.name as &str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ),
        row(
            "Tagy",
            Cell::Text(
                a.tags
                    .iter()
                    .map(|t| format!("#{t}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ),
        row(
            "Zdroje",
            Cell::Tables(
                a.sources
                    .iter()
                    .map(|s| {
                        vec![
                            row("Type", Cell::Code(s.name.clone())),
                            row("URL", Cell::Link(LinkTarget::new(&s.url, None, false))),
                        ]
                    })
                    .collect(),
            ),
        ),
        row(
            "Odkazy",
            Cell::Tables(
                a.links
                    .iter()
                    .map(|l| {
                        vec![
                            row("URL", Cell::Link(LinkTarget::new(&l.url, None, false))),
                            row("sURL", Cell::Link(LinkTarget::new(&l.surl, None, false))),
                            row("Link ID", Cell::Code(l.link.clone())),
                        ]
                    })
                    .collect(),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use bl0k_mock_server::MockServer;
    use chrono_tz::Europe::Prague;
    use futures::executor::block_on;

    use super::*;
    use crate::api::{ArticleId, Backend, Card, Rendered};

    fn full_article() -> Article {
        let server = MockServer::example();
        server.login(Some(MockServer::admin()));
        block_on(server.fetch_article(&ArticleId(String::from("0xAAA")))).unwrap()
    }

    fn value<'a>(rows: &'a [Row], title: &str) -> &'a Cell {
        &rows
            .iter()
            .find(|r| r.title == title)
            .unwrap_or_else(|| panic!("no row {title}"))
            .value
    }

    #[test]
    fn visible_to_admins_with_data() {
        let a = full_article();
        assert!(introspection_visible(&a, Some(&MockServer::admin())));
        assert!(!introspection_visible(&a, Some(&MockServer::bob())));
        assert!(!introspection_visible(&a, None));
        let mut redacted = a.clone();
        redacted.data = None;
        assert!(!introspection_visible(&redacted, Some(&MockServer::admin())));
    }

    #[test]
    fn rows() {
        let a = full_article();
        let rows = introspection_rows(&a, a.date + chrono::Duration::days(2), Prague);
        assert_eq!(rows.len(), 14);
        assert_eq!(value(&rows, "ID"), &Cell::Code(String::from("0xAAA")));
        match value(&rows, "sID") {
            Cell::Link(l) => {
                assert_eq!(l.href, "/0xAAA");
                assert!(l.is_internal());
                assert!(l.mono);
            }
            c => panic!("unexpected cell {c:?}"),
        }
        match value(&rows, "Autor") {
            Cell::Author { profile, id } => {
                assert_eq!(profile.text, format!("@{}", a.author.username));
                assert_eq!(profile.href, format!("/u/{}", a.author.username));
                assert!(profile.is_internal());
                assert!(!profile.opens_new_tab());
                assert_eq!(id, &a.author.id.0);
            }
            c => panic!("unexpected cell {c:?}"),
        }
        match value(&rows, "Vytvořeno") {
            Cell::Text(t) => assert!(t.ends_with("(2 days zpět)")),
            c => panic!("unexpected cell {c:?}"),
        }
        assert_eq!(
            value(&rows, "Délka čistého textu"),
            &Cell::Text(format!("{} znaků", a.card.text.chars().count()))
        );
        assert_eq!(value(&rows, "Tagy"), &Cell::Text(String::from("#btc, #eth")));
        match value(&rows, "Odkazy") {
            Cell::Tables(t) => {
                assert_eq!(t.len(), a.links.len());
                assert!(t.iter().all(|r| r.len() == 3));
            }
            c => panic!("unexpected cell {c:?}"),
        }
    }

    #[test]
    fn text_length_counts_characters() {
        let mut a = full_article();
        a.card.text = String::from("žluťoučký kůň");
        let rows = introspection_rows(&a, a.date, Prague);
        assert_eq!(
            value(&rows, "Délka čistého textu"),
            &Cell::Text(String::from("13 znaků"))
        );
    }

    #[test]
    fn clean_text_prefers_renderer_output() {
        let mut a = full_article();
        a.rendered = Some(Rendered {
            card: Card {
                text: String::from("abc"),
                ..Card::default()
            },
        });
        let rows = introspection_rows(&a, a.date, Prague);
        assert_eq!(value(&rows, "Čistý text"), &Cell::Block(String::from("abc")));
        assert_eq!(
            value(&rows, "Délka čistého textu"),
            &Cell::Text(String::from("3 znaků"))
        );
    }

    #[test]
    fn external_links() {
        let l = LinkTarget::new("https://example.org", None, false);
        assert!(!l.is_internal());
        assert!(l.opens_new_tab());
        assert_eq!(l.text, "https://example.org");
    }
}

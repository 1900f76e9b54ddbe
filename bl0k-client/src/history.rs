use crate::api::{Article, HistoryAction, HistoryEntry, User};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Emphasis {
    Orange,
    Blue,
    Green,
    Red,
}

impl Emphasis {
    pub fn css_class(&self) -> &'static str {
        match self {
            Emphasis::Orange => "text-orange-700 font-bold",
            Emphasis::Blue => "text-blue-700 font-bold",
            Emphasis::Green => "text-green-700 font-bold",
            Emphasis::Red => "text-red-700 font-bold",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LabelPart {
    pub text: &'static str,
    pub emphasis: Option<Emphasis>,
}

const fn plain(text: &'static str) -> LabelPart {
    LabelPart {
        text,
        emphasis: None,
    }
}

const fn emph(text: &'static str, e: Emphasis) -> LabelPart {
    LabelPart {
        text,
        emphasis: Some(e),
    }
}

pub fn action_label(a: &HistoryAction) -> Vec<LabelPart> {
    match a {
        HistoryAction::Created => vec![plain("vytvořil "), emph("koncept", Emphasis::Orange)],
        HistoryAction::Updated => vec![plain("upravil zprávu")],
        HistoryAction::MovedToQueue => {
            vec![plain("přesunul zprávu do "), emph("fronty", Emphasis::Blue)]
        }
        HistoryAction::Published => vec![emph("zveřejnil", Emphasis::Green), plain(" zprávu")],
        HistoryAction::Rejected => vec![emph("zamítnul", Emphasis::Red), plain(" zprávu")],
        HistoryAction::Unknown => vec![plain("změnil zprávu")],
    }
}

/// Edit history as the viewer may see it, newest first
///
/// Only the author and admins see the history, and only when there is some.
pub fn visible_history<'a>(article: &'a Article, viewer: Option<&User>) -> Option<Vec<&'a HistoryEntry>> {
    let viewer = viewer?;
    if !viewer.admin && !article.is_authored_by(viewer) {
        return None;
    }
    let history = article.history.as_ref()?;
    if history.is_empty() {
        return None;
    }
    Some(history.iter().rev().collect())
}

pub fn history_heading(entries: usize) -> String {
    format!("Historie úprav ({entries})")
}

pub fn toggle_label(shown: bool) -> &'static str {
    match shown {
        true => "Skrýt historii",
        false => "Zobrazit historii",
    }
}

#[cfg(test)]
mod tests {
    use bl0k_mock_server::MockServer;
    use futures::executor::block_on;

    use super::*;
    use crate::api::{ArticleId, Backend};

    fn label_text(a: &HistoryAction) -> String {
        action_label(a).iter().map(|p| p.text).collect()
    }

    #[test]
    fn published_label() {
        let parts = action_label(&HistoryAction::Published);
        assert_eq!(parts[0].text, "zveřejnil");
        assert_eq!(parts[0].emphasis, Some(Emphasis::Green));
        assert!(parts[1].text.contains("zprávu"));
        assert!(parts[1].emphasis.is_none());
        assert_eq!(label_text(&HistoryAction::Published), "zveřejnil zprávu");
    }

    #[test]
    fn other_labels() {
        assert_eq!(label_text(&HistoryAction::Created), "vytvořil koncept");
        assert_eq!(label_text(&HistoryAction::Updated), "upravil zprávu");
        assert_eq!(
            label_text(&HistoryAction::MovedToQueue),
            "přesunul zprávu do fronty"
        );
        assert_eq!(label_text(&HistoryAction::Rejected), "zamítnul zprávu");
        let parsed: HistoryAction = serde_json::from_str(r#""status:public""#).unwrap();
        assert_eq!(parsed, HistoryAction::Published);
        let parsed: HistoryAction = serde_json::from_str(r#""status:archived""#).unwrap();
        assert_eq!(parsed, HistoryAction::Unknown);
    }

    #[test]
    fn history_visibility() {
        let server = MockServer::example();
        server.login(Some(MockServer::admin()));
        let a = block_on(server.fetch_article(&ArticleId(String::from("0xAAA")))).unwrap();
        let author = a.author.clone();
        assert!(visible_history(&a, None).is_none());
        assert!(visible_history(&a, Some(&MockServer::bob())).is_none());

        let h = visible_history(&a, Some(&author)).unwrap();
        let original = a.history.as_ref().unwrap();
        assert_eq!(h.len(), original.len());
        assert_eq!(h[0], original.last().unwrap());
        assert_eq!(*h.last().unwrap(), &original[0]);
        assert_eq!(history_heading(h.len()), format!("Historie úprav ({})", original.len()));
        assert!(visible_history(&a, Some(&MockServer::admin())).is_some());

        let mut empty = a.clone();
        empty.history = Some(Vec::new());
        assert!(visible_history(&empty, Some(&author)).is_none());
    }

    #[test]
    fn toggle_labels() {
        assert_eq!(toggle_label(false), "Zobrazit historii");
        assert_eq!(toggle_label(true), "Skrýt historii");
        assert_eq!(history_heading(3), "Historie úprav (3)");
    }
}

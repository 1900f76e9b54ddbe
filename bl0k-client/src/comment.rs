use crate::api::{Article, ArticleId, Backend, Comment, CommentId, Error, NewComment, User};

/// What a key press in the comment textarea should do
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAction {
    /// Submit the form and suppress the newline
    Submit,

    /// Let the textarea handle the key, Shift+Enter inserting a newline
    Default,
}

pub fn key_action(key: &str, shift: bool) -> KeyAction {
    match (key, shift) {
        ("Enter", false) => KeyAction::Submit,
        _ => KeyAction::Default,
    }
}

/// Text of the comment being written
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentDraft {
    text: String,
}

impl CommentDraft {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) -> bool {
        self.text = text;
        true
    }

    /// Number of lines the textarea should display
    pub fn rows(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Builds the comment to send, refusing to send blank text
    pub fn prepare(&self) -> Result<NewComment, Error> {
        match self.text.trim().is_empty() {
            true => Err(Error::EmptyComment),
            false => Ok(NewComment {
                text: self.text.clone(),
            }),
        }
    }

    /// The server accepted the comment
    pub fn submitted(&mut self) -> bool {
        self.text.clear();
        true
    }
}

pub async fn submit_comment<B: Backend + ?Sized>(
    backend: &B,
    article: &ArticleId,
    comment: NewComment,
) -> Result<Comment, Error> {
    tracing::debug!(%article, "submitting comment");
    backend.post_comment(article, &comment).await
}

/// Interactive yes/no question to the user
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

pub fn delete_prompt(comment: &CommentId) -> String {
    format!("Opravdu smazat komentář \"{comment}\"?")
}

/// A deletion the user agreed to, and that can now be sent
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingDelete {
    pub article: ArticleId,
    pub comment: CommentId,
}

impl PendingDelete {
    /// Asks the user; None if they declined
    pub fn confirm<C: Confirm + ?Sized>(
        confirm: &C,
        article: ArticleId,
        comment: CommentId,
    ) -> Option<PendingDelete> {
        if !confirm.confirm(&delete_prompt(&comment)) {
            tracing::debug!(%comment, "comment deletion declined");
            return None;
        }
        Some(PendingDelete { article, comment })
    }

    pub async fn send<B: Backend + ?Sized>(self, backend: &B) -> Result<(), Error> {
        tracing::debug!(article = %self.article, comment = %self.comment, "deleting comment");
        backend.delete_comment(&self.article, &self.comment).await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommentRow<'a> {
    pub comment: &'a Comment,
    pub can_delete: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommentsView<'a> {
    /// Comments are announced but not loaded yet
    Loading,

    /// Nothing to show and nothing the viewer could do
    Nothing,

    Thread {
        rows: Vec<CommentRow<'a>>,

        /// Tell anonymous viewers they need to log in to comment
        login_hint: bool,

        /// Show the submission form
        form: bool,
    },
}

pub fn comments_view<'a>(article: &'a Article, viewer: Option<&User>) -> CommentsView<'a> {
    if article.comments_pending() {
        return CommentsView::Loading;
    }
    let comments = article.comments.as_deref().unwrap_or(&[]);
    if comments.is_empty() && viewer.is_none() {
        return CommentsView::Nothing;
    }
    CommentsView::Thread {
        rows: comments
            .iter()
            .map(|comment| CommentRow {
                comment,
                can_delete: viewer.map_or(false, |v| v.can_modify(&comment.author.id)),
            })
            .collect(),
        login_hint: viewer.is_none(),
        form: viewer.is_some(),
    }
}

/// Drafts without comments are not discussed, except by admins
pub fn comments_section_visible(article: &Article, viewer: Option<&User>) -> bool {
    let is_admin = viewer.map_or(false, |v| v.admin);
    !(article.is_draft() && !is_admin && article.comments_count == 0)
}

pub fn comments_heading(article: &Article) -> String {
    format!("Komentáře ({})", article.comments_count)
}

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u32,
    pub user: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only comment feed. Entries cannot be edited or removed once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentLog {
    entries: Vec<Comment>,
}

impl CommentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a comment, assigning the next id, and returns a copy of it.
    pub fn append(
        &mut self,
        user: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Comment {
        let comment = Comment {
            id: self.entries.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            user: user.into(),
            text: text.into(),
            timestamp,
        };
        self.entries.push(comment.clone());
        comment
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = CommentLog::new();
        log.append("Ana", "first", Utc::now());
        log.append("Vagner", "second", Utc::now());

        let texts: Vec<&str> = log.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_append_returns_stored_comment() {
        let mut log = CommentLog::new();
        let when = Utc::now();
        let returned = log.append("Ana", "slab delivered", when);

        assert_eq!(log.iter().last(), Some(&returned));
        assert_eq!(returned.timestamp, when);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let mut log = CommentLog::new();
        let first = log.append("Ana", "a", Utc::now()).id;
        let second = log.append("Ana", "b", Utc::now()).id;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}

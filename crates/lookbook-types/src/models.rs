use serde::{Deserialize, Serialize};

/// Visibility of a post or look. Stored as an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    Public,
    Private,
    FriendsOnly,
}

impl Privacy {
    pub fn as_i64(self) -> i64 {
        match self {
            Privacy::Public => 0,
            Privacy::Private => 1,
            Privacy::FriendsOnly => 2,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Privacy::Public),
            1 => Some(Privacy::Private),
            2 => Some(Privacy::FriendsOnly),
            _ => None,
        }
    }
}

/// Top-level comment or an answer to one. Stored as an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Comment,
    Answer,
}

impl CommentKind {
    pub fn as_i64(self) -> i64 {
        match self {
            CommentKind::Comment => 0,
            CommentKind::Answer => 1,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(CommentKind::Comment),
            1 => Some(CommentKind::Answer),
            _ => None,
        }
    }
}

/// Wire discriminator for the entity a comment hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentEntityKind {
    Post,
    Look,
}

/// The entity that owns a comment, carrying its uid. Resolved once at the
/// request boundary; the db layer selects the matching association table
/// (`post_comments` or `look_comments`) from the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOwner {
    Post(String),
    Look(String),
}

impl CommentOwner {
    pub fn new(kind: CommentEntityKind, uid: String) -> Self {
        match kind {
            CommentEntityKind::Post => CommentOwner::Post(uid),
            CommentEntityKind::Look => CommentOwner::Look(uid),
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            CommentOwner::Post(uid) | CommentOwner::Look(uid) => uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privacy_integer_mapping_roundtrips() {
        for p in [Privacy::Public, Privacy::Private, Privacy::FriendsOnly] {
            assert_eq!(Privacy::from_i64(p.as_i64()), Some(p));
        }
        assert_eq!(Privacy::from_i64(42), None);
    }

    #[test]
    fn comment_kind_integer_mapping_roundtrips() {
        for k in [CommentKind::Comment, CommentKind::Answer] {
            assert_eq!(CommentKind::from_i64(k.as_i64()), Some(k));
        }
        assert_eq!(CommentKind::from_i64(-1), None);
    }

    #[test]
    fn comment_owner_resolves_from_wire_kind() {
        let owner = CommentOwner::new(CommentEntityKind::Look, "abc".into());
        assert_eq!(owner, CommentOwner::Look("abc".into()));
        assert_eq!(owner.uid(), "abc");
    }
}

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// The five searchable collections.
///
/// The string forms are what the wire uses: singular in result payloads
/// (`"type": "wall"`), singular or plural in `includeEntities` filters,
/// case-insensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[strum(to_string = "wall", serialize = "walls")]
    Wall,
    #[strum(to_string = "message", serialize = "messages")]
    Message,
    #[strum(to_string = "user", serialize = "users")]
    User,
    #[strum(to_string = "tag", serialize = "tags")]
    Tag,
    #[strum(to_string = "chat", serialize = "chats")]
    Chat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn displays_as_singular() {
        assert_eq!(EntityKind::Wall.to_string(), "wall");
        assert_eq!(EntityKind::Chat.to_string(), "chat");
    }

    #[test]
    fn parses_singular_plural_and_mixed_case() {
        assert_eq!(EntityKind::from_str("message"), Ok(EntityKind::Message));
        assert_eq!(EntityKind::from_str("messages"), Ok(EntityKind::Message));
        assert_eq!(EntityKind::from_str("Tags"), Ok(EntityKind::Tag));
        assert!(EntityKind::from_str("channels").is_err());
    }

    #[test]
    fn iterates_all_five_kinds() {
        let kinds: Vec<_> = EntityKind::iter().collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Wall,
                EntityKind::Message,
                EntityKind::User,
                EntityKind::Tag,
                EntityKind::Chat,
            ]
        );
    }
}

//! Team and user entities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    /// URL segment of the team, used in permalinks.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Name shown as a quote author: nickname, then full name, then the
    /// prefixed username. Bots always show their plain username.
    pub fn display_name_with_prefix(&self, prefix: &str) -> String {
        if self.is_bot {
            return self.username.clone();
        }
        if !self.nickname.is_empty() {
            return self.nickname.clone();
        }
        let full = self.full_name();
        if !full.is_empty() {
            return full;
        }
        format!("{prefix}{}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "jdoe".to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_display_name_precedence() {
        let mut u = user();
        assert_eq!(u.display_name_with_prefix("@"), "@jdoe");

        u.last_name = "Doe".to_string();
        assert_eq!(u.display_name_with_prefix("@"), "Doe");

        u.first_name = "Jane".to_string();
        assert_eq!(u.display_name_with_prefix("@"), "Jane Doe");

        u.nickname = "JD".to_string();
        assert_eq!(u.display_name_with_prefix("@"), "JD");
    }

    #[test]
    fn test_bot_display_name() {
        let mut u = user();
        u.is_bot = true;
        u.nickname = "ignored".to_string();
        assert_eq!(u.display_name_with_prefix("@"), "jdoe");
    }
}

use std::fmt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
    Parley,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Author::User => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return write!(f, "User");
                }
                return write!(f, "{username}");
            }
            Author::Assistant => return write!(f, "Assistant"),
            Author::Parley => return write!(f, "Parley"),
        }
    }
}

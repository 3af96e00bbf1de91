use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The only two answers anybody is allowed to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerChoice {
    Yes,
    No,
}

impl AnswerChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerChoice::Yes => "YES",
            AnswerChoice::No => "NO",
        }
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YES" => Ok(AnswerChoice::Yes),
            "NO" => Ok(AnswerChoice::No),
            other => Err(format!("unknown answer '{other}'")),
        }
    }
}

/// Yes/no/total tally shared by both vote flavours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub total: i64,
    pub yes_count: i64,
    pub no_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&AnswerChoice::Yes).unwrap(), "\"YES\"");
        let parsed: AnswerChoice = serde_json::from_str("\"NO\"").unwrap();
        assert_eq!(parsed, AnswerChoice::No);
        assert!(serde_json::from_str::<AnswerChoice>("\"maybe\"").is_err());
    }

    #[test]
    fn parse_rejects_lowercase() {
        assert!("yes".parse::<AnswerChoice>().is_err());
        assert_eq!("YES".parse::<AnswerChoice>(), Ok(AnswerChoice::Yes));
    }
}

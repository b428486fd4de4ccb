use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vdk_core::VdkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaKind {
    Barista,
    Wellness,
    Sdr,
    Fraud,
    Grocery,
    GameMaster,
    Shopping,
    Improv,
}

impl PersonaKind {
    pub const ALL: [PersonaKind; 8] = [
        PersonaKind::Barista,
        PersonaKind::Wellness,
        PersonaKind::Sdr,
        PersonaKind::Fraud,
        PersonaKind::Grocery,
        PersonaKind::GameMaster,
        PersonaKind::Shopping,
        PersonaKind::Improv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PersonaKind::Barista => "barista",
            PersonaKind::Wellness => "wellness",
            PersonaKind::Sdr => "sdr",
            PersonaKind::Fraud => "fraud",
            PersonaKind::Grocery => "grocery",
            PersonaKind::GameMaster => "game_master",
            PersonaKind::Shopping => "shopping",
            PersonaKind::Improv => "improv",
        }
    }
}

impl fmt::Display for PersonaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PersonaKind {
    type Err = VdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        PersonaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| VdkError::Config(format!("unknown persona '{}'", s.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_every_name() {
        for kind in PersonaKind::ALL {
            assert_eq!(kind.as_str().parse::<PersonaKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_dashes() {
        assert_eq!("Game-Master".parse::<PersonaKind>().unwrap(), PersonaKind::GameMaster);
        assert!("chef".parse::<PersonaKind>().is_err());
    }
}

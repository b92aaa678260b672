use std::fmt;

/// The four mutually exclusive pronoun roles handed out in the guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PronounRole {
    HeHim,
    SheHer,
    TheyThem,
    AskForPronouns,
}

/// Role ids in the guild, in display order.
pub const ROLE_MAP: [(PronounRole, &str); 4] = [
    (PronounRole::HeHim, "1011753836723064892"),
    (PronounRole::SheHer, "1011753874484367481"),
    (PronounRole::TheyThem, "1011753924866343004"),
    (PronounRole::AskForPronouns, "1011753944722178119"),
];

impl PronounRole {
    /// Given to anyone whose pronouns are set to something other than the
    /// three recognised values.
    pub const FALLBACK: PronounRole = PronounRole::AskForPronouns;

    pub fn from_pronouns(pronouns: &str) -> Self {
        match pronouns {
            "he/him" => PronounRole::HeHim,
            "she/her" => PronounRole::SheHer,
            "they/them" => PronounRole::TheyThem,
            _ => Self::FALLBACK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PronounRole::HeHim => "he/him",
            PronounRole::SheHer => "she/her",
            PronounRole::TheyThem => "they/them",
            PronounRole::AskForPronouns => "Ask for pronouns",
        }
    }

    pub fn role_id(self) -> &'static str {
        ROLE_MAP
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, id)| *id)
            .unwrap_or_default()
    }
}

impl fmt::Display for PronounRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn is_pronoun_role(role_id: &str) -> bool {
    ROLE_MAP.iter().any(|(_, id)| *id == role_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognised_pronouns_map_exactly() {
        assert_eq!(PronounRole::from_pronouns("he/him"), PronounRole::HeHim);
        assert_eq!(PronounRole::from_pronouns("she/her"), PronounRole::SheHer);
        assert_eq!(PronounRole::from_pronouns("they/them"), PronounRole::TheyThem);
    }

    #[test]
    fn anything_else_falls_back() {
        for value in ["xe/xem", "He/Him", "he/they", " she/her", "any"] {
            assert_eq!(PronounRole::from_pronouns(value), PronounRole::FALLBACK);
        }
    }

    #[test]
    fn ids_are_distinct_and_resolvable() {
        for (i, (role, id)) in ROLE_MAP.iter().enumerate() {
            assert_eq!(role.role_id(), *id);
            assert!(is_pronoun_role(id));
            assert!(ROLE_MAP[i + 1..].iter().all(|(_, other)| other != id));
        }
        assert!(!is_pronoun_role("123"));
    }
}

//! Fixed question catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PollError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Motives,
    Expectations,
    Topics,
    Changes,
    Obstacles,
}

impl QuestionId {
    pub const ALL: [QuestionId; 5] = [
        QuestionId::Motives,
        QuestionId::Expectations,
        QuestionId::Topics,
        QuestionId::Changes,
        QuestionId::Obstacles,
    ];

    /// Form/wire key of the question.
    pub fn key(self) -> &'static str {
        match self {
            QuestionId::Motives => "motives",
            QuestionId::Expectations => "expectations",
            QuestionId::Topics => "topics",
            QuestionId::Changes => "changes",
            QuestionId::Obstacles => "obstacles",
        }
    }

    pub fn question(self) -> &'static Question {
        match self {
            QuestionId::Motives => &QUESTIONS[0],
            QuestionId::Expectations => &QUESTIONS[1],
            QuestionId::Topics => &QUESTIONS[2],
            QuestionId::Changes => &QUESTIONS[3],
            QuestionId::Obstacles => &QUESTIONS[4],
        }
    }
}

impl FromStr for QuestionId {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| PollError::UnknownQuestion(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: &'static str,
    pub options: &'static [&'static str],
    pub max_choices: usize,
}

pub const QUESTIONS: [Question; 5] = [
    Question {
        id: QuestionId::Motives,
        title: "1. Was sind Deine Motive dabei zu sein?",
        options: &[
            "Politische Veränderung bewirken",
            "Klima- und Umweltschutz",
            "Soziale Gerechtigkeit",
            "Engagement vor Ort",
            "Mitgestaltung kommunaler Politik",
            "Vernetzung & Gemeinschaft",
        ],
        max_choices: 3,
    },
    Question {
        id: QuestionId::Expectations,
        title: "2. Was ist Deine Erwartung an den Ortsverband?",
        options: &[
            "Transparente politische Arbeit",
            "Mehr Austausch untereinander",
            "Konkrete Projektarbeit",
            "Unterstützung im Engagement",
            "Weiterbildung / politische Bildung",
        ],
        max_choices: 3,
    },
    Question {
        id: QuestionId::Topics,
        title: "3. Welche Themen bewegen Dich besonders?",
        options: &[
            "Energie & Klima",
            "Verkehr & Mobilität",
            "Soziales & Integration",
            "Naturschutz & Biodiversität",
            "Digitalisierung",
            "Bildung",
            "Landwirtschaft",
            "Gesundheit",
        ],
        max_choices: 4,
    },
    Question {
        id: QuestionId::Changes,
        title: "4. Was würdest Du im Ortsverband anders machen?",
        options: &[
            "Offener kommunizieren",
            "Entscheidungswege verkürzen",
            "Mehr Aktionen & Veranstaltungen",
            "Bessere Einbindung neuer Mitglieder",
        ],
        max_choices: 3,
    },
    Question {
        id: QuestionId::Obstacles,
        title: "5. Was hält Dich ab, Dich (noch) mehr einzubringen?",
        options: &[
            "Zeitmangel",
            "Unklare Rollen / Aufgaben",
            "Zu wenig Informationen",
            "Hemmschwelle in der Gruppe",
            "Strukturen sind unübersichtlich",
        ],
        max_choices: 3,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_map_to_their_question() {
        for id in QuestionId::ALL {
            assert_eq!(id.question().id, id);
            assert_eq!(id.key().parse::<QuestionId>().unwrap(), id);
        }
    }

    #[test]
    fn test_max_choices_below_option_count() {
        for q in &QUESTIONS {
            assert!(q.max_choices < q.options.len(), "{}", q.title);
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            "hobbies".parse::<QuestionId>(),
            Err(PollError::UnknownQuestion(_))
        ));
    }
}

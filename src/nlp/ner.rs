// Named Entity Recognition using patterns and a place gazetteer.
// Patterns run in priority order; a later pattern never claims text an earlier one already took.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Date,
    Money,
    Percent,
    Email,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
            EntityLabel::Percent => "PERCENT",
            EntityLabel::Email => "EMAIL",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Places known to every pipeline.
pub const BASE_PLACES: &[&str] = &[
    "United States", "USA", "UK", "United Kingdom", "New York", "California", "Texas", "London",
    "Paris", "Tokyo", "Beijing", "Washington", "Chicago", "Los Angeles", "San Francisco", "Boston",
    "Seattle", "Miami", "Austin", "Denver", "Portland", "Atlanta", "Hawaii", "Florida", "Berlin",
    "Europe", "Asia", "Africa",
];

/// Extra places loaded by the larger pipeline.
pub const EXTENDED_PLACES: &[&str] = &[
    "Canada", "Mexico", "Brazil", "Argentina", "France", "Germany", "Spain", "Italy", "Portugal",
    "Ireland", "Iceland", "Norway", "Sweden", "Finland", "Denmark", "Poland", "Ukraine", "Russia",
    "China", "Japan", "India", "Australia", "New Zealand", "Egypt", "Nigeria", "Kenya",
    "South Africa", "Toronto", "Madrid", "Rome", "Moscow", "Sydney", "Mumbai", "Dublin",
    "Reykjavik", "Amsterdam", "Vienna", "Prague", "Seoul", "Singapore",
];

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})\b").unwrap()
});

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s*\d+(?:,\d{3})*(?:\.\d{2})?(?:\s*(?:million|billion|trillion)\b)?|\b\d+(?:,\d{3})*(?:\.\d{2})?\s*(?:USD|EUR|GBP|dollars?|euros?|pounds?)\b").unwrap()
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:\s?%|\s+percent\b)").unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|(?:Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}|(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)|(?:19|20)\d{2})\b").unwrap()
});

static ORGANIZATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[A-Z][A-Za-z&]+\s+)*[A-Z][A-Za-z&]+\s+(?:(?:Inc|Corp|Ltd|Co)\b\.?|(?:LLC|Corporation|Limited|Company|Group|Institute|University|College|Bank|Foundation|Agency)\b)|\b(?:University|Bank|Institute)\s+of\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b|\b(?:Google|Apple|Microsoft|Amazon|Facebook|Meta|Netflix|Tesla|IBM|NASA|FBI|CIA|NATO|UNESCO|Twitter|Intel|Nvidia)\b").unwrap()
});

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+(?:[A-Z]\.\s+)?[A-Z][a-z]+)+\b").unwrap()
});

// Capitalised words that start sentences rather than names.
static NOT_NAME_START: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "A", "An", "This", "That", "These", "Those", "In", "On", "At", "By", "For", "From",
        "With", "And", "But", "Or", "If", "When", "While", "After", "Before", "Then", "He", "She",
        "They", "We", "It", "His", "Her", "Their", "Our", "My", "Your", "Dear", "Mr", "Mrs", "Ms",
        "Dr", "President", "Today", "Yesterday", "Tomorrow",
    ]
    .iter()
    .copied()
    .collect()
});

/// A pattern recognizer. Construction compiles the gazetteer, so reuse one per pipeline.
#[derive(Debug)]
pub struct EntityRecognizer {
    place_pattern: Regex,
}

impl EntityRecognizer {
    pub fn new(places: &[&str]) -> Result<Self, regex::Error> {
        let mut sorted: Vec<&str> = places.to_vec();
        // longest first so "New York" wins over "York"
        sorted.sort_by_key(|p| std::cmp::Reverse(p.len()));
        let alternatives: Vec<String> = sorted.iter().map(|p| regex::escape(p)).collect();
        let place_pattern = Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))?;
        Ok(EntityRecognizer { place_pattern })
    }

    /// Find entities in `text`, sorted by start offset.
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut found = Found::default();

        // earlier patterns claim overlapping spans
        found.add_all(text, &EMAIL_PATTERN, EntityLabel::Email);
        found.add_all(text, &DATE_PATTERN, EntityLabel::Date);
        found.add_all(text, &MONEY_PATTERN, EntityLabel::Money);
        found.add_all(text, &PERCENT_PATTERN, EntityLabel::Percent);
        found.add_all(text, &ORGANIZATION_PATTERN, EntityLabel::Org);
        found.add_all(text, &self.place_pattern, EntityLabel::Gpe);

        for m in PERSON_PATTERN.find_iter(text) {
            if let Some((start, end)) = trim_name(m.as_str()) {
                found.add(text, m.start() + start, m.start() + end, EntityLabel::Person);
            }
        }

        let mut entities = found.entities;
        entities.sort_by_key(|e| e.start);
        entities
    }
}

/// Drop a leading non-name word; keep the candidate only if two or more words remain.
fn trim_name(candidate: &str) -> Option<(usize, usize)> {
    let mut start = 0;
    let first = candidate.split_whitespace().next()?;
    if NOT_NAME_START.contains(first) {
        let rest = &candidate[first.len()..];
        start = first.len() + (rest.len() - rest.trim_start().len());
    }
    let name = &candidate[start..];
    if name.split_whitespace().count() < 2 {
        return None;
    }
    Some((start, candidate.len()))
}

#[derive(Default)]
struct Found {
    entities: Vec<Entity>,
}

impl Found {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.entities.iter().any(|e| start < e.end && e.start < end)
    }

    fn add(&mut self, text: &str, start: usize, end: usize, label: EntityLabel) {
        let surface = text[start..end].trim_end();
        let end = start + surface.len();
        if surface.is_empty() || self.overlaps(start, end) {
            return;
        }
        self.entities.push(Entity {
            text: surface.to_string(),
            label,
            start,
            end,
        });
    }

    fn add_all(&mut self, text: &str, pattern: &Regex, label: EntityLabel) {
        for m in pattern.find_iter(text) {
            self.add(text, m.start(), m.end(), label);
        }
    }
}

/// Surface text -> label. A text seen twice keeps the label of its last occurrence.
pub fn entity_map(entities: &[Entity]) -> BTreeMap<String, EntityLabel> {
    let mut map = BTreeMap::new();
    for e in entities {
        map.insert(e.text.clone(), e.label);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> EntityRecognizer {
        EntityRecognizer::new(BASE_PLACES).unwrap()
    }

    fn labelled(text: &str) -> Vec<(String, EntityLabel)> {
        recognizer()
            .recognize(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn test_extract_entities_from_text() {
        let entities = labelled(
            "Barack Obama was born in Hawaii. He worked in Chicago and later became the 44th President of the United States.",
        );
        assert!(entities.contains(&("Barack Obama".to_string(), EntityLabel::Person)));
        assert!(entities.contains(&("Hawaii".to_string(), EntityLabel::Gpe)));
        assert!(entities.contains(&("Chicago".to_string(), EntityLabel::Gpe)));
        assert!(entities.contains(&("United States".to_string(), EntityLabel::Gpe)));
    }

    #[test]
    fn test_extract_email() {
        let entities = labelled("Contact us at support@example.com for more information.");
        assert_eq!(entities, vec![("support@example.com".to_string(), EntityLabel::Email)]);
    }

    #[test]
    fn test_extract_date() {
        let entities = labelled("The meeting is scheduled for Jan 15, 2024.");
        assert_eq!(entities, vec![("Jan 15, 2024".to_string(), EntityLabel::Date)]);
    }

    #[test]
    fn test_extract_money_and_percent() {
        let entities = labelled("Revenue rose 12% to $4,500.00 last quarter.");
        assert!(entities.contains(&("12%".to_string(), EntityLabel::Percent)));
        assert!(entities.contains(&("$4,500.00".to_string(), EntityLabel::Money)));
    }

    #[test]
    fn test_extract_organization() {
        let entities = labelled("She joined Acme Corp after leaving Google.");
        assert!(entities.contains(&("Acme Corp".to_string(), EntityLabel::Org)));
        assert!(entities.contains(&("Google".to_string(), EntityLabel::Org)));
    }

    #[test]
    fn test_organization_containing_place() {
        assert_eq!(
            labelled("She studied at Boston University."),
            vec![("Boston University".to_string(), EntityLabel::Org)]
        );
        assert_eq!(
            labelled("He works for the University of London."),
            vec![("University of London".to_string(), EntityLabel::Org)]
        );
        assert_eq!(
            labelled("Tokyo Bank Group reported profits."),
            vec![("Tokyo Bank Group".to_string(), EntityLabel::Org)]
        );
    }

    #[test]
    fn test_sentence_start_is_not_a_name() {
        let entities = labelled("The Committee met. In New York the weather was fine.");
        assert_eq!(entities, vec![("New York".to_string(), EntityLabel::Gpe)]);
    }

    #[test]
    fn test_entities_sorted_by_position() {
        let entities = recognizer().recognize("Email jane@corp.io from London on 2024-01-05.");
        let starts: Vec<usize> = entities.iter().map(|e| e.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(entities.len(), 3);
    }

    #[test]
    fn test_extended_places() {
        let small = EntityRecognizer::new(BASE_PLACES).unwrap();
        let mut places = BASE_PLACES.to_vec();
        places.extend_from_slice(EXTENDED_PLACES);
        let large = EntityRecognizer::new(&places).unwrap();

        let text = "They moved to Iceland.";
        assert!(small.recognize(text).is_empty());
        assert_eq!(large.recognize(text)[0].label, EntityLabel::Gpe);
    }

    #[test]
    fn test_entity_map_last_label_wins() {
        let entities = vec![
            Entity { text: "Jordan".into(), label: EntityLabel::Gpe, start: 0, end: 6 },
            Entity { text: "Jordan".into(), label: EntityLabel::Person, start: 20, end: 26 },
        ];
        let map = entity_map(&entities);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Jordan"], EntityLabel::Person);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&EntityLabel::Gpe).unwrap(), "\"GPE\"");
        assert_eq!(EntityLabel::Person.to_string(), "PERSON");
    }
}

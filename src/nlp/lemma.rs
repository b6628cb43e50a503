// English lemmatizer: exception table first, then suffix rules.
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // clitics
        ("n't", "not"), ("n’t", "not"), ("'re", "be"), ("’re", "be"), ("'m", "be"), ("’m", "be"),
        ("'ve", "have"), ("’ve", "have"), ("'ll", "will"), ("’ll", "will"), ("'d", "would"), ("’d", "would"),
        ("ca", "can"), ("wo", "will"), ("sha", "shall"),
        // be / have / do
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"), ("being", "be"),
        ("has", "have"), ("had", "have"), ("having", "have"),
        ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
        // irregular verbs
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("saw", "see"), ("seen", "see"),
        ("made", "make"), ("making", "make"), ("took", "take"), ("taken", "take"), ("taking", "take"),
        ("came", "come"), ("coming", "come"), ("gave", "give"), ("given", "give"), ("giving", "give"),
        ("got", "get"), ("gotten", "get"), ("knew", "know"), ("known", "know"), ("thought", "think"),
        ("told", "tell"), ("said", "say"), ("says", "say"), ("found", "find"), ("left", "leave"),
        ("felt", "feel"), ("became", "become"), ("began", "begin"), ("begun", "begin"), ("brought", "bring"),
        ("bought", "buy"), ("built", "build"), ("wrote", "write"), ("written", "write"), ("writing", "write"),
        ("ran", "run"), ("kept", "keep"), ("held", "hold"), ("stood", "stand"), ("meant", "mean"),
        ("met", "meet"), ("paid", "pay"), ("sent", "send"), ("spent", "spend"), ("spoke", "speak"),
        ("spoken", "speak"), ("led", "lead"), ("lost", "lose"), ("sold", "sell"), ("won", "win"),
        ("ate", "eat"), ("eaten", "eat"), ("fell", "fall"), ("fallen", "fall"), ("grew", "grow"),
        ("grown", "grow"), ("drew", "draw"), ("drawn", "draw"), ("flew", "fly"), ("flown", "fly"),
        ("chose", "choose"), ("chosen", "choose"), ("broke", "break"), ("broken", "break"),
        ("using", "use"), ("used", "use"), ("uses", "use"), ("lying", "lie"),
        ("dying", "die"), ("born", "bear"), ("worn", "wear"), ("wore", "wear"),
        // irregular nouns
        ("men", "man"), ("women", "woman"), ("children", "child"), ("mice", "mouse"), ("feet", "foot"),
        ("teeth", "tooth"), ("geese", "goose"), ("lives", "life"), ("wives", "wife"), ("knives", "knife"),
        ("leaves", "leaf"), ("wolves", "wolf"), ("halves", "half"), ("shelves", "shelf"), ("data", "data"),
        ("analyses", "analysis"), ("crises", "crisis"), ("theses", "thesis"), ("criteria", "criterion"),
        // comparatives and superlatives
        ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
        ("more", "more"), ("most", "most"), ("less", "less"), ("least", "least"),
        // pronouns and determiners
        ("me", "i"), ("us", "we"), ("him", "he"), ("them", "they"),
    ]
    .iter()
    .copied()
    .collect()
});

// Words the suffix rules would mangle.
static KEEP: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "this", "his", "its", "hers", "ours", "yours", "theirs", "thus", "yes", "news", "always",
        "perhaps", "series", "species", "bus", "gas", "plus", "unless", "across", "whereas",
        "during", "thing", "nothing", "something", "anything", "everything", "morning", "evening",
        "king", "ring", "spring", "string", "bring", "sing", "wing", "ceiling", "wedding", "building",
        "need", "speed", "seed", "feed", "indeed", "hundred", "red", "bed", "shed", "bled",
        "physics", "economics", "mathematics", "politics", "analysis", "basis", "crisis", "thesis",
    ]
    .iter()
    .copied()
    .collect()
});

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Undo consonant doubling (`runn` -> `run`) or restore a dropped `e` (`mak` -> `make`).
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 3 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) && !matches!(chars[n - 1], 'l' | 's' | 'z') {
        return chars[..n - 1].iter().collect();
    }
    if n >= 3
        && n <= 4
        && !is_vowel(chars[n - 1])
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
        && is_vowel(chars[n - 2])
        && !is_vowel(chars[n - 3])
    {
        return format!("{}e", stem);
    }
    stem.to_string()
}

fn apply_suffix_rules(word: &str) -> String {
    let len = word.chars().count();

    if len > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    if len > 4 && ["ches", "shes", "xes", "zes"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 2].to_string();
    }
    if len > 3 && word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 1].to_string();
    }
    if len > 5 && word.ends_with("ing") {
        return restore_stem(&word[..word.len() - 3]);
    }
    if len > 4 && word.ends_with("ied") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if len > 4 && word.ends_with("eed") {
        return word.to_string();
    }
    if len > 4 && word.ends_with("ed") {
        return restore_stem(&word[..word.len() - 2]);
    }
    word.to_string()
}

/// Dictionary base form of a single token, lowercased.
/// Tokens without letters (numbers, punctuation) are returned as-is.
pub fn lemmatize(token: &str) -> String {
    if !token.chars().any(char::is_alphabetic) {
        return token.to_string();
    }
    let lower = token.to_lowercase();
    if let Some(lemma) = EXCEPTIONS.get(lower.as_str()) {
        return lemma.to_string();
    }
    if KEEP.contains(lower.as_str()) || !lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return lower;
    }
    apply_suffix_rules(&lower)
}

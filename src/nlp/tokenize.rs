// Rule-based word tokenizer with English clitic splitting.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::lemma::lemmatize;

// Order matters: the regex crate picks the leftmost alternative that matches.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        [A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}   # email
        | https?://[^\s<>]+[^\s<>.,;:!?)\]]               # url
        | \d+(?:[.,]\d+)*                                 # number
        | \w+(?:[-'’]\w+)*                                # word, maybe hyphenated or with clitic
        | \S                                              # any other symbol
        ",
    )
    .unwrap()
});

// Suffixes split off as their own token, longest first.
const CLITICS: &[&str] = &["n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'s", "’s", "'m", "’m", "'d", "’d"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    /// Byte offsets into the analyzed text.
    pub start: usize,
    pub end: usize,
    pub is_punct: bool,
}

impl Token {
    fn new(text: &str, start: usize) -> Self {
        Token {
            text: text.to_string(),
            lemma: lemmatize(text),
            start,
            end: start + text.len(),
            is_punct: text.chars().all(|c| !c.is_alphanumeric()),
        }
    }
}

/// Split a word into stem and clitic, e.g. `don't` -> (`do`, `n't`).
/// The suffix is compared on `word` itself, so the cut always lands on its bytes.
fn split_clitic(word: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let at = word.len().checked_sub(clitic.len()).filter(|&at| at > 0)?;
        let tail = word.get(at..)?;
        tail.eq_ignore_ascii_case(clitic).then(|| (&word[..at], tail))
    })
}

/// Tokenize `text` into tokens in document order. Whitespace is dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for m in TOKEN_PATTERN.find_iter(text) {
        let word = m.as_str();
        match split_clitic(word) {
            Some((stem, clitic)) => {
                tokens.push(Token::new(stem, m.start()));
                tokens.push(Token::new(clitic, m.start() + stem.len()));
            }
            None => tokens.push(Token::new(word, m.start())),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Hello World! This is a test.");
        assert_eq!(texts(&tokens), vec!["Hello", "World", "!", "This", "is", "a", "test", "."]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_tokenize_clitics() {
        let tokens = tokenize("I don't think it's there");
        assert_eq!(texts(&tokens), vec!["I", "do", "n't", "think", "it", "'s", "there"]);
    }

    #[test]
    fn test_split_clitic_non_ascii_stem() {
        assert_eq!(split_clitic("DON'T"), Some(("DO", "N'T")));
        assert_eq!(split_clitic("Ⱥn't"), Some(("Ⱥ", "n't")));
        assert_eq!(split_clitic("İS'S"), Some(("İS", "'S")));
        assert_eq!(split_clitic("'s"), None);
        assert_eq!(split_clitic("café"), None);
    }

    #[test]
    fn test_tokenize_numbers_and_money() {
        let tokens = tokenize("It cost $1,200.50 in 2023.");
        assert_eq!(texts(&tokens), vec!["It", "cost", "$", "1,200.50", "in", "2023", "."]);
    }

    #[test]
    fn test_tokenize_email_and_url() {
        let tokens = tokenize("Mail bob@example.com or see https://example.com/docs.");
        assert_eq!(
            texts(&tokens),
            vec!["Mail", "bob@example.com", "or", "see", "https://example.com/docs", "."]
        );
    }

    #[test]
    fn test_tokenize_hyphenated() {
        let tokens = tokenize("a well-known fact");
        assert_eq!(texts(&tokens), vec!["a", "well-known", "fact"]);
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "Héllo, wörld; don't stop.";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_punct_flag() {
        let tokens = tokenize("Yes, really.");
        let flags: Vec<bool> = tokens.iter().map(|t| t.is_punct).collect();
        assert_eq!(flags, vec![false, true, false, true]);
    }

    #[test]
    fn test_tokens_carry_lemmas() {
        let tokens = tokenize("The cats were running");
        let lemmas: Vec<&str> = tokens.iter().map(|t| t.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["the", "cat", "be", "run"]);
    }
}

//! Text processing and normalization

use crate::config::NormalizationConfig;
use crate::error::{Result, ResumeRankerError};
use crate::processing::lemmatizer::Lemmatizer;
use regex::Regex;
use std::collections::HashSet;

/// Common English stop words.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amount",
    "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "first", "five", "for", "former",
    "formerly", "forty", "four", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly",
    "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding",
    "same", "say", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she",
    "should", "show", "side", "since", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until", "up", "upon",
    "us", "used", "using", "various", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

pub struct TextProcessor {
    stop_words: HashSet<String>,
    lemmatizer: Option<Lemmatizer>,
    whitespace_regex: Regex,
    non_letter_regex: Regex,
}

#[derive(Debug, Clone)]
pub struct ProcessedText {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub word_count: usize,
    pub removed_stop_words: usize,
}

impl TextProcessor {
    pub fn new(config: &NormalizationConfig) -> Result<Self> {
        let whitespace_regex = Regex::new(r"\s+")
            .map_err(|e| ResumeRankerError::Processing(format!("Invalid whitespace regex: {}", e)))?;
        let non_letter_regex = Regex::new(r"[^a-zA-Z\s]")
            .map_err(|e| ResumeRankerError::Processing(format!("Invalid letter filter regex: {}", e)))?;

        let mut stop_words: HashSet<String> = STOP_WORDS.iter().map(|&s| s.to_string()).collect();
        stop_words.extend(
            config
                .extra_stop_words
                .iter()
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty()),
        );

        Ok(Self {
            stop_words,
            lemmatizer: config.lemmatize.then(Lemmatizer::new),
            whitespace_regex,
            non_letter_regex,
        })
    }

    /// Normalize raw text into space-separated lemmas.
    pub fn normalize(&self, text: &str) -> String {
        self.process(text).normalized
    }

    pub fn process(&self, text: &str) -> ProcessedText {
        let lowered = text.to_lowercase();
        let collapsed = self.whitespace_regex.replace_all(&lowered, " ");
        let letters_only = self.non_letter_regex.replace_all(&collapsed, "");

        let mut word_count = 0;
        let mut removed_stop_words = 0;
        let mut tokens = Vec::new();

        for word in letters_only.split_whitespace() {
            word_count += 1;
            if self.is_stop_word(word) {
                removed_stop_words += 1;
                continue;
            }

            let lemma = match &self.lemmatizer {
                Some(lemmatizer) => lemmatizer.lemmatize(word),
                None => word.to_string(),
            };
            // A lemma can land on a stop word ("having" -> "have")
            if self.is_stop_word(&lemma) {
                removed_stop_words += 1;
                continue;
            }
            tokens.push(lemma);
        }

        ProcessedText {
            normalized: tokens.join(" "),
            tokens,
            word_count,
            removed_stop_words,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> TextProcessor {
        TextProcessor::new(&NormalizationConfig::default()).unwrap()
    }

    #[test]
    fn test_normalize_pipeline() {
        let processor = processor();
        let normalized = processor.normalize("  Experienced\tPython DEVELOPER,\n skilled in Machine-Learning!  ");

        assert_eq!(normalized, "experience python developer skill machinelearning");
    }

    #[test]
    fn test_stop_words_removed() {
        let processor = processor();
        let result = processor.process("The developer with the experience");

        assert_eq!(result.tokens, vec!["developer", "experience"]);
        assert_eq!(result.word_count, 5);
        assert_eq!(result.removed_stop_words, 3);
    }

    #[test]
    fn test_digits_and_symbols_dropped() {
        let processor = processor();
        assert_eq!(processor.normalize("C++ 10 years Node.js"), "c year nodejs");
    }

    #[test]
    fn test_empty_and_stop_word_only_text() {
        let processor = processor();
        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize("   \n\t "), "");
        assert_eq!(processor.normalize("the and of with"), "");
        assert_eq!(processor.normalize("1234 !!! ###"), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let processor = processor();
        let samples = [
            "Built scalable services; led teams of engineers and mentored juniors.",
            "Studies show analyses of matrices running on GPUs were having issues.",
            "Graphic designer with Adobe Photoshop experience",
            "",
        ];

        for sample in samples {
            let once = processor.normalize(sample);
            assert_eq!(processor.normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_extra_stop_words_and_lemmatize_toggle() {
        let config = NormalizationConfig {
            lemmatize: false,
            extra_stop_words: vec!["Responsibilities".to_string()],
        };
        let processor = TextProcessor::new(&config).unwrap();

        assert_eq!(processor.normalize("Responsibilities: building pipelines"), "building pipelines");
        assert!(processor.stop_word_count() > STOP_WORDS.len());
    }
}

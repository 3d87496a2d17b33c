//! Rule-based English lemmatization
//!
//! Words are looked up in an irregular-form table first. Otherwise suffix
//! rules for plurals, past tense and progressive forms are applied until no
//! rule matches, and the result is looked up in the irregular table once more.
//! Every value the table produces is itself a fixed point, so
//! `lemmatize(lemmatize(w)) == lemmatize(w)` for any input.

use std::collections::{HashMap, HashSet};

const IRREGULAR_FORMS: &[(&str, &str)] = &[
    // verbs
    ("am", "be"), ("are", "be"), ("is", "be"), ("was", "be"), ("were", "be"), ("been", "be"), ("being", "be"),
    ("has", "have"), ("had", "have"), ("having", "have"),
    ("did", "do"), ("does", "do"), ("done", "do"),
    ("went", "go"), ("gone", "go"), ("goes", "go"),
    ("ran", "run"), ("built", "build"), ("led", "lead"), ("taught", "teach"),
    ("wrote", "write"), ("written", "write"), ("began", "begin"), ("begun", "begin"),
    ("brought", "bring"), ("bought", "buy"), ("thought", "think"),
    ("knew", "know"), ("known", "know"), ("grew", "grow"), ("grown", "grow"),
    ("held", "hold"), ("met", "meet"), ("paid", "pay"), ("sold", "sell"),
    ("spent", "spend"), ("understood", "understand"), ("won", "win"),
    ("drove", "drive"), ("driven", "drive"), ("chose", "choose"), ("chosen", "choose"),
    ("spoke", "speak"), ("spoken", "speak"), ("flew", "fly"), ("flown", "fly"),
    ("felt", "feel"), ("found", "find"), ("told", "tell"), ("sent", "send"),
    ("fought", "fight"), ("caught", "catch"), ("sought", "seek"), ("stood", "stand"),
    ("learnt", "learn"), ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
    ("saw", "see"), ("seen", "see"), ("made", "make"), ("said", "say"), ("got", "get"),
    ("gotten", "get"), ("came", "come"), ("became", "become"), ("kept", "keep"),
    ("left", "leave"), ("lost", "lose"), ("meant", "mean"), ("drew", "draw"), ("drawn", "draw"),
    ("forgot", "forget"), ("forgotten", "forget"), ("ate", "eat"), ("eaten", "eat"),
    ("rose", "rise"), ("risen", "rise"), ("shown", "show"), ("hidden", "hide"),
    ("broke", "break"), ("broken", "break"), ("froze", "freeze"), ("frozen", "freeze"),
    ("wore", "wear"), ("worn", "wear"), ("threw", "throw"), ("thrown", "throw"),
    ("swam", "swim"), ("sang", "sing"), ("fell", "fall"), ("fallen", "fall"),
    ("shot", "shoot"), ("slept", "sleep"), ("dealt", "deal"), ("fled", "flee"), ("fed", "feed"),
    ("tied", "tie"), ("died", "die"), ("lied", "lie"), ("tying", "tie"), ("dying", "die"), ("lying", "lie"),
    ("controlled", "control"), ("controlling", "control"),
    ("modelled", "model"), ("modelling", "model"),
    ("labelled", "label"), ("labelling", "label"),
    ("travelled", "travel"), ("travelling", "travel"),
    ("cancelled", "cancel"), ("cancelling", "cancel"),
    ("treated", "treat"), ("treating", "treat"),
    ("repeated", "repeat"), ("repeating", "repeat"),
    ("heated", "heat"), ("seated", "seat"),
    ("focussed", "focus"), ("focussing", "focus"),
    // nouns
    ("children", "child"), ("men", "man"), ("women", "woman"),
    ("feet", "foot"), ("teeth", "tooth"), ("mice", "mouse"),
    ("criteria", "criterion"), ("analyses", "analysis"), ("hypotheses", "hypothesis"),
    ("indices", "index"), ("matrices", "matrix"), ("vertices", "vertex"),
    ("movies", "movie"), ("cookies", "cookie"), ("rookies", "rookie"),
];

/// Stems whose base form ends in a silent `e` that the suffix rules cannot infer.
const E_FINAL_STEMS: &[&str] = &[
    "stor", "explor", "scor", "ignor", "restor", "shap", "scop", "typ", "writ",
    "complet", "delet", "compet", "nam", "tim", "us", "caus", "rat", "creat",
    "chang", "challeng", "arrang", "rang", "exchang", "scal", "schedul",
    "compil", "fil", "guid", "mov", "los", "achiev", "prototyp", "automat",
];

const INVARIANT_WORDS: &[&str] = &[
    "kubernetes", "analytics", "physics", "mathematics", "statistics", "economics",
    "ethics", "logistics", "graphics", "robotics", "electronics", "dynamics",
    "linguistics", "genomics", "news", "series", "species", "sales", "devops",
    "pandas", "jenkins", "nodejs", "macos", "keras", "postgres", "always", "perhaps",
    "canvas", "atlas", "alias", "bias", "chaos", "embed", "hundred", "sacred",
    "naked", "wicked", "kindred", "shred", "morning", "evening", "string", "spring",
    "ceiling", "swing", "sting", "nothing", "something", "anything", "everything",
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<String, String>,
    invariant: HashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        let mut irregular: HashMap<String, String> = IRREGULAR_FORMS
            .iter()
            .map(|&(form, lemma)| (form.to_string(), lemma.to_string()))
            .collect();

        for stem in E_FINAL_STEMS {
            let lemma = format!("{}e", stem);
            irregular.insert(format!("{}ed", stem), lemma.clone());
            irregular.insert(format!("{}ing", stem), lemma);
        }

        Self {
            irregular,
            invariant: INVARIANT_WORDS.iter().copied().collect(),
        }
    }

    /// Reduce a lowercase ASCII word to its base form.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return lemma.clone();
        }

        let mut current = word.to_string();
        while !self.invariant.contains(current.as_str()) {
            match Self::reduce_once(&current) {
                Some(next) => current = next,
                None => break,
            }
        }

        match self.irregular.get(&current) {
            Some(lemma) => lemma.clone(),
            None => current,
        }
    }

    /// Apply the first matching suffix rule. Every rule shortens the word.
    fn reduce_once(word: &str) -> Option<String> {
        let len = word.len();
        if len <= 3 {
            return None;
        }

        if len > 4 {
            if let Some(stem) = word.strip_suffix("ies") {
                return Some(format!("{}y", stem));
            }
            if let Some(stem) = word.strip_suffix("ied") {
                return Some(format!("{}y", stem));
            }
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return Some(format!("{}ss", stem));
        }
        if ["ches", "shes", "xes", "zzes"].iter().any(|suffix| word.ends_with(suffix)) {
            return Some(word[..len - 2].to_string());
        }
        if word.ends_with('s') && !["ss", "us", "is"].iter().any(|suffix| word.ends_with(suffix)) {
            return Some(word[..len - 1].to_string());
        }
        if word.ends_with("eed") {
            return None;
        }
        if let Some(stem) = word.strip_suffix("ed") {
            return Self::base_from_stem(stem);
        }
        if let Some(stem) = word.strip_suffix("ing") {
            return Self::base_from_stem(stem);
        }
        None
    }

    fn base_from_stem(stem: &str) -> Option<String> {
        let bytes = stem.as_bytes();
        let n = bytes.len();
        if n < 3 || !bytes.iter().any(|&b| is_vowel(b)) {
            return None;
        }

        let last = bytes[n - 1];
        // runn -> run, but keep skill, process, buzz
        if n >= 4 && last.is_ascii_lowercase() && last == bytes[n - 2] && !is_vowel(last) && !b"lsz".contains(&last) {
            return Some(stem[..n - 1].to_string());
        }

        if Self::needs_silent_e(bytes) {
            Some(format!("{}e", stem))
        } else {
            Some(stem.to_string())
        }
    }

    fn needs_silent_e(stem: &[u8]) -> bool {
        let n = stem.len();
        let last = stem[n - 1];
        let prev = stem[n - 2];
        let before_consonant = n >= 3 && !is_vowel(stem[n - 3]);
        let ends_with = |suffix: &[u8]| stem.ends_with(suffix);

        if ends_with(b"iz") || ends_with(b"yz") || last == b'v' || last == b'u' {
            return true;
        }

        match last {
            b'c' => prev != b'i',
            b't' => {
                (prev == b'a' && !ends_with(b"eat") && !ends_with(b"oat")) || prev == b'u'
            }
            b'r' => {
                ((prev == b'i' || prev == b'u')
                    && !ends_with(b"air")
                    && !ends_with(b"our")
                    && !ends_with(b"eir")
                    && !ends_with(b"oir"))
                    || (prev == b'a' && before_consonant)
            }
            b'l' => !is_vowel(prev) && !b"lrw".contains(&prev),
            b'g' => is_vowel(prev) || prev == b'r',
            b's' => b"aeioy".contains(&prev),
            b'd' => b"aiou".contains(&prev) && before_consonant,
            b'n' => prev == b'i' && before_consonant && n >= 5,
            b'k' => b"aio".contains(&prev) && before_consonant,
            _ => false,
        }
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

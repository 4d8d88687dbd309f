//! Decoded reply sentences as delivered by a query dispatcher.
//!
//! A [`Reply`] is one batch of sentences handed to a reply handler. The
//! strings inside it are owned by the dispatcher; typed records built from a
//! batch borrow from it and must not outlive it.

use std::fmt;
use std::str::FromStr;

/// A key/value attribute of a sentence.
pub type Param = (String, String);

/// Status tag of a sentence (the API reply word without its leading `!`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SentenceStatus {
    /// Data-bearing sentence (`!re`).
    Re,
    /// Final sentence of a command (`!done`).
    Done,
    /// Command failure report (`!trap`).
    Trap,
    /// Connection is about to be closed (`!fatal`).
    Fatal,
    /// Any other tag.
    Other(String),
}

impl SentenceStatus {
    /// Returns true if sentences with this status carry a record.
    pub fn is_data(&self) -> bool {
        matches!(self, SentenceStatus::Re)
    }

    /// Returns true if this status ends a reply batch.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SentenceStatus::Done | SentenceStatus::Fatal)
    }

    /// Returns the status tag as it appears in a sentence.
    pub fn as_str(&self) -> &str {
        match self {
            SentenceStatus::Re => "re",
            SentenceStatus::Done => "done",
            SentenceStatus::Trap => "trap",
            SentenceStatus::Fatal => "fatal",
            SentenceStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for SentenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SentenceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "re" => SentenceStatus::Re,
            "done" => SentenceStatus::Done,
            "trap" => SentenceStatus::Trap,
            "fatal" => SentenceStatus::Fatal,
            other => SentenceStatus::Other(other.to_string()),
        })
    }
}

/// One decoded reply sentence: a status tag plus ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    status: String,
    params: Vec<Param>,
}

impl Sentence {
    /// Creates an empty sentence with the given status tag.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            params: Vec::new(),
        }
    }

    /// Creates a data (`re`) sentence.
    pub fn re() -> Self {
        Self::new("re")
    }

    /// Creates a `done` sentence.
    pub fn done() -> Self {
        Self::new("done")
    }

    /// Adds an attribute.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_param(key, value);
        self
    }

    /// Appends an attribute in place.
    pub fn push_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Returns the raw status tag.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the typed status tag.
    pub fn kind(&self) -> SentenceStatus {
        match self.status.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }

    /// Returns true if this sentence carries a record.
    pub fn is_data(&self) -> bool {
        self.status == "re"
    }

    /// Returns the number of attributes.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Returns the key of the attribute at `index`.
    pub fn param_key_by_index(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(|(k, _)| k.as_str())
    }

    /// Returns the value of the attribute at `index`.
    pub fn param_val_by_index(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(|(_, v)| v.as_str())
    }

    /// Returns the value for `key`, if present. The first match wins.
    pub fn param_val_by_key(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over all attributes in order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn clobber(&mut self) {
        self.status.clear();
        self.status.push_str(CLOBBERED);
        for (k, v) in self.params.iter_mut() {
            k.clear();
            k.push_str(CLOBBERED);
            v.clear();
            v.push_str(CLOBBERED);
        }
    }
}

/// Marker written over reused reply storage.
pub const CLOBBERED: &str = "\u{fffd}clobbered";

/// One batch of reply sentences, in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    sentences: Vec<Sentence>,
}

impl Reply {
    /// Creates an empty reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reply from sentences.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Appends a sentence.
    pub fn push(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    /// Returns the number of sentences in the batch.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Returns true if the batch holds no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Returns the first sentence.
    pub fn first(&self) -> Option<&Sentence> {
        self.sentences.first()
    }

    /// Returns the sentence at `index`.
    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    /// Iterates over sentences in reply order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// Counts the data (`re`) sentences.
    pub fn data_count(&self) -> usize {
        self.sentences.iter().filter(|s| s.is_data()).count()
    }

    /// Removes all sentences, keeping the allocation.
    pub fn clear(&mut self) {
        self.sentences.clear();
    }

    /// Overwrites every string in place with [`CLOBBERED`].
    ///
    /// Used by dispatchers that reuse one buffer across batches.
    pub fn clobber(&mut self) {
        for sentence in self.sentences.iter_mut() {
            sentence.clobber();
        }
    }
}

impl<'a> IntoIterator for &'a Reply {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Sentence> for Reply {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self {
            sentences: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Reply {
        Reply::from_sentences(vec![
            Sentence::re()
                .with_param("name", "ether1")
                .with_param("mtu", "1500"),
            Sentence::new("trap").with_param("message", "oops"),
            Sentence::done(),
        ])
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("re".parse::<SentenceStatus>().unwrap(), SentenceStatus::Re);
        assert_eq!("done".parse::<SentenceStatus>().unwrap(), SentenceStatus::Done);
        assert_eq!(
            "empty".parse::<SentenceStatus>().unwrap(),
            SentenceStatus::Other("empty".to_string())
        );
        assert!(SentenceStatus::Re.is_data());
        assert!(!SentenceStatus::Done.is_data());
        assert!(SentenceStatus::Fatal.is_terminal());
        assert!(!SentenceStatus::Trap.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SentenceStatus::Trap.to_string(), "trap");
        assert_eq!(SentenceStatus::Other("x".into()).to_string(), "x");
    }

    #[test]
    fn test_param_lookup() {
        let reply = sample();
        let first = reply.first().unwrap();
        assert_eq!(first.status(), "re");
        assert_eq!(first.kind(), SentenceStatus::Re);
        assert_eq!(first.param_val_by_key("name"), Some("ether1"));
        assert_eq!(first.param_val_by_key("comment"), None);
        assert_eq!(first.param_key_by_index(1), Some("mtu"));
        assert_eq!(first.param_val_by_index(1), Some("1500"));
        assert_eq!(first.param_val_by_index(2), None);
        assert_eq!(first.param_count(), 2);
    }

    #[test]
    fn test_first_duplicate_key_wins() {
        let s = Sentence::re().with_param("name", "a").with_param("name", "b");
        assert_eq!(s.param_val_by_key("name"), Some("a"));
    }

    #[test]
    fn test_reply_counts() {
        let reply = sample();
        assert_eq!(reply.len(), 3);
        assert_eq!(reply.data_count(), 1);
        assert!(!reply.is_empty());
        assert!(Reply::new().is_empty());
    }

    #[test]
    fn test_clobber_overwrites_strings() {
        let mut reply = sample();
        reply.clobber();
        assert_eq!(reply.len(), 3);
        for sentence in &reply {
            assert_eq!(sentence.status(), CLOBBERED);
            assert!(sentence.params().all(|(k, v)| k == CLOBBERED && v == CLOBBERED));
        }
    }
}

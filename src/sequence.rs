use crate::error::{PwmError, Result};
use crate::types::Nucleotide;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A nucleotide sequence as supplied by the caller.
///
/// The text is kept as-is and only checked against the alphabet when
/// [`NtSeq::validate`] or [`NtSeq::encode`] is called. Sequences built from
/// [`Nucleotide`] values are valid by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NtSeq(String);

impl NtSeq {
    pub fn new(seq: impl Into<String>) -> Self {
        NtSeq(seq.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Number of characters, the unit used for offsets and error positions
    pub fn len(&self) -> usize {
        if self.0.is_ascii() {
            self.0.len()
        } else {
            self.0.chars().count()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One byte per character, with non-ASCII characters replaced by 0 so
    /// offsets into the result are character offsets.
    pub(crate) fn symbols(&self) -> Cow<'_, [u8]> {
        if self.0.is_ascii() {
            Cow::Borrowed(self.0.as_bytes())
        } else {
            Cow::Owned(
                self.0
                    .chars()
                    .map(|c| if c.is_ascii() { c as u8 } else { 0 })
                    .collect(),
            )
        }
    }

    /// Ensures the sequence consists solely of `A`, `C`, `G` and `T`.
    ///
    /// # Errors
    /// * `PwmError::Alphabet` - for the lowest offending index, with the
    ///   character found there. Matching is case-sensitive.
    pub fn validate(&self) -> Result<()> {
        self.encode().map(|_| ())
    }

    /// Validates and converts the sequence to nucleotides
    pub fn encode(&self) -> Result<Vec<Nucleotide>> {
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| Nucleotide::from_char(c).ok_or_else(|| PwmError::alphabet(i, c)))
            .collect()
    }

    /// Generates the reverse complement of the sequence.
    ///
    /// # Errors
    /// * `PwmError::Alphabet` - if the sequence contains anything other than A, C, G or T
    pub fn reverse_complement(&self) -> Result<NtSeq> {
        let encoded = self.encode()?;
        Ok(encoded.into_iter().rev().map(Nucleotide::complement).collect())
    }
}

impl FromIterator<Nucleotide> for NtSeq {
    fn from_iter<I: IntoIterator<Item = Nucleotide>>(iter: I) -> Self {
        NtSeq(iter.into_iter().map(Nucleotide::as_char).collect())
    }
}

impl From<&str> for NtSeq {
    fn from(seq: &str) -> Self {
        NtSeq(seq.to_string())
    }
}

impl From<String> for NtSeq {
    fn from(seq: String) -> Self {
        NtSeq(seq)
    }
}

impl fmt::Display for NtSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

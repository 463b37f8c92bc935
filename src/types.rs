use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A DNA nucleotide. The discriminant is the column index of the base in a
/// dense [`Pwm`](crate::pwm::Pwm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

/// The alphabet, in column order
pub const NUCLEOTIDES: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

static NUCLEOTIDE_CODES: phf::Map<char, Nucleotide> = phf_map! {
    'A' => Nucleotide::A,
    'C' => Nucleotide::C,
    'G' => Nucleotide::G,
    'T' => Nucleotide::T,
};

impl Nucleotide {
    /// Looks up an uppercase base letter. Lowercase letters, `U`, `N` and any
    /// other symbol map to `None`.
    pub fn from_char(c: char) -> Option<Self> {
        NUCLEOTIDE_CODES.get(&c).copied()
    }

    /// Byte form of [`Nucleotide::from_char`]
    pub fn from_byte(b: u8) -> Option<Self> {
        Self::from_char(b as char)
    }

    /// Column of this base in a dense PWM
    pub fn index(self) -> usize {
        self as usize
    }

    /// Uppercase letter of the base
    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    /// Watson-Crick partner: A-T, C-G
    pub fn complement(self) -> Self {
        match self {
            Nucleotide::A => Nucleotide::T,
            Nucleotide::C => Nucleotide::G,
            Nucleotide::G => Nucleotide::C,
            Nucleotide::T => Nucleotide::A,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Probability of each nucleotide at a single position
pub type PosProb = HashMap<Nucleotide, f64>;

/// Mapping form of a PWM: position index to its distribution.
/// Positions must run 0..n without gaps to be valid.
pub type PwmMap = BTreeMap<usize, PosProb>;

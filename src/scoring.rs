use crate::error::{PwmError, Result};
use crate::pwm::Pwm;
use crate::sequence::NtSeq;
use crate::types::Nucleotide;
use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Sums the log10 probabilities of `window` against the table.
///
/// Any base the table gives probability 0, or any byte outside the alphabet,
/// ends the sum at negative infinity.
fn score_window(log_probs: &Array2<f64>, window: &[u8]) -> f64 {
    if window.is_empty() || window.len() != log_probs.nrows() {
        return f64::NEG_INFINITY;
    }
    let mut score = 0.0;
    for (i, &b) in window.iter().enumerate() {
        let log_prob = match Nucleotide::from_byte(b) {
            Some(nt) => log_probs[[i, nt.index()]],
            None => return f64::NEG_INFINITY,
        };
        if log_prob == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }
        score += log_prob;
    }
    // negative matrix entries give NaN; rank them with impossible windows
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Keeps the higher score; on a tie the lower offset wins.
fn pick_best(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}

impl Pwm {
    /// Scores a sequence as the sum of `log10(p[i][seq[i]])` over all positions.
    ///
    /// Returns negative infinity when the sequence is empty, when its length
    /// differs from the PWM's, or when any observed base has probability 0.
    /// The inputs are not validated here.
    pub fn score_seq(&self, seq: &NtSeq) -> f64 {
        score_window(self.log_probs(), &seq.symbols())
    }

    /// Scores every window of PWM width in `seq`, indexed by start offset.
    ///
    /// Empty if the PWM is empty or wider than the sequence.
    pub fn scan_scores(&self, seq: &NtSeq) -> Vec<f64> {
        let width = self.len();
        if width == 0 || width > seq.len() {
            return Vec::new();
        }
        seq.symbols()
            .windows(width)
            .map(|window| score_window(self.log_probs(), window))
            .collect()
    }

    /// Finds the start offset of the highest scoring window, with its score.
    ///
    /// Offsets `0..=len(seq) - len(pwm)` are considered. When several windows
    /// share the maximum score the first one is returned, including the case
    /// where every window scores negative infinity.
    ///
    /// # Errors
    /// * `PwmError::Range` - "PWM longer than sequence"
    pub fn best_match(&self, seq: &NtSeq) -> Result<(usize, f64)> {
        let width = self.len();
        if width > seq.len() {
            return Err(PwmError::range(width, seq.len()));
        }
        if width == 0 {
            return Ok((0, f64::NEG_INFINITY));
        }

        let best = seq
            .symbols()
            .windows(width)
            .enumerate()
            .map(|(start, window)| {
                let score = score_window(self.log_probs(), window);
                trace!(start, score, "window scored");
                (start, score)
            })
            .fold((usize::MAX, f64::NEG_INFINITY), pick_best);

        debug!(position = best.0, score = best.1, "best match");
        Ok(best)
    }

    /// Start offset of the highest scoring window. See [`Pwm::best_match`].
    pub fn best_match_pos(&self, seq: &NtSeq) -> Result<usize> {
        self.best_match(seq).map(|(position, _)| position)
    }

    /// Parallel [`Pwm::best_match_pos`].
    ///
    /// Windows are scored on the rayon pool. The reduction orders ties by
    /// offset, so the result is the same as the sequential search.
    pub fn best_match_pos_par(&self, seq: &NtSeq) -> Result<usize> {
        let width = self.len();
        if width > seq.len() {
            return Err(PwmError::range(width, seq.len()));
        }
        if width == 0 {
            return Ok(0);
        }

        let (position, score) = seq
            .symbols()
            .par_windows(width)
            .enumerate()
            .map(|(start, window)| (start, score_window(self.log_probs(), window)))
            .reduce(|| (usize::MAX, f64::NEG_INFINITY), pick_best);

        debug!(position, score, "best match");
        Ok(position)
    }
}

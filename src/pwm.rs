use crate::config::EngineConfig;
use crate::error::{PwmError, Result};
use crate::types::{Nucleotide, PosProb, PwmMap, NUCLEOTIDES};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A Position Weight Matrix stored densely as `probs[[position, base]]`.
///
/// The base column is [`Nucleotide::index`]. A `log10` table of the same shape
/// is built once at construction, so scoring only sums table entries.
/// Serializes to and from the [`PwmMap`] form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PwmMap", into = "PwmMap")]
pub struct Pwm {
    probs: Array2<f64>,
    log_probs: Array2<f64>,
}

/// Reads the four probabilities at position `i` of a mapping-form PWM
fn position_row(map: &PwmMap, i: usize) -> Result<[f64; 4]> {
    let probs = map.get(&i).ok_or_else(|| {
        PwmError::structure(format!(
            "position {} not in pwm - must be indexed consecutively from 0",
            i
        ))
    })?;
    let mut row = [0.0; 4];
    for nt in NUCLEOTIDES {
        row[nt.index()] = *probs
            .get(&nt)
            .ok_or_else(|| PwmError::structure(format!("nt {} not in pwm at position {}", nt, i)))?;
    }
    Ok(row)
}

/// Checks each entry lies in [0, 1] (the upper bound loosened by `tolerance`)
/// and the four entries sum to 1 within `tolerance`.
fn check_position(position: usize, row: ArrayView1<f64>, tolerance: f64) -> Result<()> {
    for nt in NUCLEOTIDES {
        let prob = row[nt.index()];
        if prob < 0.0 || prob > 1.0 + tolerance {
            return Err(PwmError::ProbabilityRange {
                position,
                nucleotide: nt,
                prob,
            });
        }
    }
    let sum = row.sum();
    // NaN sums fail too
    if !((sum - 1.0).abs() <= tolerance) {
        return Err(PwmError::Probability { position, sum });
    }
    Ok(())
}

/// Validates a PWM in mapping form with the default tolerance.
///
/// See [`validate_map_with`].
pub fn validate_map(map: &PwmMap) -> Result<()> {
    validate_map_with(map, &EngineConfig::default())
}

/// Ensures that a mapping-form PWM (1) has positions indexed consecutively
/// starting from 0, (2) has A, C, G and T entries at each position, and (3)
/// has probabilities in [0, 1] summing to 1 within `config.tolerance` at each
/// position.
///
/// Positions are checked in increasing order, all three checks for one
/// position before the next, so the reported error is the lowest offending one.
///
/// # Errors
/// * `PwmError::Structure` - missing position or missing nucleotide
/// * `PwmError::ProbabilityRange` - a probability is negative or above 1
/// * `PwmError::Probability` - a position's probabilities do not sum to 1
pub fn validate_map_with(map: &PwmMap, config: &EngineConfig) -> Result<()> {
    for i in 0..map.len() {
        let row = position_row(map, i)?;
        check_position(i, ArrayView1::from(&row[..]), config.tolerance)?;
    }
    Ok(())
}

impl Pwm {
    pub(crate) fn from_dense(probs: Array2<f64>) -> Self {
        let log_probs = probs.mapv(f64::log10);
        Pwm { probs, log_probs }
    }

    /// Builds a PWM from one `[A, C, G, T]` row per position.
    /// Probabilities are not checked; call [`Pwm::validate`].
    pub fn from_rows(rows: &[[f64; 4]]) -> Self {
        Self::from_dense(Array2::from_shape_fn((rows.len(), 4), |(i, j)| rows[i][j]))
    }

    /// Builds a PWM from a `positions x 4` array with columns in A, C, G, T order.
    ///
    /// # Errors
    /// * `PwmError::Structure` - if the array does not have exactly four columns
    pub fn from_array(probs: Array2<f64>) -> Result<Self> {
        if probs.ncols() != NUCLEOTIDES.len() {
            return Err(PwmError::structure(format!(
                "expected {} nucleotide columns, found {}",
                NUCLEOTIDES.len(),
                probs.ncols()
            )));
        }
        Ok(Self::from_dense(probs))
    }

    /// Builds a PWM from its mapping form.
    ///
    /// Only the structure is checked here: positions must be contiguous from 0
    /// and each must carry all four nucleotides. Probabilities are checked on
    /// demand by [`Pwm::validate`].
    pub fn from_map(map: &PwmMap) -> Result<Self> {
        let rows = (0..map.len())
            .map(|i| position_row(map, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_rows(&rows))
    }

    /// Converts back to the mapping form
    pub fn to_map(&self) -> PwmMap {
        self.probs
            .outer_iter()
            .enumerate()
            .map(|(i, row)| {
                let probs: PosProb = NUCLEOTIDES.iter().map(|&nt| (nt, row[nt.index()])).collect();
                (i, probs)
            })
            .collect()
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.probs.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.nrows() == 0
    }

    pub fn prob(&self, position: usize, nt: Nucleotide) -> Option<f64> {
        self.probs.get([position, nt.index()]).copied()
    }

    pub fn probs(&self) -> ArrayView2<'_, f64> {
        self.probs.view()
    }

    pub(crate) fn log_probs(&self) -> &Array2<f64> {
        &self.log_probs
    }

    /// Validates with the default tolerance. See [`Pwm::validate_with`].
    pub fn validate(&self) -> Result<()> {
        self.validate_with(&EngineConfig::default())
    }

    /// Ensures every position has four probabilities in [0, 1] summing to 1
    /// within `config.tolerance`, scanning positions in increasing order.
    ///
    /// # Errors
    /// * `PwmError::Structure` - if the matrix does not have four columns
    /// * `PwmError::ProbabilityRange` - for the first entry outside [0, 1]
    /// * `PwmError::Probability` - for the first position whose sum is off
    pub fn validate_with(&self, config: &EngineConfig) -> Result<()> {
        if self.probs.ncols() != NUCLEOTIDES.len() {
            return Err(PwmError::structure(format!(
                "expected {} nucleotide columns, found {}",
                NUCLEOTIDES.len(),
                self.probs.ncols()
            )));
        }
        for (i, row) in self.probs.outer_iter().enumerate() {
            check_position(i, row, config.tolerance)?;
        }
        Ok(())
    }

    /// Adds a pseudocount to every entry of the matrix.
    ///
    /// Each probability becomes `(p + pseudo) / (1 + 4 * pseudo)`, which keeps
    /// every position normalized. A pseudocount of 0 returns an identical matrix.
    ///
    /// # Errors
    /// * `PwmError::Structure` / `PwmError::ProbabilityRange` /
    ///   `PwmError::Probability` - if the PWM is invalid
    /// * `PwmError::Domain` - if `pseudo` is negative or NaN
    pub fn add_pseudocount(&self, pseudo: f64) -> Result<Pwm> {
        self.validate()?;
        if !(pseudo >= 0.0) {
            return Err(PwmError::Domain { pseudo });
        }
        Ok(self.smoothed(pseudo))
    }

    fn smoothed(&self, pseudo: f64) -> Pwm {
        let total = 1.0 + NUCLEOTIDES.len() as f64 * pseudo;
        Self::from_dense(self.probs.mapv(|p| (p + pseudo) / total))
    }

    /// Smooths with the default thresholds. See [`Pwm::add_pseudo_if_necessary_with`].
    pub fn add_pseudo_if_necessary(&self) -> Result<Pwm> {
        self.add_pseudo_if_necessary_with(&EngineConfig::default())
    }

    /// Adds `config.min_prob` as a pseudocount to the whole matrix if any
    /// probability anywhere is too small; otherwise returns the matrix unchanged.
    ///
    /// "Too small" means below `min_prob / (1 + 4 * min_prob)`, the smallest
    /// value a smoothed entry can take. This sits just under `min_prob` and
    /// makes the operation idempotent: a matrix that was already smoothed is
    /// never smoothed a second time. Validation keeps every entry non-negative,
    /// which the floor relies on.
    ///
    /// # Errors
    /// * any validation error of [`Pwm::validate_with`]
    /// * `PwmError::Domain` - if `config.min_prob` is negative or NaN
    pub fn add_pseudo_if_necessary_with(&self, config: &EngineConfig) -> Result<Pwm> {
        self.validate_with(config)?;
        if !(config.min_prob >= 0.0) {
            return Err(PwmError::Domain {
                pseudo: config.min_prob,
            });
        }

        let floor = config.min_prob / (1.0 + NUCLEOTIDES.len() as f64 * config.min_prob);
        match self.probs.iter().position(|&p| p < floor) {
            Some(flat) => {
                debug!(
                    position = flat / NUCLEOTIDES.len(),
                    pseudo = config.min_prob,
                    "probability below floor, smoothing whole matrix"
                );
                Ok(self.smoothed(config.min_prob))
            }
            None => {
                debug!("no pseudocount needed");
                Ok(self.clone())
            }
        }
    }
}

impl TryFrom<PwmMap> for Pwm {
    type Error = PwmError;

    fn try_from(map: PwmMap) -> Result<Self> {
        Pwm::from_map(&map)
    }
}

impl From<Pwm> for PwmMap {
    fn from(pwm: Pwm) -> Self {
        pwm.to_map()
    }
}

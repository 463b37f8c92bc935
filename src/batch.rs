use crate::error::{PwmError, Result};
use crate::pwm::Pwm;
use crate::sequence::NtSeq;
use crate::types::NUCLEOTIDES;
use ndarray::Array2;
use polars::prelude::*;
use tracing::debug;

/// Reads a PWM from a Polars DataFrame with one row per position.
///
/// # Arguments
/// * `df` - DataFrame with numeric columns "A", "C", "G" and "T"
///
/// # Returns
/// * `Result<Pwm>` - The PWM, rows in frame order. Probabilities are not
///   checked; call [`Pwm::validate`].
///
/// # Errors
/// * Returns `PwmError::Structure` if a nucleotide column is missing or has nulls
/// * Returns `PwmError::DataError` if a column cannot be cast to floats
pub fn pwm_from_dataframe(df: &DataFrame) -> Result<Pwm> {
    let columns = NUCLEOTIDES
        .iter()
        .map(|nt| -> Result<Vec<f64>> {
            let column = df
                .column(&nt.to_string())
                .map_err(|_| PwmError::structure(format!("nt {} not in pwm", nt)))?
                .cast(&DataType::Float64)?;
            let values = column.f64()?;
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| {
                    value.ok_or_else(|| {
                        PwmError::structure(format!("nt {} not in pwm at position {}", nt, i))
                    })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let probs = Array2::from_shape_fn((df.height(), NUCLEOTIDES.len()), |(i, j)| columns[j][i]);
    Ok(Pwm::from_dense(probs))
}

/// Writes a PWM to a Polars DataFrame with columns "A", "C", "G" and "T".
pub fn pwm_to_dataframe(pwm: &Pwm) -> Result<DataFrame> {
    let probs = pwm.probs();
    let columns = NUCLEOTIDES
        .iter()
        .map(|nt| Column::new(nt.to_string().into(), probs.column(nt.index()).to_vec()))
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Finds the best matching window of a PWM in each sequence of a DataFrame.
///
/// # Arguments
/// * `df` - DataFrame containing sequences with "label" and "sequence" columns
/// * `pwm` - The PWM to search with
///
/// # Returns
/// * `Result<DataFrame>` - A DataFrame with:
///   - Original labels
///   - "best_match_pos": Start offset of the best window, null when the PWM is
///     longer than the sequence
///   - "score": Score of that window, negative infinity when there is none
///
/// # Errors
/// * Returns `PwmError::Alphabet` for the first sequence containing a
///   character other than A, C, G or T
/// * Returns `PwmError::DataError` if required columns are missing or null
pub fn best_matches(df: &DataFrame, pwm: &Pwm) -> Result<DataFrame> {
    let sequences = df
        .column("sequence")
        .map_err(|e| PwmError::DataError(e.to_string()))?
        .str()?;

    let mut positions: Vec<Option<u64>> = Vec::with_capacity(df.height());
    let mut scores: Vec<f64> = Vec::with_capacity(df.height());

    for (idx, seq) in sequences.into_iter().enumerate() {
        let seq = seq
            .map(NtSeq::from)
            .ok_or_else(|| PwmError::DataError(format!("Missing sequence at row {}", idx)))?;
        seq.validate()?;

        match pwm.best_match(&seq) {
            Ok((position, score)) => {
                positions.push(Some(position as u64));
                scores.push(score);
            }
            Err(e) if e.is_recoverable() => {
                debug!(row = idx, error = %e, "no window to score");
                positions.push(None);
                scores.push(f64::NEG_INFINITY);
            }
            Err(e) => return Err(e),
        }
    }

    let labels = df
        .column("label")
        .map_err(|e| PwmError::DataError(e.to_string()))?;

    let new_df = DataFrame::new(vec![
        labels.clone(),
        Column::new("best_match_pos".into(), positions),
        Column::new("score".into(), scores),
    ])?;

    Ok(new_df)
}

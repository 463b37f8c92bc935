use pwm_rs::{validate_map, EngineConfig, Nucleotide, NtSeq, PosProb, Pwm, PwmError, PwmMap};

fn pos(a: f64, c: f64, g: f64, t: f64) -> PosProb {
    PosProb::from([
        (Nucleotide::A, a),
        (Nucleotide::C, c),
        (Nucleotide::G, g),
        (Nucleotide::T, t),
    ])
}

fn pwm_map(positions: Vec<(usize, PosProb)>) -> PwmMap {
    positions.into_iter().collect()
}

#[test]
fn test_validate_pwm() {
    // valid PWMs
    let pwm_a = pwm_map(vec![(0, pos(1.0, 0.0, 0.0, 0.0))]);
    let pwm_eq2 = pwm_map(vec![
        (0, pos(0.25, 0.25, 0.25, 0.25)),
        (1, pos(0.25, 0.25, 0.25, 0.25)),
    ]);
    let pwm_c2 = pwm_map(vec![(0, pos(0.1, 0.7, 0.1, 0.1)), (1, pos(0.1, 0.7, 0.1, 0.1))]);
    for map in [&pwm_a, &pwm_eq2, &pwm_c2] {
        assert!(validate_map(map).is_ok());
        let pwm = Pwm::from_map(map).unwrap();
        assert!(pwm.validate().is_ok());
        // validation is repeatable
        assert!(pwm.validate().is_ok());
    }

    // sum within tolerance
    let close = pwm_map(vec![(0, pos(0.25, 0.25, 0.25, 0.25005))]);
    assert!(validate_map(&close).is_ok());
}

#[test]
fn test_validate_pwm_structure() {
    // first position is 1, not 0
    let map = pwm_map(vec![(1, pos(0.25, 0.25, 0.25, 0.25))]);
    assert!(matches!(validate_map(&map), Err(PwmError::Structure(_))));
    assert!(matches!(Pwm::from_map(&map), Err(PwmError::Structure(_))));

    // two positions are 0 and 2
    let map = pwm_map(vec![
        (0, pos(0.25, 0.25, 0.25, 0.25)),
        (2, pos(0.25, 0.25, 0.25, 0.25)),
    ]);
    let err = validate_map(&map).unwrap_err();
    assert!(matches!(err, PwmError::Structure(_)));
    assert!(err.to_string().contains("position 1"));

    // C missing
    let mut probs = pos(0.25, 0.0, 0.5, 0.25);
    probs.remove(&Nucleotide::C);
    let map = pwm_map(vec![(0, probs)]);
    let err = validate_map(&map).unwrap_err();
    assert!(matches!(err, PwmError::Structure(_)));
    assert!(err.to_string().contains("nt C"));

    // wrong number of columns in the dense form
    let err = Pwm::from_array(ndarray::Array2::zeros((2, 3))).unwrap_err();
    assert!(matches!(err, PwmError::Structure(_)));
}

#[test]
fn test_validate_pwm_probabilities() {
    // position 1 probs add up to 0.75
    let map = pwm_map(vec![
        (0, pos(0.25, 0.25, 0.25, 0.25)),
        (1, pos(0.0, 0.25, 0.25, 0.25)),
    ]);
    let err = validate_map(&map).unwrap_err();
    assert_eq!(
        err,
        PwmError::Probability {
            position: 1,
            sum: 0.75
        }
    );
    // the structure is fine, so the dense form builds and fails on demand
    let pwm = Pwm::from_map(&map).unwrap();
    assert!(matches!(pwm.validate(), Err(PwmError::Probability { position: 1, .. })));

    // NaN never sums to 1
    let pwm = Pwm::from_rows(&[[f64::NAN, 0.0, 0.0, 1.0]]);
    assert!(matches!(pwm.validate(), Err(PwmError::Probability { position: 0, .. })));

    // the lowest offending position is reported
    let pwm = Pwm::from_rows(&[[0.25; 4], [0.5; 4], [0.1; 4]]);
    assert!(matches!(pwm.validate(), Err(PwmError::Probability { position: 1, .. })));

    // a looser tolerance accepts what the default rejects
    let pwm = Pwm::from_rows(&[[0.25, 0.25, 0.25, 0.26]]);
    assert!(pwm.validate().is_err());
    let loose = EngineConfig {
        tolerance: 0.05,
        ..EngineConfig::default()
    };
    assert!(pwm.validate_with(&loose).is_ok());
}

#[test]
fn test_validate_pwm_probability_range() {
    // sums to 1 but holds a negative entry
    let pwm = Pwm::from_rows(&[[0.5005, -0.0005, 0.25, 0.25]]);
    assert_eq!(
        pwm.validate(),
        Err(PwmError::ProbabilityRange {
            position: 0,
            nucleotide: Nucleotide::C,
            prob: -0.0005
        })
    );

    let map = pwm_map(vec![
        (0, pos(0.25, 0.25, 0.25, 0.25)),
        (1, pos(-0.5, 0.5, 0.5, 0.5)),
    ]);
    assert!(matches!(
        validate_map(&map),
        Err(PwmError::ProbabilityRange { position: 1, nucleotide: Nucleotide::A, .. })
    ));

    // an entry just above 1 inside the tolerance is accepted
    let pwm = Pwm::from_rows(&[[1.00005, 0.0, 0.0, 0.0]]);
    assert!(pwm.validate().is_ok());
}

#[test]
fn test_empty_pwm_is_valid() {
    let map = PwmMap::new();
    assert!(validate_map(&map).is_ok());
    let pwm = Pwm::from_map(&map).unwrap();
    assert!(pwm.is_empty());
    assert!(pwm.validate().is_ok());
}

#[test]
fn test_map_round_trip_and_serde() {
    let json = r#"{"0": {"A": 0.5, "C": 0.3, "G": 0.1, "T": 0.1},
                   "1": {"A": 0.4, "C": 0.3, "G": 0.3, "T": 0.0}}"#;
    let pwm: Pwm = serde_json::from_str(json).unwrap();
    assert_eq!(pwm.len(), 2);
    assert_eq!(pwm.prob(1, Nucleotide::G), Some(0.3));
    assert_eq!(pwm.prob(2, Nucleotide::G), None);
    assert_eq!(Pwm::from_map(&pwm.to_map()).unwrap(), pwm);

    // a gap is rejected while deserializing
    let json = r#"{"0": {"A": 0.25, "C": 0.25, "G": 0.25, "T": 0.25},
                   "2": {"A": 0.25, "C": 0.25, "G": 0.25, "T": 0.25}}"#;
    assert!(serde_json::from_str::<Pwm>(json).is_err());

    let config: EngineConfig = serde_json::from_str(r#"{"min_prob": 0.01}"#).unwrap();
    assert_eq!(config.min_prob, 0.01);
    assert_eq!(config.tolerance, EngineConfig::default().tolerance);
}

#[test]
fn test_validate_nt_seq() {
    assert!(NtSeq::from("ACGAAACTTAA").validate().is_ok());
    assert!(NtSeq::from("").validate().is_ok());

    // lower case nt
    assert_eq!(
        NtSeq::from("aCGAAACTTAA").validate(),
        Err(PwmError::Alphabet {
            position: 0,
            character: 'a'
        })
    );

    // Us instead of Ts, first offending index reported
    assert_eq!(
        NtSeq::from("ACGAAACUUAA").validate(),
        Err(PwmError::Alphabet {
            position: 7,
            character: 'U'
        })
    );

    // Ns
    assert!(matches!(
        NtSeq::from("ACGAANCTTAA").validate(),
        Err(PwmError::Alphabet { position: 5, character: 'N' })
    ));

    // digits
    assert!(NtSeq::from("ACG1").validate().is_err());
}

#[test]
fn test_nt_seq_encoding() {
    let seq: NtSeq = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
        .into_iter()
        .collect();
    assert_eq!(seq.to_string(), "ACGT");
    assert!(seq.validate().is_ok());
    assert_eq!(
        NtSeq::from("GAT").encode().unwrap(),
        vec![Nucleotide::G, Nucleotide::A, Nucleotide::T]
    );
    assert_eq!(Nucleotide::from_char('g'), None);
    assert_eq!(Nucleotide::T.to_string(), "T");
}

#[test]
fn test_nt_seq_counts_characters() {
    let seq = NtSeq::from("AéAC");
    assert_eq!(seq.len(), 4);
    assert_eq!(
        seq.validate(),
        Err(PwmError::Alphabet {
            position: 1,
            character: 'é'
        })
    );
    assert_eq!(NtSeq::from("ACGT").len(), 4);
}

#[test]
fn test_reverse_complement() {
    assert_eq!(NtSeq::from("ATCG").reverse_complement().unwrap().as_str(), "CGAT");
    assert_eq!(NtSeq::from("AATTCCGG").reverse_complement().unwrap().as_str(), "CCGGAATT");
    // palindromic sequence
    assert_eq!(NtSeq::from("GCGC").reverse_complement().unwrap().as_str(), "GCGC");
    // invalid nucleotide
    assert!(NtSeq::from("ATCGX").reverse_complement().is_err());
}

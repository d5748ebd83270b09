#[cfg(test)]
mod tests {
    use crate::parsing::{parse_samples, parse_targets, zip_samples, TargetEncoding};
    use neurastep_core::{Loss, NeuraStepError, Sample};

    #[test]
    fn test_parse_inline_rows() -> Result<(), NeuraStepError> {
        let rows = parse_samples(" 0,0; 0,1 ;1,0;1, 1;", 2)?;
        assert_eq!(rows, vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]]);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(parse_samples("1,2;3", 2).unwrap_err().is_dimension_mismatch());
        assert!(matches!(
            parse_samples("1,x", 2),
            Err(NeuraStepError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_one_hot_targets_accept_index_or_row() -> Result<(), NeuraStepError> {
        let targets = parse_targets("2;0,1,0;0", TargetEncoding::OneHot(3))?;
        assert_eq!(
            targets,
            vec![vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]]
        );
        assert!(parse_targets("3", TargetEncoding::OneHot(3)).is_err());
        assert!(parse_targets("1.5", TargetEncoding::OneHot(3)).is_err());
        assert!(parse_targets("1", TargetEncoding::OneHot(0)).is_err());
        Ok(())
    }

    #[test]
    fn test_encoding_follows_loss() {
        assert_eq!(TargetEncoding::for_loss(Loss::CrossEntropy, 4), TargetEncoding::OneHot(4));
        assert_eq!(TargetEncoding::for_loss(Loss::MeanSquaredError, 2), TargetEncoding::Raw(2));
        assert_eq!(TargetEncoding::Raw(2).width(), 2);
    }

    #[test]
    fn test_zip_samples() -> Result<(), NeuraStepError> {
        let samples = zip_samples(parse_samples("0,1;1,1", 2)?, parse_targets("1;0", TargetEncoding::Raw(1))?)?;
        assert_eq!(samples[0], Sample::new(vec![0.0, 1.0], vec![1.0]));
        assert!(zip_samples(vec![vec![0.0]], vec![]).is_err());
        Ok(())
    }
}

use gemval_common::types::{DiamondSpecification, QualityGrade};

/// Carat score from weight thresholds. Boundaries are inclusive on the
/// lower bound, so exactly 2.0 scores 95. Unusable weights score as
/// 1.0 carat.
pub fn carat_score(carat: f64) -> u8 {
    let weight = if carat.is_finite() && carat > 0.0 {
        carat
    } else {
        1.0
    };

    if weight >= 2.0 {
        95
    } else if weight >= 1.5 {
        90
    } else if weight >= 1.0 {
        85
    } else if weight >= 0.75 {
        80
    } else if weight >= 0.5 {
        75
    } else {
        70
    }
}

/// Unweighted mean of the four grading scores, mapped to a label.
/// Infallible: unrecognized grades already score neutral defaults.
pub fn quality_grade(spec: &DiamondSpecification) -> QualityGrade {
    let total = u16::from(spec.cut.quality_score())
        + u16::from(spec.color.quality_score())
        + u16::from(spec.clarity.quality_score())
        + u16::from(carat_score(spec.carat));
    let mean = f64::from(total) / 4.0;

    if mean >= 90.0 {
        QualityGrade::Exceptional
    } else if mean >= 80.0 {
        QualityGrade::Excellent
    } else if mean >= 70.0 {
        QualityGrade::VeryGood
    } else if mean >= 60.0 {
        QualityGrade::Good
    } else {
        QualityGrade::Fair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemval_common::types::{Clarity, Color, Cut};

    #[test]
    fn test_carat_thresholds_inclusive() {
        assert_eq!(carat_score(2.0), 95);
        assert_eq!(carat_score(1.99), 90);
        assert_eq!(carat_score(1.5), 90);
        assert_eq!(carat_score(1.0), 85);
        assert_eq!(carat_score(0.75), 80);
        assert_eq!(carat_score(0.5), 75);
        assert_eq!(carat_score(0.3), 70);
    }

    #[test]
    fn test_carat_score_guards_bad_weight() {
        // Unusable weights behave like a 1.0 carat stone.
        assert_eq!(carat_score(f64::NAN), 85);
        assert_eq!(carat_score(-1.0), 85);
        assert_eq!(carat_score(0.0), 85);
    }

    #[test]
    fn test_quality_grade_reference_stone() {
        // Round 90, G 85, VS1 80, 1.0ct 85 — mean 85.
        let spec = DiamondSpecification::new(1.0, Cut::Round, Color::G, Clarity::VS1);
        assert_eq!(quality_grade(&spec), QualityGrade::Excellent);
    }

    #[test]
    fn test_quality_grade_extremes() {
        // Excellent 95, D 100, FL 100, 2.0ct 95 — mean 97.5.
        let top = DiamondSpecification::new(2.0, Cut::Excellent, Color::D, Clarity::FL);
        assert_eq!(quality_grade(&top), QualityGrade::Exceptional);

        // Pear 68, M 55, I2 30, 0.3ct 70 — mean 55.75.
        let low = DiamondSpecification::new(0.3, Cut::Pear, Color::M, Clarity::I2);
        assert_eq!(quality_grade(&low), QualityGrade::Fair);
    }

    #[test]
    fn test_quality_grade_neutral_defaults() {
        // Other cut 70, Other color 70, Other clarity 60, 1.0ct 85 — mean 71.25.
        let spec = DiamondSpecification::new(
            1.0,
            Cut::Other("Trillion".into()),
            Color::Other("Z".into()),
            Clarity::Other("SI3".into()),
        );
        assert_eq!(quality_grade(&spec), QualityGrade::VeryGood);
    }
}

/// Outcome of the quantity adjustment rule for one matched line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjusted {
    pub contribution: f64,
    /// The raw value was exactly zero. Callers emit a warning but still
    /// record the zero contribution; the category is not dropped.
    pub zero: bool,
}

/// Piecewise adjustment applied to every raw quantity before it is
/// accumulated: exactly zero contributes zero (flagged), values under
/// 100 gain 5, values of 100 and above gain 10.
///
/// Negative values are accepted input and take the under-100 branch.
pub fn adjust(value: f64) -> Adjusted {
    if value == 0.0 {
        Adjusted {
            contribution: 0.0,
            zero: true,
        }
    } else if value < 100.0 {
        Adjusted {
            contribution: value + 5.0,
            zero: false,
        }
    } else {
        Adjusted {
            contribution: value + 10.0,
            zero: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_contributes_zero_and_warns() {
        assert_eq!(
            adjust(0.0),
            Adjusted {
                contribution: 0.0,
                zero: true
            }
        );
    }

    #[test]
    fn small_values_gain_five() {
        assert_eq!(adjust(50.0).contribution, 55.0);
        assert_eq!(adjust(99.99).contribution, 104.99);
        assert!(!adjust(50.0).zero);
    }

    #[test]
    fn large_values_gain_ten() {
        assert_eq!(adjust(100.0).contribution, 110.0);
        assert_eq!(adjust(150.0).contribution, 160.0);
    }

    #[test]
    fn negatives_take_the_small_branch() {
        assert_eq!(adjust(-20.0).contribution, -15.0);
        assert!(!adjust(-20.0).zero);
    }
}

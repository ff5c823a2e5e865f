/// Operator consent to promote.
///
/// The only constructor is [`Confirmation::from_answer`], so code that holds
/// a `Confirmation` has been given an affirmative answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    _private: (),
}

impl Confirmation {
    /// `y` or `yes`, case-insensitive, surrounding whitespace ignored.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Self { _private: () }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        for answer in ["y", "Y", "yes", " YES\n", "Yes"] {
            assert!(Confirmation::from_answer(answer).is_some(), "{:?}", answer);
        }
    }

    #[test]
    fn test_everything_else_declines() {
        for answer in ["", "n", "no", "yess", "ok", "y e s"] {
            assert!(Confirmation::from_answer(answer).is_none(), "{:?}", answer);
        }
    }
}

//! Finishes

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Errors converting raw finish codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinishError {
    /// The code is neither `0` (glossy) nor `1` (matte).
    #[error("invalid finish code, valid values are 0 and 1, received: {0}")]
    InvalidCode(usize),
}

/// Surface finish of a single color in a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFinish {
    /// Glossy finish, the default for colors nobody asked about.
    #[default]
    Glossy,

    /// Matte finish, the expensive one.
    Matte,
}

impl ColorFinish {
    /// Every finish, in code order.
    pub const ALL: [ColorFinish; 2] = [ColorFinish::Glossy, ColorFinish::Matte];

    /// Numeric code used by the text input and report formats.
    pub const fn code(self) -> u8 {
        match self {
            ColorFinish::Glossy => 0,
            ColorFinish::Matte => 1,
        }
    }

    /// Contribution of this finish to the matte cost of an assignment.
    pub const fn matte_cost(self) -> usize {
        match self {
            ColorFinish::Glossy => 0,
            ColorFinish::Matte => 1,
        }
    }

    /// Returns `true` for [`ColorFinish::Matte`].
    pub const fn is_matte(self) -> bool {
        matches!(self, ColorFinish::Matte)
    }
}

impl TryFrom<usize> for ColorFinish {
    type Error = FinishError;

    fn try_from(code: usize) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ColorFinish::Glossy),
            1 => Ok(ColorFinish::Matte),
            other => Err(FinishError::InvalidCode(other)),
        }
    }
}

impl TryFrom<u8> for ColorFinish {
    type Error = FinishError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ColorFinish::try_from(usize::from(code))
    }
}

impl fmt::Display for ColorFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn codes_round_trip_through_try_from() -> TestResult {
        for finish in ColorFinish::ALL {
            assert_eq!(ColorFinish::try_from(finish.code())?, finish);
        }

        Ok(())
    }

    #[test]
    fn invalid_code_is_rejected() {
        assert_eq!(
            ColorFinish::try_from(6_usize),
            Err(FinishError::InvalidCode(6))
        );
        assert_eq!(
            FinishError::InvalidCode(6).to_string(),
            "invalid finish code, valid values are 0 and 1, received: 6"
        );
    }

    #[test]
    fn only_matte_costs() {
        assert_eq!(ColorFinish::Glossy.matte_cost(), 0);
        assert_eq!(ColorFinish::Matte.matte_cost(), 1);
        assert!(ColorFinish::Matte.is_matte());
        assert!(!ColorFinish::Glossy.is_matte());
    }

    #[test]
    fn default_is_glossy() {
        assert_eq!(ColorFinish::default(), ColorFinish::Glossy);
    }

    #[test]
    fn displays_as_code() {
        assert_eq!(ColorFinish::Glossy.to_string(), "0");
        assert_eq!(ColorFinish::Matte.to_string(), "1");
    }
}

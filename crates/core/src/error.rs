use thiserror::Error;

use crate::config::ConfigError;
use crate::model::ParseIdError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StepId;

    #[test]
    fn wraps_config_and_id_errors() {
        let err: Error = ConfigError::InvalidSubmissionCap.into();
        assert_eq!(err.to_string(), "submission cap must be > 0");

        let err: Error = StepId::new("").unwrap_err().into();
        assert!(matches!(err, Error::InvalidId(_)));
    }
}

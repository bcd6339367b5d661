pub type RespondiffResult<T> = Result<T, RespondiffError>;

#[derive(thiserror::Error, Debug)]
pub enum RespondiffError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("scene error: {0}")]
    Scene(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RespondiffError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Filesystem failure; the io error stays reachable through the anyhow chain.
    pub fn io(context: impl Into<String>, err: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(err).context(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BreakpointTable, Config, Scene, StyleProperty};

    #[test]
    fn missing_files_keep_the_io_error() {
        let err = Config::from_path("/nonexistent/respondiff/config.json").unwrap_err();
        assert!(err.to_string().contains("open config JSON"));
        let RespondiffError::Other(inner) = &err else {
            panic!("expected Other, got {err:?}");
        };
        let io = inner.root_cause().downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);

        let err = Scene::from_path("/nonexistent/respondiff/scene.json").unwrap_err();
        assert!(matches!(err, RespondiffError::Other(_)));
        assert!(err.to_string().contains("open scene JSON"));
    }

    #[test]
    fn bad_input_maps_to_its_own_variant() {
        let err = BreakpointTable::new(Vec::new()).unwrap_err();
        assert!(matches!(err, RespondiffError::Validation(_)));
        assert!(err.to_string().starts_with("validation error:"));

        let err = "font-color".parse::<StyleProperty>().unwrap_err();
        assert!(matches!(err, RespondiffError::Validation(_)));

        let err = Config::from_reader(r#"{ "breakpoints": 3 }"#.as_bytes()).unwrap_err();
        assert!(matches!(err, RespondiffError::Serde(_)));
        assert!(err.to_string().starts_with("serialization error:"));
    }
}

pub type RankraceResult<T> = Result<T, RankraceError>;

#[derive(thiserror::Error, Debug)]
pub enum RankraceError {
    #[error("config error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RankraceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            RankraceError::config("x")
                .to_string()
                .contains("config error:")
        );
        assert!(RankraceError::input("x").to_string().contains("input error:"));
        assert!(
            RankraceError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            RankraceError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = RankraceError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}

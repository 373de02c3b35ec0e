use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot load settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("record service: {}", .0.message())]
    Client(#[from] records::ClientError),
    #[error("cannot read --data from stdin: {0}")]
    Stdin(#[from] std::io::Error),
    /// `--data` was readable but does not describe the entity.
    #[error("--data is not a valid {entity} payload: {source}")]
    Data {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}

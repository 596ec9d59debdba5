#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    #[error("unknown checklist status code: {0:?}")]
    UnknownStatusCode(String),
    #[error("no child node with identifier {identifier:?}")]
    ChildNotFound { identifier: String },
    #[error("translation error: {0}")]
    Translation(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

pub type ChecklistResult<T> = std::result::Result<T, ChecklistError>;

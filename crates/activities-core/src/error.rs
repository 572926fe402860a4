use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Activity '{0}' not found")]
    NotFound(String),

    #[error("{email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },

    #[error("{email} is not signed up for {activity}")]
    NotRegistered { activity: String, email: String },

    #[error("invalid seed data: {0}")]
    InvalidSeed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ActivityError>;

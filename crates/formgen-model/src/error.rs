use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormgenError {
    #[error("form '{0}' has no usable rows")]
    EmptyForm(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, FormgenError>;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    #[error("Element with ID \"{0}\" not found")]
    MissingElement(&'static str),

    #[error("One or more DOM elements not found")]
    MissingElements,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read input {0}: {1}")]
    Input(String, #[source] std::io::Error),

    #[error("Input {0} is empty")]
    EmptyInput(String),
}

/// Errors returned by the fallible transformations in this crate.
///
/// The markdown pair never fails; these cover prompt composition and history
/// mapping, where the input can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Please write a prompt first")]
    EmptyPrompt,

    #[error("Invalid page {0}: pages start at 1")]
    InvalidPage(usize),

    #[error("{0}")]
    Api(String),

    #[error("History item not found: {0}")]
    ItemNotFound(String),
}

use crate::shared::Result;

/// OutputPresenter port for delivering the final artifact.
///
/// The contract is write-only: the presenter accepts a finished,
/// ordered artifact and never mutates it.
pub trait OutputPresenter {
    fn present(&self, content: &str) -> Result<()>;
}

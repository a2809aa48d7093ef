/// Case selection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("candidate pool is empty")]
    EmptyPool,

    #[error("unknown selection record: {id}")]
    UnknownSelection { id: String },
}

/// Expert consultation errors.
///
/// `BudgetExhausted` is an expected branch: callers skip the consultation
/// instead of failing the step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsultationError {
    #[error("consultation budget exhausted ({max} per episode)")]
    BudgetExhausted { max: u32 },

    #[error("unknown consultation request: {id}")]
    UnknownRequest { id: String },

    #[error("consultation request already resolved: {id}")]
    AlreadyResolved { id: String },

    #[error("consultation {id} timed out after {waited_ms} ms")]
    Timeout { id: String, waited_ms: u64 },

    #[error("consultation channel closed")]
    ChannelClosed,
}

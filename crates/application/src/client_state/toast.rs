/// Transient confirmation shown after a successful user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown.
    pub message: String,
}

impl Toast {
    /// The confirmation every successful save shows.
    #[must_use]
    pub fn saved() -> Self {
        Self {
            message: "Successfully saved.".to_owned(),
        }
    }
}

/// Purpose of an open add/edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    /// Blank form creating a new row.
    Add,
    /// Form pre-filled from an existing row.
    Edit,
}

/// Add/edit modal state. The payload is present in edit mode only.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState<P> {
    /// Modal closed.
    #[default]
    Hidden,
    /// Modal open.
    Visible {
        /// Add or edit.
        mode: ModalMode,
        /// Row being edited.
        payload: Option<P>,
    },
}

impl<P> ModalState<P> {
    /// Opens a blank add form.
    pub fn open_add(&mut self) {
        *self = Self::Visible {
            mode: ModalMode::Add,
            payload: None,
        };
    }

    /// Opens an edit form for a row.
    pub fn open_edit(&mut self, payload: P) {
        *self = Self::Visible {
            mode: ModalMode::Edit,
            payload: Some(payload),
        };
    }

    /// Closes the modal.
    pub fn close(&mut self) {
        *self = Self::Hidden;
    }

    /// Returns whether the modal is open.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// Returns the mode when open.
    #[must_use]
    pub fn mode(&self) -> Option<ModalMode> {
        match self {
            Self::Hidden => None,
            Self::Visible { mode, .. } => Some(*mode),
        }
    }

    /// Returns the edited row when open in edit mode.
    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        match self {
            Self::Hidden => None,
            Self::Visible { payload, .. } => payload.as_ref(),
        }
    }
}

/// Confirmation dialog guarding a destructive action.
///
/// Once confirmed, the dialog stays `Pending` until the mutation settles;
/// it cannot be cancelled or re-requested meanwhile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationState<A> {
    /// Dialog closed.
    #[default]
    Hidden,
    /// Waiting for the user to confirm.
    Visible(A),
    /// Confirmed; the mutation is in flight.
    Pending(A),
}

impl<A: Clone> ConfirmationState<A> {
    /// Shows the dialog for an action. Ignored while pending.
    pub fn request(&mut self, action: A) -> bool {
        if self.is_pending() {
            return false;
        }

        *self = Self::Visible(action);
        true
    }

    /// Closes the dialog without acting. Ignored while pending.
    pub fn cancel(&mut self) -> bool {
        match self {
            Self::Visible(_) => {
                *self = Self::Hidden;
                true
            }
            Self::Hidden | Self::Pending(_) => false,
        }
    }

    /// Moves to pending and returns the action to run.
    pub fn confirm(&mut self) -> Option<A> {
        let Self::Visible(action) = self else {
            return None;
        };

        let action = action.clone();
        *self = Self::Pending(action.clone());
        Some(action)
    }

    /// Closes the dialog once the mutation succeeded or its failure was caught.
    pub fn settle(&mut self) {
        if self.is_pending() {
            *self = Self::Hidden;
        }
    }

    /// Returns whether a confirmed mutation is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns whether the dialog is shown, pending or not.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// "Saving..." flag of a form; rejects a second submit while one is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveGuard {
    saving: bool,
}

impl SaveGuard {
    /// Marks a submit in flight. Returns `false` when one already is.
    pub fn begin(&mut self) -> bool {
        if self.saving {
            return false;
        }

        self.saving = true;
        true
    }

    /// Clears the in-flight flag.
    pub fn finish(&mut self) {
        self.saving = false;
    }

    /// Returns whether a submit is in flight.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }
}

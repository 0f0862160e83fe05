use crate::model::DocumentId;

/// Asks the user once before a batch of related windows is closed.
pub trait ConfirmClose {
    fn confirm_close(&mut self, documents: &[DocumentId]) -> bool;
}

impl<F> ConfirmClose for F
where
    F: FnMut(&[DocumentId]) -> bool,
{
    fn confirm_close(&mut self, documents: &[DocumentId]) -> bool {
        self(documents)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl ConfirmClose for AlwaysConfirm {
    fn confirm_close(&mut self, _documents: &[DocumentId]) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl ConfirmClose for NeverConfirm {
    fn confirm_close(&mut self, _documents: &[DocumentId]) -> bool {
        false
    }
}

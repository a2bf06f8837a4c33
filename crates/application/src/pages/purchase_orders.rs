use backoffice_core::UserIdentity;
use backoffice_domain::{Capability, ListFilter, Product, PurchaseOrderItem, RecordId};
use tracing::error;

use crate::{
    AccessGate, MirrorAction, ModalMode, ModalState, PurchaseOrderItemForm,
    PurchaseOrderItemService, SaveGuard, SyncOutcome, Toast,
};

use super::{RecordListView, SubmitOutcome};

/// Line items of one purchase order with the add/edit item modal.
pub struct PurchaseOrderItemsPanel {
    identity: UserIdentity,
    gate: AccessGate,
    service: PurchaseOrderItemService,
    purchase_order_id: RecordId,
    products: Vec<Product>,
    view: RecordListView<PurchaseOrderItem>,
    modal: ModalState<PurchaseOrderItem>,
    guard: SaveGuard,
    toast: Option<Toast>,
}

impl PurchaseOrderItemsPanel {
    /// Creates the panel for one purchase order.
    #[must_use]
    pub fn new(
        identity: UserIdentity,
        gate: AccessGate,
        service: PurchaseOrderItemService,
        purchase_order_id: RecordId,
    ) -> Self {
        let view = RecordListView::new(ListFilter::children_of(purchase_order_id.clone()));
        Self {
            identity,
            gate,
            service,
            purchase_order_id,
            products: Vec::new(),
            view,
            modal: ModalState::default(),
            guard: SaveGuard::default(),
            toast: None,
        }
    }

    /// Returns whether the signed-in user may manage purchase orders.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.gate
            .has_access(&self.identity, Capability::PurchaseOrders)
    }

    /// Returns the list view.
    #[must_use]
    pub fn view(&self) -> &RecordListView<PurchaseOrderItem> {
        &self.view
    }

    /// Returns the add/edit modal.
    #[must_use]
    pub fn modal(&self) -> &ModalState<PurchaseOrderItem> {
        &self.modal
    }

    /// Returns the products offered in the item form.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.products.as_slice()
    }

    /// Returns the last toast, if any.
    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Loads active products and the first page of items.
    pub async fn open(&mut self) -> Option<SyncOutcome> {
        if !self.is_authorized() {
            return None;
        }

        match self.service.active_products().await {
            Ok(products) => self.products = products,
            Err(error) => error!(%error, "failed to load products"),
        }
        Some(self.view.reload(self.service.records()).await)
    }

    /// Appends the next page.
    pub async fn show_more(&mut self) -> SyncOutcome {
        self.view.show_more(self.service.records()).await
    }

    /// Opens a blank item form.
    pub fn open_add(&mut self) {
        self.modal.open_add();
    }

    /// Opens the form for an existing item.
    pub fn open_edit(&mut self, item: PurchaseOrderItem) {
        self.modal.open_edit(item);
    }

    /// Closes the modal unless a save is running.
    pub fn close_modal(&mut self) {
        if !self.guard.is_saving() {
            self.modal.close();
        }
    }

    /// Validates and saves the open form.
    pub async fn submit(&mut self, form: &PurchaseOrderItemForm) -> SubmitOutcome {
        let Some(mode) = self.modal.mode() else {
            return SubmitOutcome::Ignored;
        };
        let item = match form.validate(&self.products) {
            Ok(item) => item,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        if !self.guard.begin() {
            return SubmitOutcome::Ignored;
        }

        let saved = match (mode, self.modal.payload().map(|item| item.id.clone())) {
            (ModalMode::Edit, Some(item_id)) => self
                .service
                .update(
                    &self.identity,
                    &self.purchase_order_id,
                    &item_id,
                    item.into_changes(),
                )
                .await
                .map(|receipt| MirrorAction::Merge {
                    id: item_id,
                    changes: receipt.value,
                }),
            _ => self
                .service
                .create(
                    &self.identity,
                    item.into_draft(self.purchase_order_id.clone()),
                )
                .await
                .map(|receipt| MirrorAction::Prepend(receipt.value)),
        };

        self.guard.finish();
        match saved {
            Ok(action) => {
                self.view.mirror_mut().apply(action);
                self.modal.close();
                let toast = Toast::saved();
                self.toast = Some(toast.clone());
                SubmitOutcome::Saved(toast)
            }
            Err(error) => {
                error!(%error, purchase_order_id = %self.purchase_order_id, "failed to save item");
                SubmitOutcome::Failed
            }
        }
    }
}

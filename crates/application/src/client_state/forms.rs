use std::collections::BTreeMap;

use backoffice_core::NonEmptyString;
use backoffice_domain::{
    DepartmentRef, Employee, EmployeeChanges, EmployeeDraft, Product, ProductRef,
    PurchaseOrderItem, PurchaseOrderItemChanges, PurchaseOrderItemDraft, RecordId,
};

use crate::purchase_order_service::find_product;

/// Per-field messages produced before any remote call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Records a message for a field.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Returns the message for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, format!("{label} is required"));
    }
    value.to_owned()
}

fn required_number(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, format!("{label} is required"));
        return 0.0;
    }

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => {
            errors.insert(field, format!("{label} must be a number"));
            0.0
        }
    }
}

/// Raw input of the purchase order item modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderItemForm {
    /// Selected product id.
    pub product_id: String,
    /// Quantity as typed.
    pub quantity: String,
    /// Unit price as typed.
    pub price: String,
}

/// Item input after validation, with the product resolved from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    /// Selected product.
    pub product_id: RecordId,
    /// Catalog entry of the product, when it is offered.
    pub product: Option<ProductRef>,
    /// Quantity.
    pub quantity: f64,
    /// Unit price.
    pub price: f64,
}

impl ValidatedItem {
    /// Quantity times unit price.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.quantity * self.price
    }

    /// Builds an insert payload for a purchase order.
    #[must_use]
    pub fn into_draft(self, purchase_order_id: RecordId) -> PurchaseOrderItemDraft {
        PurchaseOrderItemDraft {
            purchase_order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
            product: self.product,
        }
    }

    /// Builds an update payload.
    #[must_use]
    pub fn into_changes(self) -> PurchaseOrderItemChanges {
        PurchaseOrderItemChanges {
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
            product: self.product,
        }
    }
}

impl PurchaseOrderItemForm {
    /// Pre-fills the form from an existing item.
    #[must_use]
    pub fn from_item(item: &PurchaseOrderItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            quantity: item.quantity.to_string(),
            price: item.price.to_string(),
        }
    }

    /// Validates input and resolves the product against loaded products.
    pub fn validate(&self, products: &[Product]) -> Result<ValidatedItem, FieldErrors> {
        let mut errors = FieldErrors::default();

        let product_id = match RecordId::new(self.product_id.trim()) {
            Ok(product_id) => Some(product_id),
            Err(_) => {
                errors.insert("product_id", "Product is required");
                None
            }
        };
        let quantity = required_number(&mut errors, "quantity", "Quantity", &self.quantity);
        let price = required_number(&mut errors, "price", "Unit Price", &self.price);

        match product_id {
            Some(product_id) if errors.is_empty() => {
                let product = find_product(products, &product_id).map(Product::to_ref);
                Ok(ValidatedItem {
                    product_id,
                    product,
                    quantity,
                    price,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Raw input of the employee modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeForm {
    /// Given name.
    pub firstname: String,
    /// Middle name.
    pub middlename: String,
    /// Family name.
    pub lastname: String,
    /// Position.
    pub position: String,
    /// Daily rate as typed.
    pub rate: String,
    /// Selected department.
    pub department: Option<DepartmentRef>,
}

impl EmployeeForm {
    /// Pre-fills the form from an existing employee.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            firstname: employee.firstname.clone(),
            middlename: employee.middlename.clone(),
            lastname: employee.lastname.clone(),
            position: employee.position.clone(),
            rate: employee.rate.to_string(),
            department: employee.department.clone(),
        }
    }

    /// Validates input into an insert payload.
    pub fn validate(&self) -> Result<EmployeeDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let firstname = required_text(&mut errors, "firstname", "First Name", &self.firstname);
        let lastname = required_text(&mut errors, "lastname", "Last Name", &self.lastname);
        let position = required_text(&mut errors, "position", "Position", &self.position);
        let rate = required_number(&mut errors, "rate", "Rate", &self.rate);

        errors.into_result(|| EmployeeDraft {
            firstname,
            middlename: self.middlename.trim().to_owned(),
            lastname,
            position,
            rate,
            department: self.department.clone(),
            added_by: None,
        })
    }

    /// Validates input and keeps only the fields that differ from `current`.
    pub fn changes_from(&self, current: &Employee) -> Result<EmployeeChanges, FieldErrors> {
        let draft = self.validate()?;

        Ok(EmployeeChanges {
            firstname: (draft.firstname != current.firstname).then_some(draft.firstname),
            middlename: (draft.middlename != current.middlename).then_some(draft.middlename),
            lastname: (draft.lastname != current.lastname).then_some(draft.lastname),
            position: (draft.position != current.position).then_some(draft.position),
            rate: (draft.rate != current.rate).then_some(draft.rate),
            department: (draft.department != current.department).then_some(draft.department),
        })
    }
}

/// Raw input of the account details modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    /// Display name.
    pub name: String,
}

impl AccountForm {
    /// Validates the display name.
    pub fn validate(&self) -> Result<NonEmptyString, FieldErrors> {
        NonEmptyString::new(self.name.trim()).map_err(|_| {
            let mut errors = FieldErrors::default();
            errors.insert("name", "Name is required");
            errors
        })
    }
}

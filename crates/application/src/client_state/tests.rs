use backoffice_domain::{
    DepartmentRef, Employee, EmployeeChanges, ListFilter, ListPage, PageSize, RecordStatus,
};
use proptest::prelude::*;

use crate::test_support::{FakeRecordRepository, employee, employees, product, record_id};

use super::{
    AccountForm, ClientMirror, ConfirmationState, EmployeeForm, ListSynchronizer, MirrorAction,
    ModalMode, ModalState, PurchaseOrderItemForm, ResultCounters, SaveGuard, SyncOutcome,
};

fn page_size(value: u32) -> PageSize {
    let Ok(page_size) = PageSize::new(value) else {
        panic!("valid page size");
    };
    page_size
}

#[tokio::test]
async fn refresh_then_show_more_tracks_counters() {
    let repository = FakeRecordRepository::with_rows(employees(37, RecordStatus::Active));
    let synchronizer = ListSynchronizer::new();
    let mut mirror: ClientMirror<Employee> = ClientMirror::default();

    let outcome = synchronizer
        .refresh(&repository, &ListFilter::active(), page_size(10), &mut mirror)
        .await;
    assert_eq!(outcome, SyncOutcome::Applied { added: 10 });
    assert_eq!(
        mirror.counters(),
        ResultCounters {
            showing: 10,
            results: 37
        }
    );
    assert!(mirror.has_more());

    for _ in 0..3 {
        synchronizer
            .show_more(&repository, &ListFilter::active(), page_size(10), &mut mirror)
            .await;
    }
    assert_eq!(mirror.records().len(), 37);
    assert_eq!(mirror.counters().showing, 37);
    assert!(!mirror.has_more());
    assert_eq!(mirror.records()[10].id, record_id("emp-10"));
}

#[tokio::test]
async fn superseded_response_is_discarded() {
    let repository = FakeRecordRepository::with_rows(employees(5, RecordStatus::Active));
    let synchronizer = ListSynchronizer::new();
    let mut mirror: ClientMirror<Employee> = ClientMirror::default();

    let first = synchronizer.begin_refresh(page_size(2));
    let second = synchronizer.begin_refresh(page_size(3));
    let second_response = ListSynchronizer::fetch(&repository, &ListFilter::active(), &second).await;
    let first_response = ListSynchronizer::fetch(&repository, &ListFilter::active(), &first).await;

    assert_eq!(
        synchronizer.settle(second, second_response, &mut mirror),
        SyncOutcome::Applied { added: 3 }
    );
    assert_eq!(
        synchronizer.settle(first, first_response, &mut mirror),
        SyncOutcome::Stale
    );
    assert_eq!(mirror.records().len(), 3);
}

#[tokio::test]
async fn failed_fetch_adds_nothing() {
    let repository = FakeRecordRepository::with_rows(employees(4, RecordStatus::Active));
    let synchronizer = ListSynchronizer::new();
    let mut mirror: ClientMirror<Employee> = ClientMirror::default();
    synchronizer
        .refresh(&repository, &ListFilter::active(), page_size(2), &mut mirror)
        .await;

    repository.fail_reads(true);
    let outcome = synchronizer
        .show_more(&repository, &ListFilter::active(), page_size(2), &mut mirror)
        .await;

    assert_eq!(outcome, SyncOutcome::Failed);
    assert_eq!(mirror.records().len(), 2);
}

#[test]
fn merge_into_absent_row_is_silent() {
    let mut mirror = ClientMirror::default().reduce(MirrorAction::Replace(ListPage {
        records: vec![employee("emp-1", "Ana", RecordStatus::Active)],
        total: 1,
    }));

    let patched = mirror.apply(MirrorAction::Merge {
        id: record_id("emp-404"),
        changes: EmployeeChanges {
            position: Some("Lead".to_owned()),
            ..EmployeeChanges::default()
        },
    });

    assert!(!patched);
    assert_eq!(mirror.records()[0].position, "Technician");
}

#[test]
fn local_patches_leave_counters_alone() {
    let mut mirror = ClientMirror::default().reduce(MirrorAction::Replace(ListPage {
        records: vec![employee("emp-1", "Ana", RecordStatus::Active)],
        total: 1,
    }));

    mirror.apply(MirrorAction::Prepend(employee("emp-2", "Ben", RecordStatus::Active)));
    mirror.apply(MirrorAction::Remove(record_id("emp-1")));

    assert_eq!(mirror.records()[0].id, record_id("emp-2"));
    assert_eq!(
        mirror.counters(),
        ResultCounters {
            showing: 1,
            results: 1
        }
    );
}

#[test]
fn set_status_patches_in_place() {
    let mut mirror = ClientMirror::default().reduce(MirrorAction::Replace(ListPage {
        records: vec![employee("emp-1", "Ana", RecordStatus::Inactive)],
        total: 1,
    }));

    assert!(mirror.apply(MirrorAction::SetStatus {
        id: record_id("emp-1"),
        status: RecordStatus::Active,
    }));
    assert_eq!(mirror.records()[0].status, RecordStatus::Active);
}

#[test]
fn confirmation_stays_pending_until_settled() {
    let mut confirmation = ConfirmationState::default();
    assert!(confirmation.request("emp-1"));
    assert_eq!(confirmation.confirm(), Some("emp-1"));

    assert!(!confirmation.cancel());
    assert!(!confirmation.request("emp-2"));
    assert_eq!(confirmation.confirm(), None);
    assert!(confirmation.is_pending());

    confirmation.settle();
    assert_eq!(confirmation, ConfirmationState::Hidden);
}

#[test]
fn modal_carries_payload_only_in_edit_mode() {
    let mut modal = ModalState::default();
    modal.open_add();
    assert_eq!(modal.mode(), Some(ModalMode::Add));
    assert_eq!(modal.payload(), None);

    modal.open_edit(7_u8);
    assert_eq!(modal.payload(), Some(&7));

    modal.close();
    assert!(!modal.is_visible());
}

#[test]
fn save_guard_rejects_reentrant_submit() {
    let mut guard = SaveGuard::default();
    assert!(guard.begin());
    assert!(!guard.begin());
    guard.finish();
    assert!(guard.begin());
}

#[test]
fn item_form_reports_required_fields() {
    let form = PurchaseOrderItemForm::default();
    let Err(errors) = form.validate(&[]) else {
        panic!("empty form must fail");
    };

    assert_eq!(errors.get("product_id"), Some("Product is required"));
    assert_eq!(errors.get("quantity"), Some("Quantity is required"));
    assert_eq!(errors.get("price"), Some("Unit Price is required"));
}

#[test]
fn item_form_resolves_product_and_total() {
    let form = PurchaseOrderItemForm {
        product_id: "P1".to_owned(),
        quantity: "2".to_owned(),
        price: "50".to_owned(),
    };
    let Ok(item) = form.validate(&[product("P1", "P1-name")]) else {
        panic!("valid form");
    };

    assert_eq!(item.total(), 100.0);
    assert_eq!(item.product.map(|product| product.name), Some("P1-name".to_owned()));
}

#[test]
fn employee_form_keeps_only_changed_fields() {
    let current = employee("emp-1", "Ana", RecordStatus::Active);
    let mut form = EmployeeForm::from_employee(&current);
    form.position = "Lead".to_owned();

    let Ok(changes) = form.changes_from(&current) else {
        panic!("valid form");
    };
    assert_eq!(changes.position.as_deref(), Some("Lead"));
    assert!(changes.firstname.is_none());
    assert!(changes.rate.is_none());
    assert!(changes.department.is_none());
}

#[test]
fn employee_form_can_clear_the_department() {
    let mut current = employee("emp-1", "Ana", RecordStatus::Active);
    current.department = Some(DepartmentRef {
        id: record_id("dep-1"),
        name: "Yard".to_owned(),
    });
    let mut form = EmployeeForm::from_employee(&current);
    form.department = None;

    let Ok(changes) = form.changes_from(&current) else {
        panic!("valid form");
    };
    assert_eq!(changes.department, Some(None));
    assert!(!changes.is_empty());
}

#[test]
fn account_form_requires_name() {
    let form = AccountForm {
        name: "  ".to_owned(),
    };
    assert!(matches!(form.validate(), Err(errors) if errors.get("name") == Some("Name is required")));
}

proptest! {
    #[test]
    fn replace_and_append_keep_showing_equal_to_rows(
        first in 0_usize..15,
        more in proptest::collection::vec(0_usize..15, 0..5),
        extra in 0_u64..20,
    ) {
        let total = (first + more.iter().sum::<usize>()) as u64 + extra;
        let mut mirror = ClientMirror::default().reduce(MirrorAction::Replace(ListPage {
            records: employees(first, RecordStatus::Active),
            total,
        }));
        prop_assert_eq!(mirror.counters().showing, mirror.records().len() as u64);

        for count in more {
            mirror.apply(MirrorAction::Append(ListPage {
                records: employees(count, RecordStatus::Active),
                total,
            }));
            prop_assert_eq!(mirror.counters().showing, mirror.records().len() as u64);
            prop_assert_eq!(mirror.counters().results, total);
        }

        prop_assert_eq!(mirror.has_more(), extra > 0);
    }

    #[test]
    fn reset_always_empties_the_mirror(count in 0_usize..20) {
        let mirror = ClientMirror::default()
            .reduce(MirrorAction::Replace(ListPage {
                records: employees(count, RecordStatus::Active),
                total: count as u64,
            }))
            .reduce(MirrorAction::Reset);

        prop_assert!(mirror.records().is_empty());
        prop_assert_eq!(mirror.counters(), ResultCounters::default());
    }
}

use std::sync::Arc;

use backoffice_core::{OrgId, UserIdentity};
use backoffice_domain::{
    AccessMember, AdminAllowList, Capability, Employee, PageSize, PurchaseOrderItem,
    PurchaseOrderItemDraft, RecordStatus, SystemAccessSettings, UserAccount,
};

use crate::test_support::{
    FakeAuditRepository, FakeObjectStorage, FakeProductCatalog, FakeRecordRepository,
    FakeSettingsRepository, account, admin_identity, employees, identity, product, record_id,
};
use crate::{
    AccessGate, AccountForm, AccountService, AuditPolicy, AuditTrail, EmployeeForm,
    EmployeeService, PurchaseOrderItemForm, PurchaseOrderItemService, RecordRepository,
    ResultCounters, SettingsService, SyncOutcome,
};

use super::{
    AccountDetailsPanel, AccountsPage, EmployeesPage, PurchaseOrderItemsPanel, SubmitOutcome,
    SystemSettingsPage,
};

fn admin_gate() -> AccessGate {
    AccessGate::with_settings(
        AdminAllowList::parse("root@example.com"),
        SystemAccessSettings::default(),
    )
}

fn trail(audit: &Arc<FakeAuditRepository>) -> AuditTrail {
    AuditTrail::new(audit.clone(), AuditPolicy::BestEffort)
}

fn employees_page(
    repository: &Arc<FakeRecordRepository<Employee>>,
    audit: &Arc<FakeAuditRepository>,
) -> EmployeesPage {
    EmployeesPage::new(
        admin_identity(),
        admin_gate(),
        EmployeeService::new(repository.clone(), trail(audit)),
    )
}

fn items_panel(
    repository: &Arc<FakeRecordRepository<PurchaseOrderItem>>,
    audit: &Arc<FakeAuditRepository>,
) -> PurchaseOrderItemsPanel {
    let catalog = Arc::new(FakeProductCatalog::new(vec![
        product("P1", "P1-name"),
        product("P2", "P2-name"),
    ]));
    PurchaseOrderItemsPanel::new(
        admin_identity(),
        admin_gate(),
        PurchaseOrderItemService::new(repository.clone(), catalog, trail(audit)),
        record_id("po-1"),
    )
}

fn item_form(product_id: &str, quantity: &str, price: &str) -> PurchaseOrderItemForm {
    PurchaseOrderItemForm {
        product_id: product_id.to_owned(),
        quantity: quantity.to_owned(),
        price: price.to_owned(),
    }
}

#[tokio::test]
async fn employees_page_shows_first_page_and_offers_more() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        37,
        RecordStatus::Active,
    )));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = employees_page(&repository, &audit);

    assert_eq!(page.open().await, Some(SyncOutcome::Applied { added: 10 }));
    assert_eq!(
        page.view().mirror().counters(),
        ResultCounters {
            showing: 10,
            results: 37
        }
    );
    assert!(page.view().can_show_more());

    page.show_more().await;
    assert_eq!(page.view().mirror().records().len(), 20);
}

#[tokio::test]
async fn failed_refetch_after_criteria_change_leaves_an_empty_list() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        12,
        RecordStatus::Active,
    )));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = employees_page(&repository, &audit);
    assert_eq!(page.open().await, Some(SyncOutcome::Applied { added: 10 }));

    repository.fail_reads(true);
    assert_eq!(page.search("emp", None).await, SyncOutcome::Failed);
    assert!(page.view().mirror().records().is_empty());
    assert_eq!(page.view().mirror().counters(), ResultCounters::default());
    assert!(!page.view().is_loading());

    repository.fail_reads(false);
    page.open().await;
    repository.fail_reads(true);
    let Ok(page_size) = PageSize::new(25) else {
        panic!("valid page size");
    };
    assert_eq!(page.set_page_size(page_size).await, SyncOutcome::Failed);
    assert!(page.view().mirror().records().is_empty());
    assert_eq!(
        page.view().mirror().counters(),
        ResultCounters {
            showing: 0,
            results: 0
        }
    );
}

#[tokio::test]
async fn unauthorized_user_gets_no_fetch() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        3,
        RecordStatus::Active,
    )));
    repository.fail_reads(true);
    let mut page = EmployeesPage::new(
        identity(),
        AccessGate::new(AdminAllowList::default()),
        EmployeeService::new(
            repository,
            trail(&Arc::new(FakeAuditRepository::default())),
        ),
    );

    assert!(!page.is_authorized());
    assert_eq!(page.open().await, None);
}

#[tokio::test]
async fn listed_member_passes_the_gate() {
    let mut settings = SystemAccessSettings::default();
    settings.replace_assignment(
        Capability::HumanResource,
        vec![AccessMember {
            user_id: "user-1".to_owned(),
            name: "Clerk".to_owned(),
        }],
    );
    let page = EmployeesPage::new(
        identity(),
        AccessGate::with_settings(AdminAllowList::default(), settings),
        EmployeeService::new(
            Arc::new(FakeRecordRepository::<Employee>::default()),
            trail(&Arc::new(FakeAuditRepository::default())),
        ),
    );

    assert!(page.is_authorized());
}

#[tokio::test]
async fn adding_an_item_prepends_it_with_product_and_total() {
    let repository = Arc::new(FakeRecordRepository::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let mut panel = items_panel(&repository, &audit);
    panel.open().await;

    panel.open_add();
    let outcome = panel.submit(&item_form("P1", "2", "50")).await;

    assert!(matches!(outcome, SubmitOutcome::Saved(ref toast) if toast.message == "Successfully saved."));
    let first = &panel.view().mirror().records()[0];
    assert_eq!(first.total, 100.0);
    assert_eq!(
        first.product.as_ref().map(|product| product.name.as_str()),
        Some("P1-name")
    );
    assert_eq!(audit.messages().await, vec!["Added product \"P1-name\"".to_owned()]);
    assert!(!panel.modal().is_visible());
}

#[tokio::test]
async fn invalid_item_form_sends_nothing() {
    let repository = Arc::new(FakeRecordRepository::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let mut panel = items_panel(&repository, &audit);
    panel.open().await;

    panel.open_add();
    let outcome = panel.submit(&item_form("", "", "9")).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.len() == 2));
    assert_eq!(repository.write_count(), 0);
    assert!(panel.modal().is_visible());
}

#[tokio::test]
async fn editing_an_item_missing_from_the_mirror_saves_silently() {
    let stored = PurchaseOrderItem {
        id: record_id("item-9"),
        purchase_order_id: record_id("po-1"),
        product_id: record_id("P1"),
        quantity: 1.0,
        price: 10.0,
        total: 10.0,
        product: None,
    };
    let repository = Arc::new(FakeRecordRepository::with_rows(vec![stored.clone()]));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut panel = items_panel(&repository, &audit);
    repository.fail_reads(true);
    panel.open().await;
    repository.fail_reads(false);

    panel.open_edit(stored);
    let outcome = panel.submit(&item_form("P2", "3", "10")).await;

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert!(panel.view().mirror().records().is_empty());
    let written = repository.stored(&record_id("item-9")).await;
    assert_eq!(written.map(|item| item.total), Some(30.0));
    assert_eq!(audit.messages().await, vec!["Updated product \"P2-name\"".to_owned()]);
}

#[tokio::test]
async fn deactivating_under_active_filter_removes_the_row() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        3,
        RecordStatus::Active,
    )));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = employees_page(&repository, &audit);
    page.open().await;

    assert!(page.request_status_change(record_id("emp-1"), RecordStatus::Inactive));
    let outcome = page.confirm_status_change().await;

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert!(!page.view().mirror().contains(&record_id("emp-1")));
    assert!(!page.confirmation().is_visible());
    assert_eq!(page.view().mirror().counters().showing, 3);
}

#[tokio::test]
async fn toggling_without_status_filter_patches_in_place() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        2,
        RecordStatus::Active,
    )));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = employees_page(&repository, &audit);
    page.search("", None).await;

    page.request_status_change(record_id("emp-0"), RecordStatus::Inactive);
    page.confirm_status_change().await;

    let records = page.view().mirror().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, RecordStatus::Inactive);
}

#[tokio::test]
async fn failed_toggle_settles_without_toast() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        1,
        RecordStatus::Active,
    )));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = employees_page(&repository, &audit);
    page.open().await;
    repository.fail_writes(true);

    page.request_status_change(record_id("emp-0"), RecordStatus::Inactive);
    let outcome = page.confirm_status_change().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(page.toast().is_none());
    assert!(!page.confirmation().is_visible());
    assert!(page.view().mirror().contains(&record_id("emp-0")));
    assert!(audit.entries().await.is_empty());
}

#[tokio::test]
async fn adding_an_employee_prepends_to_the_mirror() {
    let repository = Arc::new(FakeRecordRepository::with_rows(employees(
        2,
        RecordStatus::Active,
    )));
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = employees_page(&repository, &audit);
    page.open().await;

    page.open_add();
    let form = EmployeeForm {
        firstname: "Rosa".to_owned(),
        lastname: "Diaz".to_owned(),
        position: "Clerk".to_owned(),
        rate: "550".to_owned(),
        ..EmployeeForm::default()
    };
    assert!(matches!(page.submit(&form).await, SubmitOutcome::Saved(_)));

    let first = &page.view().mirror().records()[0];
    assert_eq!(first.full_name(), "Rosa Diaz");
    assert_eq!(
        first.added_by.as_ref().map(|user| user.id.as_str()),
        Some("admin-1")
    );
}

#[tokio::test]
async fn account_name_change_patches_the_account_list() {
    let accounts = Arc::new(FakeRecordRepository::with_rows(vec![
        account("u-1", "Mia"),
        account("u-2", "Noel"),
    ]));
    let audit = Arc::new(FakeAuditRepository::default());
    let service = AccountService::new(
        accounts.clone(),
        Arc::new(FakeObjectStorage::default()),
        trail(&audit),
    );
    let mut list = AccountsPage::new(admin_identity(), admin_gate(), service.clone());
    list.open().await;

    let mut panel =
        AccountDetailsPanel::new(admin_identity(), admin_gate(), service, record_id("u-2"));
    assert!(panel.load().await);
    assert_eq!(panel.form().name, "Noel");

    let form = AccountForm {
        name: "Noel Reyes".to_owned(),
    };
    let outcome = panel.submit(&form, Some(list.mirror_mut())).await;

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    let names: Vec<&str> = list
        .view()
        .mirror()
        .records()
        .iter()
        .map(|account| account.name.as_str())
        .collect();
    assert_eq!(names, vec!["Mia", "Noel Reyes"]);
}

#[tokio::test]
async fn account_owner_may_edit_without_capability() {
    let accounts = Arc::new(FakeRecordRepository::with_rows(vec![account(
        "user-1", "Clerk",
    )]));
    let service = AccountService::new(
        accounts,
        Arc::new(FakeObjectStorage::default()),
        trail(&Arc::new(FakeAuditRepository::default())),
    );
    let gate = AccessGate::new(AdminAllowList::default());

    let own = AccountDetailsPanel::new(identity(), gate.clone(), service.clone(), record_id("user-1"));
    let other = AccountDetailsPanel::new(
        UserIdentity::new("user-2", "other@example.com"),
        gate,
        service,
        record_id("user-1"),
    );

    assert!(own.can_edit());
    assert!(!own.is_account_admin());
    assert!(!other.can_edit());
}

#[tokio::test]
async fn failed_account_update_shows_no_toast() {
    let accounts = Arc::new(FakeRecordRepository::<UserAccount>::with_rows(vec![account(
        "u-1", "Mia",
    )]));
    accounts.fail_writes(true);
    let service = AccountService::new(
        accounts,
        Arc::new(FakeObjectStorage::default()),
        trail(&Arc::new(FakeAuditRepository::default())),
    );
    let mut panel = AccountDetailsPanel::new(admin_identity(), admin_gate(), service, record_id("u-1"));
    panel.load().await;

    let form = AccountForm {
        name: "Mia L".to_owned(),
    };
    assert_eq!(panel.submit(&form, None).await, SubmitOutcome::Failed);
    assert_eq!(panel.account().map(|account| account.name.as_str()), Some("Mia"));
}

#[tokio::test]
async fn settings_page_inserts_first_then_upserts() {
    let repository = Arc::new(FakeSettingsRepository::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let mut page = SystemSettingsPage::new(
        admin_identity(),
        admin_gate(),
        SettingsService::new(repository.clone(), trail(&audit), OrgId::new()),
    );
    assert!(page.open().await);

    let members = vec![AccessMember {
        user_id: "user-1".to_owned(),
        name: "Clerk".to_owned(),
    }];
    page.assign(Capability::Payroll, members.clone());
    assert!(matches!(page.save().await, SubmitOutcome::Saved(_)));
    page.assign(Capability::Projects, members);
    assert!(matches!(page.save().await, SubmitOutcome::Saved(_)));

    assert_eq!(repository.insert_count(), 1);
    assert_eq!(repository.upsert_count(), 1);
    assert_eq!(page.members(Capability::Projects).len(), 1);
    assert!(page.members(Capability::Inventory).is_empty());
}

#[tokio::test]
async fn show_more_is_hidden_once_everything_is_loaded() {
    let repository = Arc::new(FakeRecordRepository::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let mut panel = items_panel(&repository, &audit);

    for index in 0..3 {
        let draft = PurchaseOrderItemDraft {
            purchase_order_id: record_id(if index == 0 { "po-2" } else { "po-1" }),
            product_id: record_id("P1"),
            quantity: 1.0,
            price: 1.0,
            product: None,
        };
        assert!(repository.create(draft).await.is_ok());
    }

    panel.open().await;
    assert_eq!(panel.view().mirror().records().len(), 2);
    assert!(!panel.view().can_show_more());
    assert_eq!(panel.products().len(), 2);
}

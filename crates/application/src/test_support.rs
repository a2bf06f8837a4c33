//! Fakes shared by application tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use backoffice_core::{AppError, AppResult, OrgId, UserIdentity};
use backoffice_domain::{
    AccessAssignment, AuditEntry, Employee, EmployeeDraft, ListFilter, ListPage, ListedRecord,
    ObjectPath, PageRequest, Product, RecordId, RecordStatus, SystemAccessSettings, UserAccount,
};
use tokio::sync::Mutex;

use crate::{
    AuditRepository, ObjectStorage, ProductCatalog, RecordRepository, SystemSettingsRepository,
};

pub fn record_id(value: &str) -> RecordId {
    match RecordId::new(value) {
        Ok(record_id) => record_id,
        Err(error) => panic!("invalid test record id: {error}"),
    }
}

pub fn identity() -> UserIdentity {
    UserIdentity::new("user-1", "clerk@example.com")
}

pub fn admin_identity() -> UserIdentity {
    UserIdentity::new("admin-1", "root@example.com")
}

pub fn employee(id: &str, firstname: &str, status: RecordStatus) -> Employee {
    let mut employee = Employee::from_draft(
        record_id(id),
        EmployeeDraft {
            firstname: firstname.to_owned(),
            middlename: String::new(),
            lastname: "Santos".to_owned(),
            position: "Technician".to_owned(),
            rate: 500.0,
            department: None,
            added_by: None,
        },
    );
    employee.status = status;
    employee
}

pub fn employees(count: usize, status: RecordStatus) -> Vec<Employee> {
    (0..count)
        .map(|index| employee(format!("emp-{index}").as_str(), "Worker", status))
        .collect()
}

pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: record_id(id),
        name: name.to_owned(),
        status: RecordStatus::Active,
    }
}

pub fn account(id: &str, name: &str) -> UserAccount {
    UserAccount {
        id: record_id(id),
        name: name.to_owned(),
        email: format!("{id}@example.com"),
        avatar_url: None,
        status: RecordStatus::Active,
    }
}

pub struct FakeRecordRepository<R: ListedRecord> {
    rows: Mutex<Vec<R>>,
    next_id: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl<R: ListedRecord> Default for FakeRecordRepository<R> {
    fn default() -> Self {
        Self::with_rows(Vec::new())
    }
}

impl<R: ListedRecord> FakeRecordRepository<R> {
    pub fn with_rows(rows: Vec<R>) -> Self {
        Self {
            rows: Mutex::new(rows),
            next_id: AtomicUsize::new(1),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn stored(&self, record_id: &RecordId) -> Option<R> {
        self.rows
            .lock()
            .await
            .iter()
            .find(|row| row.record_id() == record_id)
            .cloned()
    }

    fn begin_write(&self) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("remote write rejected".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: ListedRecord> RecordRepository<R> for FakeRecordRepository<R> {
    async fn list(&self, filter: &ListFilter, page: PageRequest) -> AppResult<ListPage<R>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal("remote read failed".to_owned()));
        }

        let rows = self.rows.lock().await;
        let matching: Vec<&R> = rows.iter().filter(|row| filter.matches(*row)).collect();
        let total = matching.len() as u64;
        let records = matching
            .into_iter()
            .skip(page.offset)
            .take(page.page_size.get())
            .cloned()
            .collect();

        Ok(ListPage { records, total })
    }

    async fn find(&self, record_id: &RecordId) -> AppResult<Option<R>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal("remote read failed".to_owned()));
        }
        Ok(self.stored(record_id).await)
    }

    async fn create(&self, draft: R::Draft) -> AppResult<R> {
        self.begin_write()?;
        let next = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = R::from_draft(record_id(format!("new-{next}").as_str()), draft);
        self.rows.lock().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, record_id: &RecordId, changes: R::Changes) -> AppResult<()> {
        self.begin_write()?;
        if let Some(row) = self
            .rows
            .lock()
            .await
            .iter_mut()
            .find(|row| row.record_id() == record_id)
        {
            row.apply_changes(&changes);
        }
        Ok(())
    }

    async fn set_status(&self, record_id: &RecordId, status: RecordStatus) -> AppResult<()> {
        self.begin_write()?;
        if let Some(row) = self
            .rows
            .lock()
            .await
            .iter_mut()
            .find(|row| row.record_id() == record_id)
        {
            row.set_status(status);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAuditRepository {
    entries: Mutex<Vec<AuditEntry>>,
    fail: bool,
}

impl FakeAuditRepository {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_entry(&self, entry: AuditEntry) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("audit insert rejected".to_owned()));
        }
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

pub struct FakeProductCatalog {
    products: Vec<Product>,
}

impl FakeProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductCatalog for FakeProductCatalog {
    async fn list_active_products(&self) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.status == RecordStatus::Active)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeSettingsRepository {
    stored: Mutex<Option<SystemAccessSettings>>,
    fail: AtomicBool,
    inserts: AtomicUsize,
    upserts: AtomicUsize,
}

impl FakeSettingsRepository {
    pub fn with_settings(settings: SystemAccessSettings) -> Self {
        Self {
            stored: Mutex::new(Some(settings)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("settings store unavailable".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl SystemSettingsRepository for FakeSettingsRepository {
    async fn find_system_access(&self, _org_id: OrgId) -> AppResult<Option<SystemAccessSettings>> {
        self.check()?;
        Ok(self.stored.lock().await.clone())
    }

    async fn insert_system_access(
        &self,
        _org_id: OrgId,
        assignments: Vec<AccessAssignment>,
    ) -> AppResult<SystemAccessSettings> {
        self.check()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let settings = SystemAccessSettings::new(Some(record_id("settings-1")), assignments);
        *self.stored.lock().await = Some(settings.clone());
        Ok(settings)
    }

    async fn upsert_system_access(
        &self,
        _org_id: OrgId,
        settings: SystemAccessSettings,
    ) -> AppResult<SystemAccessSettings> {
        self.check()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().await = Some(settings.clone());
        Ok(settings)
    }
}

#[derive(Default)]
pub struct FakeObjectStorage {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl FakeObjectStorage {
    pub async fn put(&self, path: &str) {
        self.objects.lock().await.insert(path.to_owned(), Vec::new());
    }

    pub async fn paths(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStorage for FakeObjectStorage {
    async fn list(&self, folder: &str) -> AppResult<Vec<String>> {
        let prefix = format!("{folder}/");
        Ok(self
            .objects
            .lock()
            .await
            .keys()
            .filter_map(|path| path.strip_prefix(prefix.as_str()).map(str::to_owned))
            .collect())
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        let mut objects = self.objects.lock().await;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        _content_type: &str,
        upsert: bool,
    ) -> AppResult<()> {
        let mut objects = self.objects.lock().await;
        let key = path.to_string();
        if objects.contains_key(&key) && !upsert {
            return Err(AppError::Conflict(format!("object '{key}' already exists")));
        }
        objects.insert(key, bytes);
        Ok(())
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        format!("https://storage.test/public/rdt/{path}")
    }
}

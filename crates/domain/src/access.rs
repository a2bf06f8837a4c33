use std::str::FromStr;

use backoffice_core::{AppError, AppResult, UserIdentity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::listing::RecordId;

/// Named capabilities that gate whole pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Manage system settings, including these assignments.
    Settings,
    /// Manage employee user accounts.
    EmployeeAccounts,
    /// Manage the payroll system.
    Payroll,
    /// Manage the inventory system.
    Inventory,
    /// Manage purchase orders.
    PurchaseOrders,
    /// Manage projects.
    Projects,
    /// Manage HR employee records.
    HumanResource,
}

impl Capability {
    /// Returns a stable storage value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::EmployeeAccounts => "employee_accounts",
            Self::Payroll => "payroll",
            Self::Inventory => "inventory",
            Self::PurchaseOrders => "purchase_orders",
            Self::Projects => "projects",
            Self::HumanResource => "human_resource",
        }
    }

    /// Returns the settings page caption for this capability.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Settings => "Who can manage System Settings",
            Self::EmployeeAccounts => "Who can manage Employee Accounts",
            Self::Payroll => "Who can manage Payroll System",
            Self::Inventory => "Who can manage Inventory System",
            Self::PurchaseOrders => "Who can manage Purchase Orders",
            Self::Projects => "Who can manage Projects",
            Self::HumanResource => "Who can manage Human Resource",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::Settings,
            Capability::EmployeeAccounts,
            Capability::Payroll,
            Capability::Inventory,
            Capability::PurchaseOrders,
            Capability::Projects,
            Capability::HumanResource,
        ];

        ALL
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown capability value '{value}'")))
    }
}

/// User listed under a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessMember {
    /// User id, matched against the identity subject.
    #[serde(rename = "id")]
    pub user_id: String,
    /// Display name captured when the member was picked.
    #[serde(default)]
    pub name: String,
}

/// Permission assignment: one capability and the users allowed to manage it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessAssignment {
    /// Assigned capability.
    #[serde(rename = "access_type")]
    pub capability: Capability,
    /// Users granted the capability.
    #[serde(rename = "data", default)]
    pub members: Vec<AccessMember>,
}

impl AccessAssignment {
    /// Returns whether the identity is listed.
    #[must_use]
    pub fn lists(&self, identity: &UserIdentity) -> bool {
        self.members
            .iter()
            .any(|member| member.user_id == identity.subject())
    }
}

/// The single `system_access` settings row of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemAccessSettings {
    /// Stored row id; `None` until the row is first inserted.
    pub id: Option<RecordId>,
    /// Assignments in stored order.
    pub assignments: Vec<AccessAssignment>,
    /// Stored entries that name no known capability, written back unchanged.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retained: Vec<Value>,
}

impl SystemAccessSettings {
    /// Creates settings from stored assignments.
    #[must_use]
    pub fn new(id: Option<RecordId>, assignments: Vec<AccessAssignment>) -> Self {
        Self {
            id,
            assignments,
            retained: Vec::new(),
        }
    }

    /// Builds settings from the stored `data` array. Entries that do not
    /// decode into an assignment of a known capability are retained as-is.
    #[must_use]
    pub fn from_stored(id: Option<RecordId>, entries: Vec<Value>) -> Self {
        let mut settings = Self::new(id, Vec::new());
        for entry in entries {
            match AccessAssignment::deserialize(&entry) {
                Ok(assignment) => settings.assignments.push(assignment),
                Err(_) => settings.retained.push(entry),
            }
        }

        settings
    }

    /// Returns the `data` array to store: assignments, then retained entries.
    pub fn to_stored(&self) -> AppResult<Vec<Value>> {
        let mut entries = self
            .assignments
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| {
                AppError::Internal(format!("failed to encode system access data: {error}"))
            })?;
        entries.extend(self.retained.iter().cloned());

        Ok(entries)
    }

    /// Returns the assignment for a capability.
    #[must_use]
    pub fn assignment(&self, capability: Capability) -> Option<&AccessAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.capability == capability)
    }

    /// Returns whether the identity is listed under the capability.
    #[must_use]
    pub fn grants(&self, identity: &UserIdentity, capability: Capability) -> bool {
        self.assignment(capability)
            .is_some_and(|assignment| assignment.lists(identity))
    }

    /// Replaces the member list of one capability. The replaced assignment
    /// moves to the end; the others keep their order.
    pub fn replace_assignment(&mut self, capability: Capability, members: Vec<AccessMember>) {
        self.assignments
            .retain(|assignment| assignment.capability != capability);
        self.assignments.push(AccessAssignment {
            capability,
            members,
        });
    }
}

/// Static allow-list of administrator emails that bypass assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    /// Creates an allow-list; emails are trimmed and compared case-insensitively.
    #[must_use]
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|email| email.as_ref().trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();

        Self { emails }
    }

    /// Parses a comma-separated list, as found in configuration.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(','))
    }

    /// Returns whether the email is allow-listed.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.emails.iter().any(|listed| listed == &email)
    }

    /// Returns the number of listed administrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Returns whether no administrator is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

use std::fmt::{Display, Formatter};

use backoffice_core::{AppError, AppResult};

/// Location of a binary object: `<category>/<owner-id>/<filename>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    category: String,
    owner_id: String,
    file_name: String,
}

impl ObjectPath {
    /// Category holding user profile photos.
    pub const USER_AVATAR: &'static str = "user_avatar";

    /// Creates a validated object path. Segments may not contain `/`.
    pub fn new(
        category: impl Into<String>,
        owner_id: impl Into<String>,
        file_name: impl Into<String>,
    ) -> AppResult<Self> {
        let category = validated_segment("category", category.into())?;
        let owner_id = validated_segment("owner id", owner_id.into())?;
        let file_name = validated_segment("file name", file_name.into())?;

        Ok(Self {
            category,
            owner_id,
            file_name,
        })
    }

    /// Returns the `<category>/<owner-id>` folder of a category and owner.
    #[must_use]
    pub fn folder(category: &str, owner_id: &str) -> String {
        format!("{category}/{owner_id}")
    }

    /// Returns the folder this object lives in.
    #[must_use]
    pub fn prefix(&self) -> String {
        Self::folder(self.category.as_str(), self.owner_id.as_str())
    }

    /// Returns the file name segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Returns the extension of the file name, when it has one.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        extension_of(self.file_name.as_str())
    }
}

impl Display for ObjectPath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}/{}/{}",
            self.category, self.owner_id, self.file_name
        )
    }
}

/// Returns the text after the last `.` of a file name.
#[must_use]
fn extension_of(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension)
        .filter(|extension| !extension.is_empty())
}

fn validated_segment(label: &str, value: String) -> AppResult<String> {
    if value.trim().is_empty() || value.contains('/') {
        return Err(AppError::Validation(format!(
            "object path {label} must be a non-empty segment without '/'"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::ObjectPath;

    #[test]
    fn formats_category_owner_and_file() {
        let path = ObjectPath::new(ObjectPath::USER_AVATAR, "u-1", "AB12.png");
        let Ok(path) = path else {
            panic!("valid path");
        };

        assert_eq!(path.to_string(), "user_avatar/u-1/AB12.png");
        assert_eq!(path.prefix(), "user_avatar/u-1");
        assert_eq!(path.extension(), Some("png"));
    }

    #[test]
    fn rejects_nested_segments() {
        assert!(ObjectPath::new("user_avatar", "u-1/x", "a.png").is_err());
    }
}

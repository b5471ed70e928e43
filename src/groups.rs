//! Group planning: derives the ordered list of group names for a course.

use crate::error::SetupError;
use crate::jenkins::job::is_url_safe_name;

/// Validated prefix shared by all group names of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNamePrefix(String);

impl GroupNamePrefix {
    /// Validates a group name prefix.
    ///
    /// Group names double as repository and job names, which are spliced
    /// into URLs unescaped, so the prefix must be URL-safe.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidNamePrefix`] when the prefix is empty or
    /// contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(prefix: impl AsRef<str>) -> Result<Self, SetupError> {
        let prefix = prefix.as_ref();
        if !is_url_safe_name(prefix) {
            return Err(SetupError::InvalidNamePrefix {
                prefix: prefix.to_owned(),
            });
        }
        Ok(Self(prefix.to_owned()))
    }

    /// Borrows the prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Number of groups to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCount(u32);

impl GroupCount {
    /// Validates the group count.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidGroupCount`] when the count is zero.
    pub const fn new(count: u32) -> Result<Self, SetupError> {
        if count == 0 {
            return Err(SetupError::InvalidGroupCount { value: count });
        }
        Ok(Self(count))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Name of one course group, used for its repository and build job alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName(String);

impl GroupName {
    /// Borrows the group name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Derives the ordered, 1-based group names `{prefix}-{n}`.
#[must_use]
pub fn plan_group_names(prefix: &GroupNamePrefix, count: GroupCount) -> Vec<GroupName> {
    (1..=count.get())
        .map(|number| GroupName(format!("{}-{number}", prefix.as_str())))
        .collect()
}

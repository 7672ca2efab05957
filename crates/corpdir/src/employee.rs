//! Employee records.
//!
//! The serialized form uses the camelCase field names of the stored directory
//! snapshot. Optional fields that are absent or blank are "not displayed".

use serde::{Deserialize, Serialize};

/// A single directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Stable identifier, assigned at creation.
    pub id: String,
    /// Display name. Never blank.
    pub name: String,
    /// Work telephone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    /// Extension for the work telephone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    /// Fax number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Mobile phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<String>,
    /// Home phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_phone: Option<String>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Branch or office.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Embedded photo as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// The fields of an employee before an id is assigned, as entered in the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEmployee {
    /// Display name (required).
    pub name: String,
    /// Work telephone.
    pub telephone: Option<String>,
    /// Extension for the work telephone.
    pub ext: Option<String>,
    /// Fax number.
    pub fax: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Mobile phone.
    pub cell_phone: Option<String>,
    /// Home phone.
    pub home_phone: Option<String>,
    /// Job title.
    pub job_title: Option<String>,
    /// Branch or office.
    pub branch: Option<String>,
    /// Embedded photo as a data URI.
    pub photo: Option<String>,
}

/// A phone entry as shown on a directory card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneLine<'a> {
    /// Work telephone with its optional extension.
    Work {
        /// The number.
        number: &'a str,
        /// Extension, if any.
        ext: Option<&'a str>,
    },
    /// Mobile phone.
    Cell(&'a str),
    /// Home phone.
    Home(&'a str),
}

impl std::fmt::Display for PhoneLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work { number, ext: None } => write!(f, "{number}"),
            Self::Work {
                number,
                ext: Some(ext),
            } => write!(f, "{number} (ext. {ext})"),
            Self::Cell(number) => write!(f, "Cell: {number}"),
            Self::Home(number) => write!(f, "Home: {number}"),
        }
    }
}

/// Treat blank strings as absent.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl Employee {
    /// Build a record from form fields and an assigned id.
    #[must_use]
    pub fn from_new(id: String, new: NewEmployee) -> Self {
        Self {
            id,
            name: new.name,
            telephone: new.telephone,
            ext: new.ext,
            fax: new.fax,
            email: new.email,
            cell_phone: new.cell_phone,
            home_phone: new.home_phone,
            job_title: new.job_title,
            branch: new.branch,
            photo: new.photo,
        }
    }

    /// The branch, if set and not blank.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        present(self.branch.as_ref())
    }

    /// The job title, if set and not blank.
    #[must_use]
    pub fn job_title(&self) -> Option<&str> {
        present(self.job_title.as_ref())
    }

    /// The email address, if set and not blank.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        present(self.email.as_ref())
    }

    /// Whether a photo is attached.
    #[must_use]
    pub fn has_photo(&self) -> bool {
        present(self.photo.as_ref()).is_some()
    }

    /// Phone entries to display, in card order. Fax is never displayed.
    #[must_use]
    pub fn phone_lines(&self) -> Vec<PhoneLine<'_>> {
        let mut lines = Vec::new();
        if let Some(number) = present(self.telephone.as_ref()) {
            lines.push(PhoneLine::Work {
                number,
                ext: present(self.ext.as_ref()),
            });
        }
        if let Some(number) = present(self.cell_phone.as_ref()) {
            lines.push(PhoneLine::Cell(number));
        }
        if let Some(number) = present(self.home_phone.as_ref()) {
            lines.push(PhoneLine::Home(number));
        }
        lines
    }
}

impl NewEmployee {
    /// Create form input with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Trim the name and drop blank optional fields.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            telephone: clean(self.telephone),
            ext: clean(self.ext),
            fax: clean(self.fax),
            email: clean(self.email),
            cell_phone: clean(self.cell_phone),
            home_phone: clean(self.home_phone),
            job_title: clean(self.job_title),
            branch: clean(self.branch),
            photo: clean(self.photo),
        }
    }

    /// Whether the required name is present.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str) -> Employee {
        Employee::from_new(id.to_string(), NewEmployee::named(name))
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let mut emp = employee("emp-0", "Alice Smith");
        emp.cell_phone = Some("555-0100".to_string());
        emp.job_title = Some("Buyer".to_string());

        let json = serde_json::to_value(&emp).unwrap();
        assert_eq!(json["cellPhone"], "555-0100");
        assert_eq!(json["jobTitle"], "Buyer");
        assert!(json.get("homePhone").is_none());
        assert!(json.get("photo").is_none());
    }

    #[test]
    fn test_deserializes_stored_record_with_blank_fields() {
        let json = r#"{"id":"emp-3","name":"Bob Lee","telephone":"","ext":"","branch":"LA"}"#;
        let emp: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(emp.id, "emp-3");
        assert_eq!(emp.branch(), Some("LA"));
        assert!(emp.phone_lines().is_empty());
        assert!(emp.email.is_none());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let json = r#"{"id":"emp-3"}"#;
        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_phone_lines_order_and_format() {
        let mut emp = employee("emp-1", "Carl Jones");
        emp.telephone = Some("555-0101".to_string());
        emp.ext = Some("204".to_string());
        emp.cell_phone = Some("555-0102".to_string());
        emp.home_phone = Some("555-0103".to_string());
        emp.fax = Some("555-0104".to_string());

        let lines: Vec<String> = emp.phone_lines().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec!["555-0101 (ext. 204)", "Cell: 555-0102", "Home: 555-0103"]
        );
    }

    #[test]
    fn test_extension_without_telephone_is_hidden() {
        let mut emp = employee("emp-1", "Dana Park");
        emp.ext = Some("12".to_string());
        assert!(emp.phone_lines().is_empty());
    }

    #[test]
    fn test_normalized_trims_and_drops_blanks() {
        let new = NewEmployee {
            name: "  Erin Wu ".to_string(),
            email: Some("   ".to_string()),
            branch: Some(" NY ".to_string()),
            ..NewEmployee::default()
        }
        .normalized();

        assert_eq!(new.name, "Erin Wu");
        assert!(new.email.is_none());
        assert_eq!(new.branch.as_deref(), Some("NY"));
    }

    #[test]
    fn test_has_name() {
        assert!(NewEmployee::named("Fay").has_name());
        assert!(!NewEmployee::named(" \t").has_name());
    }

    #[test]
    fn test_has_photo() {
        let mut emp = employee("emp-2", "Gus");
        assert!(!emp.has_photo());
        emp.photo = Some(String::new());
        assert!(!emp.has_photo());
        emp.photo = Some("data:image/png;base64,AAAA".to_string());
        assert!(emp.has_photo());
    }
}

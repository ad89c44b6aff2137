//! Customer form values and field editing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Customer gender.
pub enum Gender {
    /// Male.
    #[default]
    Male,
    /// Female.
    Female,
    /// Other.
    Other,
    /// Not disclosed.
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Follow-up priority.
pub enum Priority {
    /// Low.
    Low,
    /// Medium.
    #[default]
    Medium,
    /// High.
    High,
    /// Urgent.
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Kind of contact.
pub enum CustomerType {
    /// Student.
    #[default]
    Student,
    /// Parent or guardian.
    Parent,
    /// Teacher.
    Teacher,
    /// Staff member.
    Staff,
}

macro_rules! choice_tokens {
    ($ty:ty { $($variant:ident => ($token:literal, $label:literal)),+ $(,)? }) => {
        impl $ty {
            /// Select options as `(token, label)` pairs.
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($token, $label)),+];

            /// Wire token.
            pub fn token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }

            /// Parses a wire token.
            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

choice_tokens!(Gender {
    Male => ("MALE", "Male"),
    Female => ("FEMALE", "Female"),
    Other => ("OTHER", "Other"),
    PreferNotToSay => ("PREFER_NOT_TO_SAY", "Prefer not to say"),
});

choice_tokens!(Priority {
    Low => ("LOW", "Low"),
    Medium => ("MEDIUM", "Medium"),
    High => ("HIGH", "High"),
    Urgent => ("URGENT", "Urgent"),
});

choice_tokens!(CustomerType {
    Student => ("STUDENT", "Student"),
    Parent => ("PARENT", "Parent"),
    Teacher => ("TEACHER", "Teacher"),
    Staff => ("STAFF", "Staff"),
});

/// Department options. An empty token means not selected.
pub const DEPARTMENT_OPTIONS: &[(&str, &str)] = &[
    ("", "Select department"),
    ("ACADEMIC", "Academic"),
    ("FINANCE", "Finance"),
];

/// Lead source options.
pub const SOURCE_OPTIONS: &[(&str, &str)] = &[
    ("", "Select source"),
    ("FACEBOOK", "Facebook"),
    ("INSTAGRAM", "Instagram"),
    ("WEBSITE", "Website"),
    ("REFERRAL", "Referral"),
    ("OTHER", "Other"),
];

/// Enquiry purpose options.
pub const PURPOSE_OPTIONS: &[(&str, &str)] = &[
    ("", "Select purpose"),
    ("ENROLLMENT", "Enrollment"),
    ("INFORMATION", "Information"),
    ("COURSE", "Course"),
    ("OTHER", "Other"),
];

/// Default assignee for new contacts.
pub const DEFAULT_REFERRED_TO: &str = "OWNER";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// One editable custom field row.
pub struct MetadataPair {
    /// Field name; rows with a blank name are ignored.
    pub key: String,
    /// Field value.
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Editable fields addressed by the form view.
pub enum CustomerField {
    /// Full name.
    Name,
    /// Phone number.
    Phone,
    /// Secondary mobile number.
    Mobile,
    /// Gender token.
    Gender,
    /// Enquiry purpose token.
    Purpose,
    /// Lead source token.
    Source,
    /// Department token.
    Department,
    /// Priority token.
    Priority,
    /// Customer type token.
    CustomerType,
    /// Assignee.
    ReferredTo,
    /// Free-form remark.
    Remark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Customer form snapshot. This is both the draft payload and the submitted value.
pub struct CustomerFormData {
    /// Record id when editing an existing customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Secondary mobile number.
    pub mobile: String,
    /// Gender.
    pub gender: Gender,
    /// Enquiry purpose token.
    pub purpose: String,
    /// Lead source token.
    pub source: String,
    /// Department token.
    pub department: String,
    /// Follow-up priority.
    pub priority: Priority,
    /// Contact kind.
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    /// Assignee.
    pub referred_to: String,
    /// Free-form remark.
    pub remark: String,
    /// School the record belongs to, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<u64>,
    /// Owning user, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    /// Custom fields built from `metadata_pairs`.
    pub metadata: BTreeMap<String, String>,
    /// Custom field rows as edited, including incomplete ones.
    pub metadata_pairs: Vec<MetadataPair>,
}

impl Default for CustomerFormData {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            phone: String::new(),
            mobile: String::new(),
            gender: Gender::default(),
            purpose: String::new(),
            source: String::new(),
            department: String::new(),
            priority: Priority::default(),
            customer_type: CustomerType::default(),
            referred_to: DEFAULT_REFERRED_TO.to_string(),
            remark: String::new(),
            school_id: None,
            owner_id: None,
            metadata: BTreeMap::new(),
            metadata_pairs: Vec::new(),
        }
    }
}

impl CustomerFormData {
    /// Prepares caller-supplied values for editing: custom field rows are rebuilt from the
    /// metadata map when none were supplied.
    pub fn for_editing(mut self) -> Self {
        if self.metadata_pairs.is_empty() {
            self.metadata_pairs = self
                .metadata
                .iter()
                .map(|(key, value)| MetadataPair {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect();
        }
        self
    }

    /// Current text of `field`.
    pub fn field(&self, field: CustomerField) -> String {
        match field {
            CustomerField::Name => self.name.clone(),
            CustomerField::Phone => self.phone.clone(),
            CustomerField::Mobile => self.mobile.clone(),
            CustomerField::Gender => self.gender.token().to_string(),
            CustomerField::Purpose => self.purpose.clone(),
            CustomerField::Source => self.source.clone(),
            CustomerField::Department => self.department.clone(),
            CustomerField::Priority => self.priority.token().to_string(),
            CustomerField::CustomerType => self.customer_type.token().to_string(),
            CustomerField::ReferredTo => self.referred_to.clone(),
            CustomerField::Remark => self.remark.clone(),
        }
    }

    /// Sets `field` from its text form. Unknown choice tokens leave the field unchanged.
    pub fn set_field(&mut self, field: CustomerField, value: &str) {
        match field {
            CustomerField::Name => self.name = value.to_string(),
            CustomerField::Phone => self.phone = value.to_string(),
            CustomerField::Mobile => self.mobile = value.to_string(),
            CustomerField::Gender => {
                if let Some(gender) = Gender::from_token(value) {
                    self.gender = gender;
                }
            }
            CustomerField::Purpose => self.purpose = value.to_string(),
            CustomerField::Source => self.source = value.to_string(),
            CustomerField::Department => self.department = value.to_string(),
            CustomerField::Priority => {
                if let Some(priority) = Priority::from_token(value) {
                    self.priority = priority;
                }
            }
            CustomerField::CustomerType => {
                if let Some(customer_type) = CustomerType::from_token(value) {
                    self.customer_type = customer_type;
                }
            }
            CustomerField::ReferredTo => self.referred_to = value.to_string(),
            CustomerField::Remark => self.remark = value.to_string(),
        }
    }

    /// Appends an empty custom field row.
    pub fn add_metadata_pair(&mut self) {
        self.metadata_pairs.push(MetadataPair::default());
        self.rebuild_metadata();
    }

    /// Removes the custom field row at `index`, if present.
    pub fn remove_metadata_pair(&mut self, index: usize) {
        if index < self.metadata_pairs.len() {
            self.metadata_pairs.remove(index);
            self.rebuild_metadata();
        }
    }

    /// Updates the key and/or value of the row at `index`.
    pub fn update_metadata_pair(&mut self, index: usize, key: Option<&str>, value: Option<&str>) {
        let Some(pair) = self.metadata_pairs.get_mut(index) else {
            return;
        };
        if let Some(key) = key {
            pair.key = key.to_string();
        }
        if let Some(value) = value {
            pair.value = value.to_string();
        }
        self.rebuild_metadata();
    }

    /// Rebuilds the metadata map from rows with a non-blank trimmed key. Later rows win.
    pub fn rebuild_metadata(&mut self) {
        self.metadata = self
            .metadata_pairs
            .iter()
            .filter(|pair| !pair.key.trim().is_empty())
            .map(|pair| (pair.key.trim().to_string(), pair.value.clone()))
            .collect();
    }
}

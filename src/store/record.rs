/// One supplier's extracted contact data
///
/// Optional fields are `None` when the page has no element for them, which is
/// distinct from `Some("")` (element present, no text).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Supplier name; unique key in the record store
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_telephone: Option<String>,
    pub contact_email: Option<String>,
    pub description: Option<String>,
}

impl Record {
    /// Creates a record with only the name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_contact_name(mut self, value: impl Into<String>) -> Self {
        self.contact_name = Some(value.into());
        self
    }

    pub fn with_telephone(mut self, value: impl Into<String>) -> Self {
        self.contact_telephone = Some(value.into());
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.contact_email = Some(value.into());
        self
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    /// Cell values in export column order; `None` renders as a blank cell
    pub fn columns(&self) -> [Option<&str>; 5] {
        [
            Some(self.name.as_str()),
            self.contact_name.as_deref(),
            self.contact_telephone.as_deref(),
            self.contact_email.as_deref(),
            self.description.as_deref(),
        ]
    }
}

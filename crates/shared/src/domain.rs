use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(SubmissionId);
id_newtype!(AdminId);

/// The four fields every contact submission carries, in validation order.
pub const CONTACT_FIELDS: [&str; 4] = ["name", "email", "service", "message"];

/// Services offered in the contact form's select box.
pub const SERVICE_OPTIONS: [&str; 4] = [
    "Custom Website Development",
    "Legal-Tech Solutions",
    "Maintenance & Updates",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFilter {
    All,
    Read,
    Unread,
}

impl ReadFilter {
    pub fn from_flag(is_read: Option<bool>) -> Self {
        match is_read {
            None => Self::All,
            Some(true) => Self::Read,
            Some(false) => Self::Unread,
        }
    }
}

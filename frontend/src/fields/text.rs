use super::FieldManifest;

/// A free-text parameter with the default passthrough behavior.
pub struct TextField {
    pub key: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
}

pub static CONTENT_NAME: TextField = TextField {
    key: "content_name",
    label: "Content Name",
    description: Some("Name of the page or product associated with the event."),
};

pub static CONTENT_CATEGORY: TextField = TextField {
    key: "content_category",
    label: "Content Category",
    description: Some("Category of the page or product associated with the event."),
};

pub static EVENT_ID: TextField = TextField {
    key: "event_id",
    label: "Event ID",
    description: Some(
        "Identifier that distinguishes between similar events sent through \
         Meta Pixel and the Conversions API.",
    ),
};

impl FieldManifest for TextField {
    fn key(&self) -> &str {
        self.key
    }

    fn label(&self) -> &str {
        self.label
    }

    fn description(&self) -> Option<&str> {
        self.description
    }
}

/// Stand-in for a key without a manifest entry; the key doubles as label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughField {
    key: String,
}

impl PassthroughField {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl FieldManifest for PassthroughField {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.key
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An issue category attached to a logged interaction.
///
/// The ten known categories map to fixed display names. Labels outside that
/// set are kept as [`Tag::Custom`] and display as themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Billing,
    Technical,
    Account,
    Feature,
    Ui,
    Performance,
    Integration,
    Documentation,
    Training,
    Other,
    Custom(String),
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Billing => "billing",
            Tag::Technical => "technical",
            Tag::Account => "account",
            Tag::Feature => "feature",
            Tag::Ui => "ui",
            Tag::Performance => "performance",
            Tag::Integration => "integration",
            Tag::Documentation => "documentation",
            Tag::Training => "training",
            Tag::Other => "other",
            Tag::Custom(label) => label,
        }
    }

    /// Parse a label. Never fails: unknown labels become `Custom`.
    pub fn parse(label: &str) -> Self {
        match label {
            "billing" => Tag::Billing,
            "technical" => Tag::Technical,
            "account" => Tag::Account,
            "feature" => Tag::Feature,
            "ui" => Tag::Ui,
            "performance" => Tag::Performance,
            "integration" => Tag::Integration,
            "documentation" => Tag::Documentation,
            "training" => Tag::Training,
            "other" => Tag::Other,
            _ => Tag::Custom(label.to_string()),
        }
    }

    /// The fixed categories, in form order.
    pub fn all() -> Vec<Tag> {
        vec![
            Tag::Billing,
            Tag::Technical,
            Tag::Account,
            Tag::Feature,
            Tag::Ui,
            Tag::Performance,
            Tag::Integration,
            Tag::Documentation,
            Tag::Training,
            Tag::Other,
        ]
    }

    pub fn display_name(&self) -> &str {
        match self {
            Tag::Billing => "Billing Issues",
            Tag::Technical => "Technical Problems",
            Tag::Account => "Account Access",
            Tag::Feature => "Feature Request",
            Tag::Ui => "User Interface",
            Tag::Performance => "Performance",
            Tag::Integration => "Integration",
            Tag::Documentation => "Documentation",
            Tag::Training => "Training/Support",
            Tag::Other => "Other",
            Tag::Custom(label) => label,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Tag::Custom(_))
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Tag::parse(&label))
    }
}

/// How the customer got in touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionType {
    #[default]
    Phone,
    Email,
    Chat,
    Meeting,
    Social,
    Other,
}

impl InteractionType {
    pub fn all() -> Vec<InteractionType> {
        vec![
            InteractionType::Phone,
            InteractionType::Email,
            InteractionType::Chat,
            InteractionType::Meeting,
            InteractionType::Social,
            InteractionType::Other,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InteractionType::Phone => "Phone Call",
            InteractionType::Email => "Email",
            InteractionType::Chat => "Live Chat",
            InteractionType::Meeting => "Meeting",
            InteractionType::Social => "Social Media",
            InteractionType::Other => "Other",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

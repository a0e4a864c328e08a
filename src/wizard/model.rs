//! Step schemas and field specs for the setup flows.

use serde::{Deserialize, Serialize};

/// Which marketplace role the wizard is collecting a profile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Client,
    Developer,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Developer => write!(f, "developer"),
        }
    }
}

/// Value shape of a wizard field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text or a single selected option.
    Text,
    /// Multi-select list of strings.
    List,
    /// Boolean toggle.
    Flag,
}

/// One canonical field of a step, with an optional UI-facing alias key.
///
/// The canonical name is what the persistence collaborator expects
/// (snake_case); the alias is the UI-convenient spelling (camelCase)
/// accepted as a fallback on input.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub canonical: String,
    pub alias: Option<String>,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            alias: None,
            kind: FieldKind::Text,
        }
    }

    pub fn list(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            alias: None,
            kind: FieldKind::List,
        }
    }

    pub fn flag(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            alias: None,
            kind: FieldKind::Flag,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Raw per-step form data as entered in the UI.
///
/// Keys may use either the canonical or the alias spelling; values are
/// whatever the UI produced. Replaced wholesale on every step update.
pub type StepPayload = serde_json::Map<String, serde_json::Value>;

/// Declarative description of one wizard step.
#[derive(Debug, Clone)]
pub struct StepSchema {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl StepSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// A step with no fields (e.g. a review page).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Personal-info step shared by both setup flows.
pub fn personal_info_schema() -> StepSchema {
    StepSchema::new("personal")
        .field(FieldSpec::text("name").with_alias("fullName"))
        .field(FieldSpec::text("phone").with_alias("phoneNumber"))
        .field(FieldSpec::text("location").with_alias("currentLocation"))
        .field(FieldSpec::text("bio").with_alias("occupation"))
        .field(FieldSpec::text("preferred_contact").with_alias("preferredContact"))
}

/// Build-preferences step; developers get the extra matching fields.
pub fn preferences_schema(user_type: UserType) -> StepSchema {
    let schema = StepSchema::new("preferences")
        .field(FieldSpec::list("project_types").with_alias("projectTypes"))
        .field(FieldSpec::list("preferred_cities").with_alias("preferredCities"))
        .field(FieldSpec::text("budget_range").with_alias("budgetRange"));

    match user_type {
        UserType::Client => schema,
        UserType::Developer => schema
            .field(FieldSpec::text("working_style").with_alias("workingStyle"))
            .field(FieldSpec::text("availability"))
            .field(FieldSpec::list("specializations")),
    }
}

/// Final review step — no fields, just confirmation.
pub fn review_schema() -> StepSchema {
    StepSchema::new("review")
}

/// The three-step client setup flow.
pub fn client_setup_steps() -> Vec<StepSchema> {
    vec![
        personal_info_schema(),
        preferences_schema(UserType::Client),
        review_schema(),
    ]
}

/// The three-step developer setup flow.
pub fn developer_setup_steps() -> Vec<StepSchema> {
    vec![
        personal_info_schema(),
        preferences_schema(UserType::Developer),
        review_schema(),
    ]
}

/// Option lists offered by the setup UI.
pub mod options {
    pub const PROJECT_TYPES: &[&str] = &[
        "Residential Villas",
        "Apartment Complexes",
        "Commercial Buildings",
        "Mixed-Use Developments",
        "Industrial Projects",
        "Renovation Projects",
        "Luxury Developments",
        "Affordable Housing",
    ];

    pub const CITIES: &[&str] = &[
        "Lagos",
        "Abuja",
        "Port Harcourt",
        "Kano",
        "Ibadan",
        "Benin City",
        "Enugu",
        "Kaduna",
    ];

    pub const BUDGET_RANGES: &[&str] = &[
        "under-50m",
        "50m-100m",
        "100m-500m",
        "500m-1b",
        "over-1b",
        "flexible",
    ];

    pub const WORKING_STYLES: &[&str] = &[
        "Hands-on project management",
        "Design and build",
        "Consultation only",
        "Partnership with local teams",
        "Full-service development",
    ];

    pub const AVAILABILITY: &[&str] = &[
        "immediate",
        "1-month",
        "3-months",
        "6-months",
        "planning-only",
    ];

    pub const SPECIALIZATIONS: &[&str] = &[
        "Sustainable Building",
        "Smart Home Technology",
        "Traditional Architecture",
        "Modern Design",
        "Project Management",
        "Cost Optimization",
        "Fast Construction",
        "High-end Finishes",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_flow_has_three_steps() {
        let steps = client_setup_steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].name, "personal");
        assert_eq!(steps[1].name, "preferences");
        assert_eq!(steps[2].name, "review");
        assert!(steps[2].is_empty());
    }

    #[test]
    fn developer_preferences_extend_client_preferences() {
        let client = preferences_schema(UserType::Client);
        let developer = preferences_schema(UserType::Developer);
        assert_eq!(client.fields.len(), 3);
        assert_eq!(developer.fields.len(), 6);

        let dev_names: Vec<&str> = developer
            .fields
            .iter()
            .map(|f| f.canonical.as_str())
            .collect();
        for spec in &client.fields {
            assert!(dev_names.contains(&spec.canonical.as_str()));
        }
        assert!(dev_names.contains(&"working_style"));
        assert!(dev_names.contains(&"availability"));
        assert!(dev_names.contains(&"specializations"));
    }

    #[test]
    fn personal_fields_map_ui_aliases() {
        let schema = personal_info_schema();
        let bio = schema
            .fields
            .iter()
            .find(|f| f.canonical == "bio")
            .unwrap();
        assert_eq!(bio.alias.as_deref(), Some("occupation"));
        assert_eq!(bio.kind, FieldKind::Text);
    }

    #[test]
    fn user_type_display_matches_serde() {
        for ut in [UserType::Client, UserType::Developer] {
            let display = format!("{ut}");
            let json = serde_json::to_string(&ut).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}

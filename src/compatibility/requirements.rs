use indexmap::IndexMap;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequirementField {
    /// Grouping taken from the `Category|Name` key, if any.
    pub category: Option<String>,

    pub name: String,
    pub value: String,
}

impl RequirementField {
    pub fn from_entry(key: &str, value: &serde_json::Value) -> Self {
        let (category, name) = match key.split_once('|') {
            Some((category, name)) => (Some(category.trim().to_owned()), name.trim().to_owned()),
            None => (None, key.trim().to_owned()),
        };
        let value = match value {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        Self { category, name, value }
    }
}

/// Technical requirements of one service, in dataset order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TechnicalRequirements(pub Vec<RequirementField>);

impl TechnicalRequirements {
    pub fn from_fields(fields: &IndexMap<String, serde_json::Value>) -> Self {
        Self(fields.iter().map(|(key, value)| RequirementField::from_entry(key, value)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequirementField> {
        self.0.iter()
    }

    /// Look up a field by its name, ignoring the category and the case.
    pub fn get(&self, name: &str) -> Option<&RequirementField> {
        self.0.iter().find(|field| field.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_entry_with_category() {
        let field = RequirementField::from_entry("Technical|Minimum capacity", &json!("1 MW"));
        assert_eq!(field.category.as_deref(), Some("Technical"));
        assert_eq!(field.name, "Minimum capacity");
        assert_eq!(field.value, "1 MW");
    }

    #[test]
    fn test_from_entry_non_string() {
        let field = RequirementField::from_entry("Response time", &json!(1.5));
        assert_eq!(field.category, None);
        assert_eq!(field.value, "1.5");
    }

    #[test]
    fn test_get_ignores_case() {
        let fields: IndexMap<String, serde_json::Value> = [
            ("Commercial|Contract length".to_owned(), json!("1 day")),
            ("Technical|Response time".to_owned(), json!("1 second")),
        ]
        .into_iter()
        .collect();
        let requirements = TechnicalRequirements::from_fields(&fields);
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements.get("response TIME").unwrap().value, "1 second");
        assert_eq!(requirements.iter().next().unwrap().name, "Contract length");
    }
}

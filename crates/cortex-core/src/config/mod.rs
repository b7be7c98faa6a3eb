use serde_json::{Value, json};
use std::sync::OnceLock;

static DEFAULT_SITE_CONFIG: OnceLock<SheetConfig> = OnceLock::new();

/// Renderer settings, stored as a JSON object so host overrides can be merged in as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig(Value);

impl Default for SheetConfig {
    fn default() -> Self {
        Self::default_site_config()
    }
}

impl SheetConfig {
    pub const DEFAULT_FENCE: &'static str = "cortex";
    pub const DEFAULT_ERROR_PREFIX: &'static str = "Error parsing cortex stat block";

    /// Built-in defaults. Overrides go through [`SheetConfig::deep_merge`].
    pub fn default_site_config() -> Self {
        DEFAULT_SITE_CONFIG
            .get_or_init(|| {
                Self(json!({
                    "fence": Self::DEFAULT_FENCE,
                    "errorPrefix": Self::DEFAULT_ERROR_PREFIX,
                    "dice": {
                        "ratingSize": "medium",
                        "inlineSize": "small",
                    },
                }))
            })
            .clone()
    }

    /// Looks up a string by dotted key, e.g. `dice.ratingSize`.
    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        dotted_path
            .split('.')
            .try_fold(&self.0, |node, key| node.get(key))
            .and_then(Value::as_str)
    }

    /// Info string of the fenced code block (also the opening fence suffix).
    pub fn fence(&self) -> &str {
        self.get_str("fence").unwrap_or(Self::DEFAULT_FENCE)
    }

    pub fn error_prefix(&self) -> &str {
        self.get_str("errorPrefix")
            .unwrap_or(Self::DEFAULT_ERROR_PREFIX)
    }

    /// Objects merge key by key; any other override value replaces what it lands on.
    pub fn deep_merge(&mut self, overrides: &Value) {
        merge_into(&mut self.0, overrides);
    }
}

fn merge_into(target: &mut Value, overrides: &Value) {
    if let (Some(fields), Some(incoming)) = (target.as_object_mut(), overrides.as_object()) {
        for (key, value) in incoming {
            match fields.get_mut(key) {
                Some(slot) => merge_into(slot, value),
                None => {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *target = overrides.clone();
}

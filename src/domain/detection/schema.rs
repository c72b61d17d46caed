use serde_json::json;

/// Returns the JSON schema for AI ingredient interpretation responses
pub fn get_ingredient_interpretation_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "confidence": { "type": "number" },
                        "reasoning": { "type": "string" }
                    },
                    "required": ["name", "confidence"]
                }
            }
        },
        "required": ["ingredients"]
    })
}

/// Returns the JSON schema for label normalization fallback responses
pub fn get_normalization_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "canonical_name": { "type": "string" }
        },
        "required": ["canonical_name"]
    })
}

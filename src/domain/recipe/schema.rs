use serde_json::json;

/// Returns the JSON schema for recipe generation LLM responses
pub fn get_recipes_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "recipes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "recipe_name": { "type": "string" },
                        "cuisine_type": { "type": "string" },
                        "dish_type": { "type": "string" },
                        "preparation_time": { "type": "string" },
                        "cooking_time": { "type": "string" },
                        "serving_size": { "type": "string" },
                        "ingredients": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "quantity": { "type": "string" },
                                    "notes": { "type": "string" }
                                },
                                "required": ["name", "quantity"]
                            }
                        },
                        "instructions": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "cooking_method": { "type": "string" },
                        "chefs_tip": { "type": "string" },
                        "difficulty": { "type": "string" }
                    },
                    "required": [
                        "recipe_name", "ingredients", "instructions", "cooking_method"
                    ]
                }
            }
        },
        "required": ["recipes"]
    })
}

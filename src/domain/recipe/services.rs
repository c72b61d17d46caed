use std::future::Future;
use std::time::Instant;

use futures::StreamExt;
use tracing::{info, instrument, warn};

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::common::generate_random_string;
use crate::domain::common::ports::LlmClient;
use crate::domain::common::services::Service;

use super::entities::{GenerationAttempt, GenerationStrategy, Recipe, RecipeCategory, RecipeIngredient};
use super::parser::{self, ParsedRecipe};
use super::ports::RecipeAgentClient;
use super::prompts;
use super::schema::get_recipes_schema;
use super::templates;
use super::validation::validate_recipe;
use super::value_objects::{RecipeSynthesis, SynthesizeRecipesInput};

const RECIPE_QUOTA: usize = 3;
const EXCERPT_LEN: usize = 200;

pub trait RecipeService: Send + Sync {
    /// Synthesizes exactly three validated recipes for the given
    /// ingredients. Strategies are tried in order (agent, direct model,
    /// deterministic templates) until the quota is filled; the deterministic
    /// stage cannot fail, so the only caller-visible error is an empty
    /// ingredient list.
    fn synthesize_recipes(
        &self,
        input: SynthesizeRecipesInput,
    ) -> impl Future<Output = Result<RecipeSynthesis, CoreError>> + Send;
}

impl<V, L, A, F, M, O> RecipeService for Service<V, L, A, F, M, O>
where
    V: Send + Sync,
    L: LlmClient,
    A: RecipeAgentClient,
    F: Send + Sync,
    M: Send + Sync,
    O: Send + Sync,
{
    #[instrument(skip(self, input), fields(ingredient_count = input.ingredients.len(), servings = input.servings))]
    async fn synthesize_recipes(
        &self,
        input: SynthesizeRecipesInput,
    ) -> Result<RecipeSynthesis, CoreError> {
        if input.ingredients.is_empty() {
            return Err(CoreError::Invalid(
                "cannot synthesize recipes without ingredients".to_string(),
            ));
        }

        let names: Vec<String> = input
            .ingredients
            .iter()
            .map(|i| i.label.clone())
            .collect();

        let mut recipes: Vec<Recipe> = Vec::new();
        let mut attempts: Vec<GenerationAttempt> = Vec::new();
        let mut winning: Option<GenerationStrategy> = None;

        for strategy in [
            GenerationStrategy::Agent,
            GenerationStrategy::Direct,
            GenerationStrategy::Deterministic,
        ] {
            let started = Instant::now();
            let outcome = match strategy {
                GenerationStrategy::Agent => self.generate_via_agent(&names, &input).await,
                GenerationStrategy::Direct => self.generate_via_direct(&names, &input).await,
                GenerationStrategy::Deterministic => Ok((
                    String::new(),
                    templates::deterministic_recipes(
                        &names,
                        input.servings,
                        &input.preferences,
                    ),
                )),
            };
            let latency_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok((raw, candidates)) => {
                    let parsed_count = candidates.len();
                    let before = recipes.len();

                    for mut recipe in candidates {
                        if recipes.len() >= RECIPE_QUOTA {
                            break;
                        }
                        recipe.nutrition = input.nutrition.clone();
                        if validate_recipe(&recipe, &names) {
                            recipes.push(recipe);
                        }
                    }

                    let contributed = recipes.len() - before;
                    if contributed > 0 && winning.is_none() {
                        winning = Some(strategy);
                    }

                    info!(
                        ?strategy,
                        parsed_count,
                        contributed,
                        latency_ms,
                        "generation attempt finished"
                    );
                    attempts.push(GenerationAttempt {
                        strategy,
                        success: contributed > 0,
                        latency_ms,
                        response_excerpt: excerpt(&raw),
                        parsed_count,
                    });
                }
                Err(err) => {
                    warn!(?strategy, latency_ms, "generation attempt failed: {err}");
                    attempts.push(GenerationAttempt {
                        strategy,
                        success: false,
                        latency_ms,
                        response_excerpt: String::new(),
                        parsed_count: 0,
                    });
                }
            }

            if recipes.len() >= RECIPE_QUOTA {
                break;
            }
        }

        recipes.truncate(RECIPE_QUOTA);
        Ok(RecipeSynthesis {
            recipes,
            strategy: winning.unwrap_or(GenerationStrategy::Deterministic),
            attempts,
        })
    }
}

impl<V, L, A, F, M, O> Service<V, L, A, F, M, O>
where
    L: LlmClient,
    A: RecipeAgentClient,
{
    async fn generate_via_agent(
        &self,
        names: &[String],
        input: &SynthesizeRecipesInput,
    ) -> Result<(String, Vec<Recipe>), CoreError> {
        let handle = self.agent_client.resolve_agent().await?;
        let session_id = format!("recipe-session-{}", generate_random_string(8));
        let prompt = prompts::agent_prompt(names, input.servings, &input.preferences);

        let mut stream = self
            .agent_client
            .invoke(handle, session_id, prompt)
            .await?;

        let mut raw = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            raw.push_str(&String::from_utf8_lossy(&chunk));
        }

        let parsed = parser::parse_response(&raw).map_err(|err| {
            CoreError::ExternalServiceError(format!("agent response unparseable: {err}"))
        })?;

        Ok((raw, materialize(parsed, names, input, true)))
    }

    async fn generate_via_direct(
        &self,
        names: &[String],
        input: &SynthesizeRecipesInput,
    ) -> Result<(String, Vec<Recipe>), CoreError> {
        let prompt = match input.preferences.recipe_category.effective() {
            RecipeCategory::Smoothie => {
                prompts::smoothie_prompt(names, input.servings, &input.preferences)
            }
            RecipeCategory::Dessert => {
                prompts::dessert_prompt(names, input.servings, &input.preferences)
            }
            _ => prompts::cooking_prompt(names, input.servings, &input.preferences),
        };

        let raw = self
            .llm_client
            .generate_with_text(prompt, get_recipes_schema())
            .await?;

        let parsed = parser::parse_response(&raw).map_err(|err| {
            CoreError::ExternalServiceError(format!("model response unparseable: {err}"))
        })?;

        Ok((raw, materialize(parsed, names, input, true)))
    }
}

/// Turns parsed recipes into domain recipes, filling gaps with request
/// context. Recipes that arrive without an ingredient list get the supplied
/// ingredients attached.
fn materialize(
    parsed: Vec<ParsedRecipe>,
    names: &[String],
    input: &SynthesizeRecipesInput,
    ai_generated: bool,
) -> Vec<Recipe> {
    let prefs = &input.preferences;

    parsed
        .into_iter()
        .map(|p| {
            let mut recipe = Recipe::new(
                p.title,
                input.servings,
                prefs.recipe_category.effective(),
                ai_generated,
            );
            recipe.estimated_time = p.estimated_time;
            recipe.difficulty = p
                .difficulty
                .unwrap_or_else(|| prefs.skill_level.display_name().to_string());
            recipe.cuisine = p
                .cuisine
                .unwrap_or_else(|| prefs.cuisine.display_name().to_string());
            recipe.meal_type = prefs.meal_type.display_name().to_string();
            recipe.cooking_method = p.cooking_method;
            recipe.ingredients = if p.ingredients.is_empty() {
                names
                    .iter()
                    .map(|name| RecipeIngredient {
                        name: name.clone(),
                        quantity: "100g".to_string(),
                        notes: "prepared as needed".to_string(),
                    })
                    .collect()
            } else {
                p.ingredients
            };
            recipe.steps = p.steps;
            recipe.tags = p.tags;
            recipe.description = p
                .description
                .unwrap_or_else(|| format!("A {} dish", recipe.cuisine));
            recipe
        })
        .collect()
}

fn excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use futures::stream::BoxStream;

    use crate::domain::nutrition::entities::{NutrientProfile, NutritionFacts};
    use crate::domain::nutrition::value_objects::PortionedIngredient;
    use crate::domain::recipe::entities::Cuisine;
    use crate::domain::recipe::ports::AgentHandle;
    use crate::domain::recipe::value_objects::RecipePreferences;

    use super::*;

    struct FakeAgent {
        response: Option<String>,
    }

    impl RecipeAgentClient for FakeAgent {
        async fn resolve_agent(&self) -> Result<AgentHandle, CoreError> {
            match &self.response {
                Some(_) => Ok(AgentHandle {
                    agent_id: "agent-1".into(),
                    alias: "live".into(),
                }),
                None => Err(CoreError::ExternalServiceError("agent unavailable".into())),
            }
        }

        async fn invoke(
            &self,
            _handle: AgentHandle,
            _session_id: String,
            _input: String,
        ) -> Result<BoxStream<'static, Result<Bytes, CoreError>>, CoreError> {
            let response = self
                .response
                .clone()
                .ok_or_else(|| CoreError::ExternalServiceError("agent unavailable".into()))?;

            // stream the response in two chunks, like the real transport
            let mid = response.len() / 2;
            let chunks = vec![
                Ok(Bytes::from(response[..mid].to_string())),
                Ok(Bytes::from(response[mid..].to_string())),
            ];
            Ok(futures::stream::iter(chunks).boxed())
        }
    }

    struct FakeLlm {
        response: Option<String>,
    }

    impl LlmClient for FakeLlm {
        async fn generate_with_image(
            &self,
            _prompt: String,
            _image: Vec<u8>,
            _schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            Err(CoreError::InternalServerError)
        }

        async fn generate_with_text(
            &self,
            _prompt: String,
            _schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            self.response
                .clone()
                .ok_or_else(|| CoreError::ExternalServiceError("model unavailable".into()))
        }
    }

    fn three_recipe_json(prefix: &str) -> String {
        let recipes: Vec<String> = (1..=3)
            .map(|i| {
                format!(
                    r#"{{"recipe_name":"{prefix} Paneer Dish {i}","cooking_method":"sautéed",
                        "ingredients":[{{"name":"paneer","quantity":"200g"}}],
                        "instructions":["Cook the paneer","Season and serve"]}}"#
                )
            })
            .collect();
        format!(r#"{{"recipes":[{}]}}"#, recipes.join(","))
    }

    fn input() -> SynthesizeRecipesInput {
        SynthesizeRecipesInput {
            ingredients: vec![PortionedIngredient {
                label: "paneer".into(),
                fdc_id: "1234".into(),
                grams: 200.0,
            }],
            servings: 2,
            preferences: RecipePreferences {
                cuisine: Cuisine::Indian,
                ..Default::default()
            },
            nutrition: None,
        }
    }

    fn service(
        agent: FakeAgent,
        llm: FakeLlm,
    ) -> Service<(), FakeLlm, FakeAgent, (), (), ()> {
        Service::new((), llm, agent, (), (), ())
    }

    #[tokio::test]
    async fn empty_ingredients_are_rejected() {
        let svc = service(FakeAgent { response: None }, FakeLlm { response: None });
        let mut empty = input();
        empty.ingredients.clear();

        assert!(matches!(
            svc.synthesize_recipes(empty).await,
            Err(CoreError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn agent_success_needs_no_fallback() {
        let svc = service(
            FakeAgent {
                response: Some(three_recipe_json("Agent")),
            },
            FakeLlm { response: None },
        );

        let synthesis = svc.synthesize_recipes(input()).await.unwrap();

        assert_eq!(synthesis.recipes.len(), 3);
        assert_eq!(synthesis.strategy, GenerationStrategy::Agent);
        assert_eq!(synthesis.attempts.len(), 1);
        assert!(synthesis.attempts[0].success);
        assert!(synthesis.recipes.iter().all(|r| r.ai_generated));
    }

    #[tokio::test]
    async fn agent_failure_falls_back_to_the_direct_model() {
        let svc = service(
            FakeAgent { response: None },
            FakeLlm {
                response: Some(three_recipe_json("Direct")),
            },
        );

        let synthesis = svc.synthesize_recipes(input()).await.unwrap();

        assert_eq!(synthesis.recipes.len(), 3);
        assert_eq!(synthesis.strategy, GenerationStrategy::Direct);
        assert_eq!(synthesis.attempts.len(), 2);
        assert!(!synthesis.attempts[0].success);
        assert!(synthesis.attempts[1].success);
    }

    #[tokio::test]
    async fn total_outage_still_yields_three_recipes() {
        let svc = service(FakeAgent { response: None }, FakeLlm { response: None });

        let synthesis = svc.synthesize_recipes(input()).await.unwrap();

        assert_eq!(synthesis.recipes.len(), 3);
        assert_eq!(synthesis.strategy, GenerationStrategy::Deterministic);
        assert_eq!(synthesis.attempts.len(), 3);
        assert!(synthesis.recipes.iter().all(|r| !r.ai_generated));
    }

    #[tokio::test]
    async fn rejected_recipes_are_topped_up_by_later_strategies() {
        // one valid recipe, one placeholder title, one without steps
        let partial = r#"{"recipes":[
            {"recipe_name":"Paneer Bhurji","ingredients":[{"name":"paneer","quantity":"200g"}],
             "instructions":["Crumble and cook the paneer"]},
            {"recipe_name":"AI Recipe 2","ingredients":[{"name":"paneer","quantity":"100g"}],
             "instructions":["Do something"]},
            {"recipe_name":"Paneer Surprise","ingredients":[{"name":"paneer","quantity":"100g"}],
             "instructions":[]}
        ]}"#;

        let svc = service(
            FakeAgent {
                response: Some(partial.to_string()),
            },
            FakeLlm { response: None },
        );

        let synthesis = svc.synthesize_recipes(input()).await.unwrap();

        assert_eq!(synthesis.recipes.len(), 3);
        assert_eq!(synthesis.recipes[0].title, "Paneer Bhurji");
        assert_eq!(synthesis.strategy, GenerationStrategy::Agent);
        assert_eq!(synthesis.attempts.len(), 3);
        // deterministic filled the remaining slots
        assert!(!synthesis.recipes[2].ai_generated);
    }

    #[tokio::test]
    async fn unparseable_agent_output_counts_as_a_failed_attempt() {
        let svc = service(
            FakeAgent {
                response: Some("I am sorry, I cannot produce recipes today.".to_string()),
            },
            FakeLlm {
                response: Some(three_recipe_json("Direct")),
            },
        );

        let synthesis = svc.synthesize_recipes(input()).await.unwrap();

        assert_eq!(synthesis.strategy, GenerationStrategy::Direct);
        assert!(!synthesis.attempts[0].success);
    }

    #[tokio::test]
    async fn nutrition_context_is_attached_to_every_recipe() {
        let svc = service(
            FakeAgent {
                response: Some(three_recipe_json("Agent")),
            },
            FakeLlm { response: None },
        );

        let mut input = input();
        input.nutrition = Some(NutritionFacts {
            totals_per_recipe: NutrientProfile {
                kcal: 530.0,
                ..Default::default()
            },
            per_serving: NutrientProfile {
                kcal: 265.0,
                ..Default::default()
            },
            estimated: false,
        });

        let synthesis = svc.synthesize_recipes(input).await.unwrap();
        assert!(synthesis
            .recipes
            .iter()
            .all(|r| r.nutrition.as_ref().map(|n| n.per_serving.kcal) == Some(265.0)));
    }
}

use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod ports;
pub mod services;

#[derive(Clone, Debug)]
pub struct AyeAyeConfig {
    pub vision: VisionConfig,
    pub llm: LlmConfig,
    pub agent: AgentConfig,
    pub food_data: FoodDataConfig,
    pub object_storage: ObjectStorageConfig,
}

#[derive(Clone, Debug)]
pub struct VisionConfig {
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
}

#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub endpoint: String,
    pub agent_id: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct FoodDataConfig {
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct ObjectStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub use_ssl: bool,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub mod usda_client;

pub use usda_client::UsdaFoodDataClient;

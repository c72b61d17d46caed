/// Aggregate of all injected service clients.
///
/// Every domain service trait is implemented on this struct, so one value
/// wired with real (or fake) clients serves a whole request.
pub struct Service<V, L, A, F, M, O> {
    pub vision_client: V,
    pub llm_client: L,
    pub agent_client: A,
    pub food_data_client: F,
    pub mapping_cache: M,
    pub object_storage: O,
}

impl<V, L, A, F, M, O> Service<V, L, A, F, M, O> {
    pub fn new(
        vision_client: V,
        llm_client: L,
        agent_client: A,
        food_data_client: F,
        mapping_cache: M,
        object_storage: O,
    ) -> Self {
        Self {
            vision_client,
            llm_client,
            agent_client,
            food_data_client,
            mapping_cache,
            object_storage,
        }
    }
}

pub mod history;
pub mod profile;
pub mod routes;
pub mod saved;

#[cfg(test)]
pub(crate) fn test_api(seed: u64) -> crate::api::DynAPI {
    let (_, engine) = crate::engine::test_engine(seed);

    std::sync::Arc::new(engine)
}

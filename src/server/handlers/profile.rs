use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::ImpactSummary;
use crate::error::Error;

pub async fn summary(Extension(api): Extension<DynAPI>) -> Result<Json<ImpactSummary>, Error> {
    let summary = api.profile_summary().await?;

    Ok(summary.into())
}

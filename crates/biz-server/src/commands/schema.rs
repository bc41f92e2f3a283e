use std::collections::BTreeMap;

use biz_core::responses::{
    AgentRequest, AgentResponse, ErrorResponse, HealthResponse, ReportResponse, UploadResponse,
};
use schemars::schema_for;

use crate::output::output;

/// Handle `autobiz schema`: JSON Schemas of every HTTP body, keyed by type.
pub fn handle() -> anyhow::Result<()> {
    output(&schemas())
}

fn schemas() -> BTreeMap<&'static str, schemars::Schema> {
    BTreeMap::from([
        ("UploadResponse", schema_for!(UploadResponse)),
        ("ReportResponse", schema_for!(ReportResponse)),
        ("AgentRequest", schema_for!(AgentRequest)),
        ("AgentResponse", schema_for!(AgentResponse)),
        ("HealthResponse", schema_for!(HealthResponse)),
        ("ErrorResponse", schema_for!(ErrorResponse)),
    ])
}

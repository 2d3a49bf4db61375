use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Viewer-request event as delivered to a CloudFront function.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct ViewerRequestEvent {
    pub request: EdgeRequest,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The request object. Only `headers` is interpreted; every other field is
/// kept verbatim so it can be handed back to the CDN unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub(crate) struct EdgeRequest {
    #[serde(default)]
    pub headers: BTreeMap<String, EdgeValue>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct EdgeValue {
    pub value: String,
}

impl EdgeRequest {
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(
            name.to_string(),
            EdgeValue {
                value: value.into(),
            },
        );
    }
}

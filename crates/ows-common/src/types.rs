//! OWS Common request objects.

use ows_core::{FromParams, Params, SchemaError, Version};

/// The envelope every operation request shares: service, operation name,
/// version or the negotiable accepted versions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseRequest {
    pub service: Option<String>,
    pub request: String,
    pub version: Option<Version>,
    pub accept_versions: Vec<Version>,
}

impl FromParams for BaseRequest {
    fn from_params(mut params: Params) -> Result<Self, SchemaError> {
        Ok(Self {
            service: params.take("service")?.into_opt_string()?,
            request: params.take("request")?.into_string()?,
            version: params.take("version")?.into_opt_version()?,
            accept_versions: params.take("accept_versions")?.into_version_list()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetCapabilitiesRequest {
    pub service: Option<String>,
    pub update_sequence: Option<String>,
    pub sections: Vec<String>,
    pub accept_versions: Vec<String>,
    pub accept_languages: Vec<String>,
    pub accept_formats: Vec<String>,
}

impl FromParams for GetCapabilitiesRequest {
    fn from_params(mut params: Params) -> Result<Self, SchemaError> {
        Ok(Self {
            service: params.take("service")?.into_opt_string()?,
            update_sequence: params.take("update_sequence")?.into_opt_string()?,
            sections: params.take("sections")?.into_string_list()?,
            accept_versions: params.take("accept_versions")?.into_string_list()?,
            accept_languages: params.take("accept_languages")?.into_string_list()?,
            accept_formats: params.take("accept_formats")?.into_string_list()?,
        })
    }
}

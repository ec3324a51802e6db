//! OWS Common request types and their decoding schemas.

mod decoders;
mod types;

pub use decoders::{
    kvp_decode_base_request, kvp_decode_get_capabilities, xml_decode_base_request,
    xml_decode_get_capabilities, RequestError, NS_OWS,
};
pub use types::{BaseRequest, GetCapabilitiesRequest};

//! Decoding schemas for the OWS Common requests, one per backend.

use std::sync::LazyLock;

use ows_core::{convert, Decoder, Error, Field, Schema, SchemaError, Value};
use ows_kvp::{Key, KvpParams};
use ows_xml::{Namespace, NamespaceMap, Path, XmlInput, XmlParseError};
use thiserror::Error;

use crate::types::{BaseRequest, GetCapabilitiesRequest};

pub const NS_OWS: &str = "http://www.opengis.net/ows/2.0";

/// Anything a request decode entry point can fail with.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Xml(#[from] XmlParseError),
    #[error(transparent)]
    Decode(#[from] ows_core::DecodeError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<Error> for RequestError {
    fn from(err: Error) -> Self {
        match err {
            Error::Decode(err) => RequestError::Decode(err),
            Error::Schema(err) => RequestError::Schema(err),
        }
    }
}

fn empty_list() -> Value {
    Value::List(Vec::new())
}

// ------------------------------------------------------------------------
// BaseRequest
// ------------------------------------------------------------------------

static KVP_BASE_REQUEST: LazyLock<Schema<Key>> = LazyLock::new(|| {
    Schema::new(vec![
        (
            "service",
            ows_kvp::param("service")
                .converter(convert::upper())
                .optional()
                .into(),
        ),
        (
            "version",
            ows_kvp::param("version")
                .converter(convert::version())
                .optional()
                .into(),
        ),
        ("request", ows_kvp::param("request").into()),
        (
            "accept_versions",
            ows_kvp::param("acceptversions")
                .converter(convert::typelist(convert::version(), ","))
                .optional()
                .default_factory(empty_list)
                .into(),
        ),
    ])
    .expect("base request KVP schema is valid")
});

static XML_BASE_REQUEST: LazyLock<Schema<Path>> =
    LazyLock::new(|| build_xml_base_request().expect("base request XML schema is valid"));

fn build_xml_base_request() -> Result<Schema<Path>, SchemaError> {
    // the base request is decoded before the service is known, so element
    // matching goes through local names instead of a fixed namespace
    let ns = NamespaceMap::default();
    Schema::new(vec![
        (
            "service",
            ows_xml::param("@service", &ns)?
                .converter(convert::upper())
                .optional()
                .into(),
        ),
        (
            "version",
            ows_xml::param("@version", &ns)?
                .converter(convert::version())
                .optional()
                .into(),
        ),
        ("request", ows_xml::param("local-name()", &ns)?.into()),
        (
            "accept_versions",
            ows_xml::param(
                "*[local-name()='AcceptVersions']/*[local-name()='Version']/text()",
                &ns,
            )?
            .converter(convert::version())
            .any()
            .default_factory(empty_list)
            .into(),
        ),
    ])
}

pub fn kvp_decode_base_request(query: &str) -> Result<BaseRequest, RequestError> {
    let decoder = Decoder::new(&KVP_BASE_REQUEST, KvpParams::parse(query));
    Ok(decoder.decode_into()?)
}

pub fn xml_decode_base_request(document: &str) -> Result<BaseRequest, RequestError> {
    let input = XmlInput::parse(document)?;
    let decoder = Decoder::new(&XML_BASE_REQUEST, input);
    Ok(decoder.decode_into()?)
}

// ------------------------------------------------------------------------
// GetCapabilities
// ------------------------------------------------------------------------

static KVP_GET_CAPABILITIES: LazyLock<Schema<Key>> = LazyLock::new(|| {
    let list_of = |inner| convert::typelist(inner, ",");
    Schema::new(vec![
        (
            "service",
            ows_kvp::param("service")
                .converter(convert::upper())
                .optional()
                .into(),
        ),
        (
            "update_sequence",
            ows_kvp::param("updatesequence").optional().into(),
        ),
        (
            "sections",
            ows_kvp::param("sections")
                .converter(list_of(convert::lower()))
                .optional()
                .default_factory(empty_list)
                .into(),
        ),
        (
            "accept_versions",
            ows_kvp::param("acceptversions")
                .converter(list_of(convert::string()))
                .optional()
                .default_factory(empty_list)
                .into(),
        ),
        (
            "accept_languages",
            ows_kvp::param("acceptlanguages")
                .converter(list_of(convert::string()))
                .optional()
                .default_factory(empty_list)
                .into(),
        ),
        (
            "accept_formats",
            ows_kvp::param("acceptformats")
                .converter(list_of(convert::string()))
                .optional()
                .default_factory(empty_list)
                .into(),
        ),
    ])
    .expect("GetCapabilities KVP schema is valid")
});

static XML_GET_CAPABILITIES: LazyLock<Schema<Path>> =
    LazyLock::new(|| build_xml_get_capabilities().expect("GetCapabilities XML schema is valid"));

fn build_xml_get_capabilities() -> Result<Schema<Path>, SchemaError> {
    let ns = NamespaceMap::new(vec![Namespace::new("ows", NS_OWS)]);
    let list = |expr: &str, ns: &NamespaceMap| -> Result<Field<Path>, SchemaError> {
        Ok(ows_xml::param(expr, ns)?
            .any()
            .default_factory(empty_list)
            .into())
    };
    Schema::new(vec![
        (
            "service",
            ows_xml::param("@service", &ns)?
                .converter(convert::upper())
                .optional()
                .into(),
        ),
        (
            "update_sequence",
            ows_xml::param("@updateSequence", &ns)?
                .optional()
                .locator("updatesequence")
                .into(),
        ),
        ("sections", list("ows:Sections/ows:Section/text()", &ns)?),
        (
            "accept_versions",
            list("ows:AcceptVersions/ows:Version/text()", &ns)?,
        ),
        (
            "accept_languages",
            list("ows:AcceptLanguages/ows:Language/text()", &ns)?,
        ),
        (
            "accept_formats",
            list("ows:AcceptFormats/ows:OutputFormat/text()", &ns)?,
        ),
    ])
}

pub fn kvp_decode_get_capabilities(query: &str) -> Result<GetCapabilitiesRequest, RequestError> {
    let decoder = Decoder::new(&KVP_GET_CAPABILITIES, KvpParams::parse(query));
    Ok(decoder.decode_into()?)
}

pub fn xml_decode_get_capabilities(document: &str) -> Result<GetCapabilitiesRequest, RequestError> {
    let input = XmlInput::parse(document)?;
    let decoder = Decoder::new(&XML_GET_CAPABILITIES, input);
    Ok(decoder.decode_into()?)
}

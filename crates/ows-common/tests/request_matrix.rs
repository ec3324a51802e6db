use ows_common::{
    kvp_decode_base_request, kvp_decode_get_capabilities, xml_decode_base_request,
    xml_decode_get_capabilities, BaseRequest, GetCapabilitiesRequest, RequestError,
};
use ows_core::{DecodeError, Expected, Version};

#[test]
fn kvp_base_request() {
    assert_eq!(
        kvp_decode_base_request("service=WZS&version=3.0&request=GetFoo&bar=baz").unwrap(),
        BaseRequest {
            service: Some("WZS".to_string()),
            request: "GetFoo".to_string(),
            version: Some(Version::new(3, 0)),
            accept_versions: vec![],
        }
    );

    assert_eq!(
        kvp_decode_base_request("service=WZS&request=GetCapabilities&acceptversions=3.0,4.0")
            .unwrap(),
        BaseRequest {
            service: Some("WZS".to_string()),
            request: "GetCapabilities".to_string(),
            version: None,
            accept_versions: vec![Version::new(3, 0), Version::new(4, 0)],
        }
    );
}

#[test]
fn xml_base_request() {
    let request = xml_decode_base_request(
        r#"<wzs:GetFoo service="WZS" version="3.0"
            xmlns:wzs="http://www.opengis.net/wzs/2.0">
          <wzs:bar>baz</wzs:bar>
        </wzs:GetFoo>"#,
    )
    .unwrap();
    assert_eq!(
        request,
        BaseRequest {
            service: Some("WZS".to_string()),
            request: "GetFoo".to_string(),
            version: Some(Version::new(3, 0)),
            accept_versions: vec![],
        }
    );

    let request = xml_decode_base_request(
        r#"<wzs:GetCapabilities service="WZS"
            xmlns:wzs="http://www.opengis.net/wzs/2.0"
            xmlns:ows="http://www.opengis.net/ows/2.0">
          <ows:AcceptVersions>
            <ows:Version>3.0</ows:Version>
            <ows:Version>4.0</ows:Version>
          </ows:AcceptVersions>
        </wzs:GetCapabilities>"#,
    )
    .unwrap();
    assert_eq!(
        request,
        BaseRequest {
            service: Some("WZS".to_string()),
            request: "GetCapabilities".to_string(),
            version: None,
            accept_versions: vec![Version::new(3, 0), Version::new(4, 0)],
        }
    );
}

#[test]
fn missing_required_parameter_carries_its_selector_as_locator() {
    let err = kvp_decode_base_request("service=WZS&version=3.0").unwrap_err();
    match err {
        RequestError::Decode(err) => {
            assert_eq!(
                err,
                DecodeError::MissingParameter {
                    locator: "request".to_string()
                }
            );
            assert_eq!(err.code(), "MissingParameterValue");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn repeated_scalar_parameter_is_a_multiplicity_error() {
    let err =
        kvp_decode_base_request("service=WZS&request=GetFoo&version=3.0&version=4.0").unwrap_err();
    match err {
        RequestError::Decode(err) => assert_eq!(
            err,
            DecodeError::WrongMultiplicity {
                locator: "version".to_string(),
                expected: Expected::AtMostOne,
                count: 2,
            }
        ),
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn invalid_version_value_is_wrapped_with_the_field_locator() {
    let err = kvp_decode_base_request("service=WZS&request=GetFoo&version=three").unwrap_err();
    match err {
        RequestError::Decode(err) => {
            assert_eq!(err.code(), "InvalidParameterValue");
            assert_eq!(err.locator(), "version");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn list_item_failure_surfaces_the_list_field_locator() {
    let err =
        kvp_decode_base_request("service=WZS&request=GetFoo&acceptversions=3.0,nope").unwrap_err();
    match err {
        RequestError::Decode(err) => {
            assert_eq!(err.code(), "InvalidParameterValue");
            assert_eq!(err.locator(), "acceptversions");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn kvp_get_capabilities() {
    let request = kvp_decode_get_capabilities(
        "service=wcs&request=GetCapabilities&acceptversions=2.0.1,2.0.0\
         &sections=ServiceIdentification,Contents&updatesequence=5",
    )
    .unwrap();
    assert_eq!(
        request,
        GetCapabilitiesRequest {
            service: Some("WCS".to_string()),
            update_sequence: Some("5".to_string()),
            sections: vec![
                "serviceidentification".to_string(),
                "contents".to_string()
            ],
            accept_versions: vec!["2.0.1".to_string(), "2.0.0".to_string()],
            accept_languages: vec![],
            accept_formats: vec![],
        }
    );
}

#[test]
fn xml_get_capabilities() {
    let request = xml_decode_get_capabilities(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <wcs:GetCapabilities service="WCS" updateSequence="5"
            xmlns:wcs="http://www.opengis.net/wcs/2.0"
            xmlns:ows="http://www.opengis.net/ows/2.0">
          <ows:AcceptVersions>
            <ows:Version>2.0.1</ows:Version>
          </ows:AcceptVersions>
          <ows:Sections>
            <ows:Section>Contents</ows:Section>
          </ows:Sections>
          <ows:AcceptFormats>
            <ows:OutputFormat>text/xml</ows:OutputFormat>
          </ows:AcceptFormats>
        </wcs:GetCapabilities>"#,
    )
    .unwrap();
    assert_eq!(
        request,
        GetCapabilitiesRequest {
            service: Some("WCS".to_string()),
            update_sequence: Some("5".to_string()),
            sections: vec!["Contents".to_string()],
            accept_versions: vec!["2.0.1".to_string()],
            accept_languages: vec![],
            accept_formats: vec!["text/xml".to_string()],
        }
    );
}

#[test]
fn malformed_xml_is_a_parse_error_not_a_decode_error() {
    let err = xml_decode_base_request("<unclosed").unwrap_err();
    assert!(matches!(err, RequestError::Xml(_)));
}

fn render_base_request(request: &BaseRequest) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    if let Some(service) = &request.service {
        serializer.append_pair("service", service);
    }
    if let Some(version) = &request.version {
        serializer.append_pair("version", &version.to_string());
    }
    serializer.append_pair("request", &request.request);
    if !request.accept_versions.is_empty() {
        let versions = request
            .accept_versions
            .iter()
            .map(Version::to_string)
            .collect::<Vec<_>>()
            .join(",");
        serializer.append_pair("acceptversions", &versions);
    }
    serializer.finish()
}

#[test]
fn render_decode_round_trip() {
    let requests = [
        BaseRequest {
            service: Some("WZS".to_string()),
            request: "GetFoo".to_string(),
            version: Some(Version::with_patch(2, 0, 1)),
            accept_versions: vec![],
        },
        BaseRequest {
            service: Some("WZS".to_string()),
            request: "GetCapabilities".to_string(),
            version: None,
            accept_versions: vec![Version::new(3, 0), Version::new(4, 0)],
        },
    ];
    for request in requests {
        let decoded = kvp_decode_base_request(&render_base_request(&request)).unwrap();
        assert_eq!(decoded, request);
    }
}

#[test]
fn decoding_is_idempotent_across_calls() {
    let query = "service=WZS&request=GetCapabilities";
    let first = kvp_decode_base_request(query).unwrap();
    let second = kvp_decode_base_request(query).unwrap();
    assert_eq!(first, second);
    // the empty default list is produced fresh each call
    assert_eq!(first.accept_versions, Vec::<Version>::new());
}

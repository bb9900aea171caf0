use utoipa::OpenApi;

use crate::filter::FilterSet;
use crate::record::{AnalyzedRecord, StringProperties};
use crate::server::error::{ApiErrorBody, ApiErrorResponse};
use crate::server::strings::{
    CreateStringRequest, InterpretedQuery, NaturalLanguageResponse, StringListResponse,
};
use crate::server::ServiceInfo;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stringlens API",
        version = "0.1.0",
        description = "Analyse, store and query strings by their derived properties"
    ),
    paths(
        crate::server::index,
        crate::server::strings::create_string,
        crate::server::strings::get_string,
        crate::server::strings::list_strings,
        crate::server::strings::filter_by_natural_language,
        crate::server::strings::delete_string,
    ),
    components(schemas(
        // Error
        ApiErrorResponse,
        ApiErrorBody,
        // Records
        AnalyzedRecord,
        StringProperties,
        CreateStringRequest,
        // Filtering
        FilterSet,
        StringListResponse,
        InterpretedQuery,
        NaturalLanguageResponse,
        // System
        ServiceInfo,
    )),
    tags(
        (name = "strings", description = "String analysis, storage and filtering"),
        (name = "system", description = "Service metadata"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/strings",
            "/strings/{value}",
            "/strings/filter-by-natural-language",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn serialises_to_json() {
        let spec = ApiDoc::openapi().to_pretty_json().expect("serialize spec");
        assert!(spec.contains("\"Stringlens API\""));
        assert!(spec.contains("FilterSet"));
    }
}

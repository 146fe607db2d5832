#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, PathItemType, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components should be generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        let components = openapi.components.as_ref().unwrap();
        for schema in ["ErrorResponse", "HealthResponse", "UserDto", "ExerciseDto", "ExerciseLogDto"] {
            assert!(components.schemas.contains_key(schema), "missing schema {}", schema);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_only_carries_error() {
        assert_eq!(object_properties("ErrorResponse"), vec!["error".to_string()]);
    }

    #[test]
    fn test_dtos_expose_underscore_id() {
        assert!(object_properties("UserDto").contains(&"_id".to_string()));
        let log = object_properties("ExerciseLogDto");
        for field in ["username", "count", "_id", "log"] {
            assert!(log.contains(&field.to_string()), "ExerciseLogDto missing {}", field);
        }
    }

    #[test]
    fn test_openapi_paths() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let health = paths.get("/health").expect("/health documented");
        assert!(health.operations.contains_key(&PathItemType::Get));

        let users = paths.get("/api/users").expect("/api/users documented");
        assert!(users.operations.contains_key(&PathItemType::Get));
        assert!(users.operations.contains_key(&PathItemType::Post));

        let exercises = paths
            .get("/api/users/{_id}/exercises")
            .expect("exercises path documented");
        let add = exercises.operations.get(&PathItemType::Post).unwrap();
        for status in ["200", "400", "404", "500"] {
            assert!(add.responses.responses.contains_key(status), "missing {} response", status);
        }

        let logs = paths.get("/api/users/{_id}/logs").expect("logs path documented");
        assert!(logs.operations.contains_key(&PathItemType::Get));
    }

    #[test]
    fn test_error_responses_reference_schema_by_name() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(openapi_json.contains("#/components/schemas/ErrorResponse"));
    }
}

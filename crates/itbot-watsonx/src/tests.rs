//! Snapshot tests for watsonx configuration

#[cfg(test)]
mod snapshot_tests {
    use crate::{Error, WatsonxConfig};
    use insta::assert_yaml_snapshot;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_snapshot() {
        let config = WatsonxConfig {
            api_key: "test_api_key_redacted".to_string(),
            project_id: "test_project_id".to_string(),
            iam_url: "iam.cloud.ibm.com".to_string(),
            api_url: "https://us-south.ml.cloud.ibm.com".to_string(),
        };

        assert_yaml_snapshot!(config, @r###"
        api_key: test_api_key_redacted
        project_id: test_project_id
        iam_url: iam.cloud.ibm.com
        api_url: "https://us-south.ml.cloud.ibm.com"
        "###);
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = WatsonxConfig::from_lookup(lookup_from(&[
            ("WATSONX_API_KEY", "key"),
            ("WATSONX_PROJECT_ID", "project"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.project_id, "project");
        assert_eq!(config.iam_url, "iam.cloud.ibm.com");
        assert_eq!(config.api_url, "https://us-south.ml.cloud.ibm.com");
    }

    #[test]
    fn test_config_from_lookup_fallback_names() {
        let config = WatsonxConfig::from_lookup(lookup_from(&[
            ("API_KEY", "fallback-key"),
            ("PROJECT_ID", "fallback-project"),
            ("WATSONX_API_URL", "https://eu-de.ml.cloud.ibm.com/"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "fallback-key");
        assert_eq!(config.project_id, "fallback-project");
        assert_eq!(config.api_url, "https://eu-de.ml.cloud.ibm.com");
    }

    #[test]
    fn test_config_missing_credentials() {
        let err = WatsonxConfig::from_lookup(lookup_from(&[("WATSONX_PROJECT_ID", "p")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = WatsonxConfig::from_lookup(lookup_from(&[("WATSONX_API_KEY", "k")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}

//! Architectural layer assignment.
//!
//! Every known type id maps to an integer layer expressing its position in
//! the diagram: traffic enters at layer 0 and settles into data and
//! operations layers on the right. Unknown types land in the compute layer so
//! they sort with the bulk of the workload.

/// Layer assigned to type ids the table does not know.
pub const DEFAULT_LAYER: i32 = 5;

/// `(normalized type id, layer)` table. Normalization strips `-`/`_` and
/// lowercases, matching the resolver's query normalization.
static LAYERS: &[(&str, i32)] = &[
    // 0: actors and edge ingress
    ("user", 0),
    ("users", 0),
    ("client", 0),
    ("mobileclient", 0),
    ("cloudfront", 0),
    ("cdn", 0),
    ("route53", 0),
    ("dns", 0),
    ("waf", 0),
    ("shield", 0),
    // 2: network fabric
    ("vpc", 2),
    ("vnet", 2),
    ("internetgateway", 2),
    ("natgateway", 2),
    ("transitgateway", 2),
    ("directconnect", 2),
    ("firewall", 2),
    // 3: subnets
    ("subnet", 3),
    ("publicsubnet", 3),
    ("privatesubnet", 3),
    // 4: application entry
    ("apigateway", 4),
    ("appsync", 4),
    ("alb", 4),
    ("nlb", 4),
    ("elb", 4),
    ("loadbalancer", 4),
    ("applicationgateway", 4),
    ("frontdoor", 4),
    // 5: compute
    ("ec2", 5),
    ("lambda", 5),
    ("ecs", 5),
    ("eks", 5),
    ("fargate", 5),
    ("batch", 5),
    ("lightsail", 5),
    ("elasticbeanstalk", 5),
    ("autoscaling", 5),
    ("server", 5),
    ("function", 5),
    ("vm", 5),
    ("aks", 5),
    ("functionapp", 5),
    ("appservice", 5),
    ("computeengine", 5),
    ("gke", 5),
    ("cloudfunctions", 5),
    ("cloudrun", 5),
    ("appengine", 5),
    // 6: integration
    ("sqs", 6),
    ("sns", 6),
    ("queue", 6),
    ("eventbridge", 6),
    ("stepfunctions", 6),
    ("mq", 6),
    ("servicebus", 6),
    ("eventgrid", 6),
    ("logicapps", 6),
    ("pubsub", 6),
    // 7: data
    ("rds", 7),
    ("aurora", 7),
    ("dynamodb", 7),
    ("database", 7),
    ("db", 7),
    ("elasticache", 7),
    ("redis", 7),
    ("memcached", 7),
    ("cache", 7),
    ("documentdb", 7),
    ("neptune", 7),
    ("timestream", 7),
    ("s3", 7),
    ("storage", 7),
    ("efs", 7),
    ("ebs", 7),
    ("glacier", 7),
    ("backup", 7),
    ("storagegateway", 7),
    ("sqldatabase", 7),
    ("cosmosdb", 7),
    ("blobstorage", 7),
    ("cloudsql", 7),
    ("firestore", 7),
    ("bigtable", 7),
    ("spanner", 7),
    ("gcs", 7),
    // 8: analytics and ml
    ("athena", 8),
    ("emr", 8),
    ("glue", 8),
    ("kinesis", 8),
    ("kinesisfirehose", 8),
    ("kafka", 8),
    ("redshift", 8),
    ("quicksight", 8),
    ("elasticsearch", 8),
    ("sagemaker", 8),
    ("bedrock", 8),
    ("comprehend", 8),
    ("rekognition", 8),
    ("bigquery", 8),
    ("dataflow", 8),
    ("dataproc", 8),
    ("databricks", 8),
    ("eventhub", 8),
    // 9: security and operations
    ("iam", 9),
    ("kms", 9),
    ("cognito", 9),
    ("secretsmanager", 9),
    ("acm", 9),
    ("guardduty", 9),
    ("cloudwatch", 9),
    ("cloudtrail", 9),
    ("cloudformation", 9),
    ("config", 9),
    ("systemsmanager", 9),
    ("organizations", 9),
    ("keyvault", 9),
    ("activedirectory", 9),
    ("monitoring", 9),
    ("logging", 9),
];

fn normalize(type_id: &str) -> String {
    type_id
        .chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Layer for a free-form type id.
#[must_use]
pub fn layer_of(type_id: &str) -> i32 {
    let normalized = normalize(type_id);
    LAYERS
        .iter()
        .find(|(id, _)| *id == normalized)
        .map_or(DEFAULT_LAYER, |(_, layer)| *layer)
}

/// Display name for a layer, used to label auto-formed clusters.
#[must_use]
pub fn layer_name(layer: i32) -> &'static str {
    match layer {
        0 => "Edge",
        1 | 2 => "Network",
        3 => "Subnets",
        4 => "Application",
        5 => "Compute",
        6 => "Integration",
        7 => "Data",
        8 => "Analytics",
        _ => "Operations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_layers() {
        assert_eq!(layer_of("cloudfront"), 0);
        assert_eq!(layer_of("vpc"), 2);
        assert_eq!(layer_of("public_subnet"), 3);
        assert_eq!(layer_of("apigateway"), 4);
        assert_eq!(layer_of("lambda"), 5);
        assert_eq!(layer_of("sqs"), 6);
        assert_eq!(layer_of("rds"), 7);
        assert_eq!(layer_of("kinesis"), 8);
        assert_eq!(layer_of("iam"), 9);
    }

    #[test]
    fn test_normalization_variants_agree() {
        assert_eq!(layer_of("api-gateway"), layer_of("apigateway"));
        assert_eq!(layer_of("Step_Functions"), layer_of("stepfunctions"));
    }

    #[test]
    fn test_unknown_type_gets_default_layer() {
        assert_eq!(layer_of("mainframe"), DEFAULT_LAYER);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(0), "Edge");
        assert_eq!(layer_name(5), "Compute");
        assert_eq!(layer_name(7), "Data");
        assert_eq!(layer_name(42), "Operations");
    }

    #[test]
    fn test_table_ordering_edge_before_data() {
        assert!(layer_of("cloudfront") < layer_of("alb"));
        assert!(layer_of("alb") < layer_of("ec2"));
        assert!(layer_of("ec2") < layer_of("rds"));
    }
}

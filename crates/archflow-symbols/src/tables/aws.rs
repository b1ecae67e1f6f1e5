//! AWS symbol table.
//!
//! Machine-generated from an installed `diagrams` 0.24 distribution.
//! Do not edit by hand; re-exported aliases are listed alongside their
//! canonical class names on purpose.

use super::ModuleSymbols;

pub(super) static MODULES: &[ModuleSymbols] = &[
    ModuleSymbols {
        module: "diagrams.aws.compute",
        category: "compute",
        classes: &[
            "AppRunner",
            "ApplicationAutoScaling",
            "AutoScaling",
            "Batch",
            "Compute",
            "ComputeOptimizer",
            "EC2",
            "EC2Ami",
            "EC2AutoScaling",
            "EC2ContainerRegistry",
            "EC2ContainerRegistryImage",
            "EC2ContainerRegistryRegistry",
            "EC2ElasticIpAddress",
            "EC2ImageBuilder",
            "EC2Instance",
            "EC2Instances",
            "EC2Rescue",
            "EC2SpotInstance",
            "ECR",
            "ECS",
            "EKS",
            "EB",
            "ElasticBeanstalk",
            "ElasticBeanstalkApplication",
            "ElasticBeanstalkDeployment",
            "ElasticContainerService",
            "ElasticContainerServiceContainer",
            "ElasticContainerServiceService",
            "ElasticKubernetesService",
            "Fargate",
            "Lambda",
            "LambdaFunction",
            "Lightsail",
            "LocalZones",
            "Outposts",
            "SAR",
            "ServerlessApplicationRepository",
            "ThinkboxDeadline",
            "ThinkboxFrost",
            "VmwareCloudOnAWS",
            "Wavelength",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.database",
        category: "database",
        classes: &[
            "Aurora",
            "AuroraInstance",
            "DAX",
            "DB",
            "DDB",
            "DMS",
            "Database",
            "DatabaseMigrationService",
            "DatabaseMigrationServiceDatabaseMigrationWorkflow",
            "DocumentDB",
            "DocumentdbMongodbCompatibility",
            "Dynamodb",
            "DynamodbAttribute",
            "DynamodbAttributes",
            "DynamodbDax",
            "DynamodbGSI",
            "DynamodbGlobalSecondaryIndex",
            "DynamodbItem",
            "DynamodbItems",
            "DynamodbTable",
            "ElastiCache",
            "Elasticache",
            "ElasticacheCacheNode",
            "ElasticacheForMemcached",
            "ElasticacheForRedis",
            "KeyspacesManagedApacheCassandraService",
            "Neptune",
            "QLDB",
            "QuantumLedgerDatabaseQldb",
            "RDS",
            "RDSInstance",
            "RDSMariadbInstance",
            "RDSMysqlInstance",
            "RDSOnVmware",
            "RDSOracleInstance",
            "RDSPostgresqlInstance",
            "RDSSqlServerInstance",
            "Redshift",
            "RedshiftDenseComputeNode",
            "RedshiftDenseStorageNode",
            "Timestream",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.network",
        category: "network",
        classes: &[
            "ALB",
            "APIGateway",
            "APIGatewayEndpoint",
            "AppMesh",
            "CF",
            "CLB",
            "ClientVpn",
            "CloudFront",
            "CloudFrontDownloadDistribution",
            "CloudFrontEdgeLocation",
            "CloudFrontStreamingDistribution",
            "CloudMap",
            "DirectConnect",
            "ELB",
            "ElasticLoadBalancing",
            "ElbApplicationLoadBalancer",
            "ElbClassicLoadBalancer",
            "ElbNetworkLoadBalancer",
            "Endpoint",
            "GAX",
            "GlobalAccelerator",
            "InternetGateway",
            "NATGateway",
            "NLB",
            "Nacl",
            "NetworkFirewall",
            "NetworkingAndContentDelivery",
            "Privatelink",
            "PrivateSubnet",
            "PublicSubnet",
            "Route53",
            "Route53HostedZone",
            "RouteTable",
            "SiteToSiteVpn",
            "TransitGateway",
            "TransitGatewayAttachment",
            "VPC",
            "VPCCustomerGateway",
            "VPCElasticNetworkAdapter",
            "VPCElasticNetworkInterface",
            "VPCFlowLogs",
            "VPCPeering",
            "VPCRouter",
            "VPCTrafficMirroring",
            "VpnConnection",
            "VpnGateway",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.storage",
        category: "storage",
        classes: &[
            "Backup",
            "CDR",
            "CloudendureDisasterRecovery",
            "EBS",
            "EFS",
            "EFSInfrequentaccessPrimaryBg",
            "EFSStandardPrimaryBg",
            "ElasticBlockStoreEBS",
            "ElasticBlockStoreEBSSnapshot",
            "ElasticBlockStoreEBSVolume",
            "ElasticFileSystemEFS",
            "ElasticFileSystemEFSFileSystem",
            "FSx",
            "Fsx",
            "FsxForLustre",
            "FsxForWindowsFileServer",
            "MultipleVolumesResource",
            "S3",
            "S3Glacier",
            "S3GlacierArchive",
            "S3GlacierVault",
            "SimpleStorageServiceS3",
            "SimpleStorageServiceS3Bucket",
            "SimpleStorageServiceS3BucketWithObjects",
            "SimpleStorageServiceS3Object",
            "SnowFamilySnowballImportExport",
            "Snowball",
            "SnowballEdge",
            "Snowmobile",
            "Storage",
            "StorageGateway",
            "StorageGatewayCachedVolume",
            "StorageGatewayNonCachedVolume",
            "StorageGatewayVirtualTapeLibrary",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.analytics",
        category: "analytics",
        classes: &[
            "Analytics",
            "Athena",
            "Cloudsearch",
            "CloudsearchSearchDocuments",
            "DataLakeResource",
            "DataPipeline",
            "ES",
            "ElasticsearchService",
            "EMR",
            "EMRCluster",
            "EMREngine",
            "EMRHdfsCluster",
            "Glue",
            "GlueCrawlers",
            "GlueDataCatalog",
            "Kinesis",
            "KinesisDataAnalytics",
            "KinesisDataFirehose",
            "KinesisDataStreams",
            "KinesisVideoStreams",
            "LakeFormation",
            "ManagedStreamingForKafka",
            "MSK",
            "Quicksight",
            "RedshiftML",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.integration",
        category: "integration",
        classes: &[
            "ApplicationIntegration",
            "Appsync",
            "ConsoleMobileApplication",
            "EventResource",
            "Eventbridge",
            "EventbridgeCustomEventBusResource",
            "EventbridgeDefaultEventBusResource",
            "EventbridgeSaasPartnerEventBusResource",
            "ExpressWorkflows",
            "MQ",
            "SF",
            "SNS",
            "SQS",
            "SimpleNotificationServiceSns",
            "SimpleNotificationServiceSnsEmailNotification",
            "SimpleNotificationServiceSnsHttpNotification",
            "SimpleNotificationServiceSnsTopic",
            "SimpleQueueServiceSqs",
            "SimpleQueueServiceSqsMessage",
            "SimpleQueueServiceSqsQueue",
            "StepFunctions",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.security",
        category: "security",
        classes: &[
            "ACM",
            "AdConnector",
            "Artifact",
            "CertificateManager",
            "CloudDirectory",
            "Cloudhsm",
            "Cognito",
            "Detective",
            "DirectoryService",
            "DS",
            "FMS",
            "FirewallManager",
            "Guardduty",
            "IAM",
            "IAMAccessAnalyzer",
            "IAMPermissions",
            "IAMRole",
            "IdentityAndAccessManagementIam",
            "IdentityAndAccessManagementIamRole",
            "Inspector",
            "KMS",
            "KeyManagementService",
            "Macie",
            "ResourceAccessManager",
            "SecretsManager",
            "SecurityHub",
            "SecurityIdentityAndCompliance",
            "Shield",
            "ShieldAdvanced",
            "SingleSignOn",
            "WAF",
            "WAFFilteringRule",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.ml",
        category: "ml",
        classes: &[
            "ApacheMxnetOnAWS",
            "AugmentedAi",
            "Bedrock",
            "Comprehend",
            "DeepLearningAmis",
            "DeepLearningContainers",
            "Deepcomposer",
            "Deeplens",
            "Deepracer",
            "ElasticInference",
            "Forecast",
            "FraudDetector",
            "Kendra",
            "Lex",
            "MachineLearning",
            "Personalize",
            "Polly",
            "Rekognition",
            "RekognitionImage",
            "RekognitionVideo",
            "Sagemaker",
            "SagemakerGroundTruth",
            "SagemakerModel",
            "SagemakerNotebook",
            "SagemakerTrainingJob",
            "Textract",
            "Transcribe",
            "Translate",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.management",
        category: "management",
        classes: &[
            "AutoScaling",
            "Chatbot",
            "Cloudformation",
            "CloudformationChangeSet",
            "CloudformationStack",
            "CloudformationTemplate",
            "Cloudtrail",
            "Cloudwatch",
            "CloudwatchAlarm",
            "CloudwatchEventEventBased",
            "CloudwatchEventTimeBased",
            "CloudwatchLogs",
            "CloudwatchRule",
            "Codeguru",
            "CommandLineInterface",
            "Config",
            "ControlTower",
            "LicenseManager",
            "ManagedServices",
            "ManagementAndGovernance",
            "ManagementConsole",
            "Opsworks",
            "Organizations",
            "OrganizationsAccount",
            "OrganizationsOrganizationalUnit",
            "ParameterStore",
            "PersonalHealthDashboard",
            "ServiceCatalog",
            "SSM",
            "SystemsManager",
            "SystemsManagerAutomation",
            "SystemsManagerDocuments",
            "SystemsManagerParameterStore",
            "TrustedAdvisor",
            "WellArchitectedTool",
        ],
    },
    ModuleSymbols {
        module: "diagrams.aws.general",
        category: "general",
        classes: &[
            "Client",
            "Disk",
            "Forums",
            "General",
            "GenericDatabase",
            "GenericFirewall",
            "GenericOfficeBuilding",
            "GenericSDK",
            "GenericSamlToken",
            "InternetAlt1",
            "InternetAlt2",
            "InternetGateway",
            "Marketplace",
            "MobileClient",
            "Multimedia",
            "OfficeBuilding",
            "SDK",
            "SamlToken",
            "TradicionalServer",
            "TraditionalServer",
            "User",
            "Users",
        ],
    },
];

//! GCP symbol table.
//!
//! Machine-generated from an installed `diagrams` 0.24 distribution.
//! Do not edit by hand.

use super::ModuleSymbols;

pub(super) static MODULES: &[ModuleSymbols] = &[
    ModuleSymbols {
        module: "diagrams.gcp.compute",
        category: "compute",
        classes: &[
            "AppEngine",
            "ComputeEngine",
            "ContainerOptimizedOS",
            "Functions",
            "GAE",
            "GCE",
            "GCF",
            "GKE",
            "GKEOnPrem",
            "GPU",
            "KubernetesEngine",
            "Run",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.database",
        category: "database",
        classes: &[
            "BigTable",
            "Bigtable",
            "Datastore",
            "Firestore",
            "Memorystore",
            "Spanner",
            "SQL",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.network",
        category: "network",
        classes: &[
            "Armor",
            "CDN",
            "DedicatedInterconnect",
            "DNS",
            "ExternalIpAddresses",
            "FirewallRules",
            "LoadBalancing",
            "NAT",
            "Network",
            "PartnerInterconnect",
            "PremiumNetworkTier",
            "Router",
            "Routes",
            "StandardNetworkTier",
            "TrafficDirector",
            "VirtualPrivateCloud",
            "VPC",
            "VPN",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.storage",
        category: "storage",
        classes: &[
            "Filestore",
            "GCS",
            "PersistentDisk",
            "Storage",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.analytics",
        category: "analytics",
        classes: &[
            "BigQuery",
            "Bigquery",
            "Composer",
            "DataCatalog",
            "DataFusion",
            "Dataflow",
            "Datalab",
            "Dataprep",
            "Dataproc",
            "Genomics",
            "PubSub",
            "Pubsub",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.ml",
        category: "ml",
        classes: &[
            "AdvancedSolutionsLab",
            "AIHub",
            "AIPlatform",
            "AIPlatformDataLabelingService",
            "AutoML",
            "Automl",
            "AutomlNaturalLanguage",
            "AutomlTables",
            "AutomlTranslation",
            "AutomlVideoIntelligence",
            "AutomlVision",
            "DialogFlowEnterpriseEdition",
            "InferenceAPI",
            "JupyterNotebook",
            "NaturalLanguageAPI",
            "RecommendationsAI",
            "SpeechToText",
            "TextToSpeech",
            "TPU",
            "TranslationAPI",
            "VideoIntelligenceAPI",
            "VisionAPI",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.security",
        category: "security",
        classes: &[
            "Iam",
            "IAP",
            "KeyManagementService",
            "KMS",
            "ResourceManager",
            "SecurityCommandCenter",
            "SecurityScanner",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.devtools",
        category: "devtools",
        classes: &[
            "Build",
            "CodeForIntellij",
            "Code",
            "ContainerRegistry",
            "GCR",
            "GradleAppEnginePlugin",
            "IdePlugins",
            "MavenAppEnginePlugin",
            "Scheduler",
            "SDK",
            "SourceRepositories",
            "Tasks",
            "TestLab",
            "ToolsForEclipse",
            "ToolsForPowershell",
            "ToolsForVisualStudio",
        ],
    },
    ModuleSymbols {
        module: "diagrams.gcp.operations",
        category: "operations",
        classes: &[
            "Logging",
            "Monitoring",
        ],
    },
];

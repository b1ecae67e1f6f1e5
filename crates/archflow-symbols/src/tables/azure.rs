//! Azure symbol table.
//!
//! Machine-generated from an installed `diagrams` 0.24 distribution.
//! Do not edit by hand.

use super::ModuleSymbols;

pub(super) static MODULES: &[ModuleSymbols] = &[
    ModuleSymbols {
        module: "diagrams.azure.compute",
        category: "compute",
        classes: &[
            "ACR",
            "AKS",
            "AppServices",
            "AutomanagedVM",
            "AvailabilitySets",
            "BatchAccounts",
            "CitrixVirtualDesktopsEssentials",
            "CloudServices",
            "CloudServicesClassic",
            "CloudsimpleVirtualMachines",
            "ContainerApps",
            "ContainerInstances",
            "ContainerRegistries",
            "DiskEncryptionSets",
            "DiskSnapshots",
            "Disks",
            "FunctionApps",
            "ImageDefinitions",
            "ImageVersions",
            "KubernetesServices",
            "MeshApplications",
            "OsImages",
            "SAPHANAOnAzure",
            "ServiceFabricClusters",
            "SharedImageGalleries",
            "SpringCloud",
            "VM",
            "VMClassic",
            "VMImages",
            "VMLinux",
            "VMScaleSet",
            "VMSS",
            "VMWindows",
            "Workspaces",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.database",
        category: "database",
        classes: &[
            "BlobStorage",
            "CacheForRedis",
            "CosmosDb",
            "DataExplorerClusters",
            "DataFactory",
            "DataLake",
            "DatabaseForMariadbServers",
            "DatabaseForMysqlServers",
            "DatabaseForPostgresqlServers",
            "ElasticDatabasePools",
            "ElasticJobAgents",
            "InstancePools",
            "ManagedDatabases",
            "SQL",
            "SQLDatabases",
            "SQLDatawarehouse",
            "SQLManagedInstances",
            "SQLServerStretchDatabases",
            "SQLServers",
            "SQLVM",
            "SsisLiftAndShiftIr",
            "SynapseAnalytics",
            "VirtualClusters",
            "VirtualDatacenter",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.network",
        category: "network",
        classes: &[
            "ApplicationGateway",
            "ApplicationSecurityGroups",
            "CDNProfiles",
            "Connections",
            "DDOSProtectionPlans",
            "DNSPrivateZones",
            "DNSZones",
            "ExpressrouteCircuits",
            "Firewall",
            "FrontDoors",
            "LoadBalancers",
            "LocalNetworkGateways",
            "NetworkInterfaces",
            "NetworkSecurityGroupsClassic",
            "NetworkWatcher",
            "OnPremisesDataGateways",
            "PrivateEndpoint",
            "PublicIpAddresses",
            "ReservedIpAddressesClassic",
            "RouteFilters",
            "RouteTables",
            "ServiceEndpointPolicies",
            "Subnets",
            "TrafficManagerProfiles",
            "VirtualNetworkClassic",
            "VirtualNetworkGateways",
            "VirtualNetworks",
            "VirtualWans",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.storage",
        category: "storage",
        classes: &[
            "ArchiveStorage",
            "Azurefxtedgefiler",
            "BlobStorage",
            "DataBoxEdgeDataBoxGateway",
            "DataBox",
            "DataLakeStorage",
            "GeneralStorage",
            "NetappFiles",
            "QueuesStorage",
            "StorageAccounts",
            "StorageAccountsClassic",
            "StorageExplorer",
            "StorageSyncServices",
            "StorsimpleDataManagers",
            "StorsimpleDeviceManagers",
            "TableStorage",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.analytics",
        category: "analytics",
        classes: &[
            "AnalysisServices",
            "DataExplorerClusters",
            "DataFactories",
            "DataLakeAnalytics",
            "DataLakeStoreGen1",
            "Databricks",
            "EventHubClusters",
            "EventHubs",
            "Hdinsightclusters",
            "LogAnalyticsWorkspaces",
            "StreamAnalyticsJobs",
            "SynapseAnalytics",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.integration",
        category: "integration",
        classes: &[
            "APIForFhir",
            "APIManagement",
            "AppConfiguration",
            "DataCatalog",
            "EventGridDomains",
            "EventGridSubscriptions",
            "EventGridTopics",
            "IntegrationAccounts",
            "IntegrationServiceEnvironments",
            "LogicApps",
            "LogicAppsCustomConnector",
            "PartnerTopic",
            "SendgridAccounts",
            "ServiceBus",
            "ServiceBusRelays",
            "ServiceCatalogManagedApplicationDefinitions",
            "SoftwareAsAService",
            "StorsimpleDeviceManagers",
            "SystemTopic",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.security",
        category: "security",
        classes: &[
            "ApplicationSecurityGroups",
            "ConditionalAccess",
            "Defender",
            "ExtendedSecurityUpdates",
            "KeyVaults",
            "SecurityCenter",
            "Sentinel",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.identity",
        category: "identity",
        classes: &[
            "AccessReview",
            "ActiveDirectory",
            "ADB2C",
            "ADDomainServices",
            "ADIdentityProtection",
            "ADPrivilegedIdentityManagement",
            "AppRegistrations",
            "ConditionalAccess",
            "EnterpriseApplications",
            "Groups",
            "IdentityGovernance",
            "InformationProtection",
            "ManagedIdentities",
            "Users",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.web",
        category: "web",
        classes: &[
            "APIConnections",
            "AppServiceCertificates",
            "AppServiceDomains",
            "AppServiceEnvironments",
            "AppServicePlans",
            "AppServices",
            "MediaServices",
            "NotificationHubNamespaces",
            "Search",
            "Signalr",
        ],
    },
    ModuleSymbols {
        module: "diagrams.azure.general",
        category: "general",
        classes: &[
            "Allresources",
            "Azurehome",
            "Developertools",
            "Helpsupport",
            "Information",
            "Managementgroups",
            "Marketplace",
            "Quickstartcenter",
            "Recent",
            "Reservations",
            "Resource",
            "Resourcegroups",
            "Servicehealth",
            "Shareddashboard",
            "Subscriptions",
            "Support",
            "Supportrequests",
            "Tag",
            "Tags",
            "Templates",
            "Twousericon",
            "Userhealthicon",
            "Usericon",
            "Userprivacy",
            "Userresource",
            "Whatsnew",
        ],
    },
];

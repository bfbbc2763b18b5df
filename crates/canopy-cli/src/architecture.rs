//! The Azure Stack Hub marketplace RSS feed architecture.
//!
//! The changelog page of the marketplace repository is polled by a function
//! app, which publishes the feed into blob storage. Application Insights
//! monitors the function and Key Vault holds its secrets.

use canopy::{
    CanopyError, DiagramBuilder,
    identifier::Id,
    semantic::{Diagram, Service},
};

/// Diagram title.
pub const TITLE: &str = "Azure Stack Hub MarketPlace RSS Feed";

/// Output base name of the rendered image.
pub const FILENAME: &str = "architecture";

/// Identifiers of the declared nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitectureNodes {
    pub changelog: Id,
    pub functions: Id,
    pub insights: Id,
    pub keyvault: Id,
    pub storage_account: Id,
    pub blob: Id,
}

/// Declare the RSS feed architecture.
///
/// # Errors
///
/// Propagates declaration errors from [`DiagramBuilder::build`].
pub fn declare() -> Result<(Diagram, ArchitectureNodes), CanopyError> {
    DiagramBuilder::new(TITLE)
        .graph_attr("bgcolor", "white")
        .graph_attr("pad", "0.5")
        .filename(FILENAME)
        .build(|diagram| {
            let changelog = diagram.node(Service::Github, "MarketPlace Changelog page");

            let (functions, insights, keyvault, storage_account, blob) =
                diagram.cluster("Azure Services", |azure| {
                    let functions = azure.node(Service::FunctionApps, "Functions App");
                    let insights = azure.node(Service::ApplicationInsights, "Application Insights");
                    let keyvault = azure.node(Service::KeyVaults, "Keyvault");

                    let (storage_account, blob) = azure.cluster("Storage", |storage| {
                        (
                            storage.node(Service::StorageAccounts, "Storage Account"),
                            storage.node(Service::BlobStorage, "rss/feed.xml"),
                        )
                    });

                    (functions, insights, keyvault, storage_account, blob)
                });

            diagram.forward(changelog, functions);
            diagram.forward(functions, storage_account);
            diagram.link(storage_account, blob);
            diagram.forward(insights, functions);
            diagram.both(keyvault, functions);

            ArchitectureNodes {
                changelog: changelog.id(),
                functions: functions.id(),
                insights: insights.id(),
                keyvault: keyvault.id(),
                storage_account: storage_account.id(),
                blob: blob.id(),
            }
        })
}

/// The declared RSS feed architecture diagram.
///
/// # Errors
///
/// Propagates declaration errors from [`DiagramBuilder::build`].
pub fn diagram() -> Result<Diagram, CanopyError> {
    declare().map(|(diagram, _)| diagram)
}

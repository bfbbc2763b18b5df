//! The icon catalog.
//!
//! Every node is drawn as a [`Service`]: a provider-specific resource with an
//! icon and a fallback fill color used when no icon art is available.
//! Icon files are looked up relative to an icon directory as
//! `<provider>/<category>/<icon>.png`.

use std::{fmt, path::PathBuf};

/// Cloud or infrastructure provider owning a service icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OnPrem,
    Azure,
}

impl Provider {
    /// Directory name of the provider in the icon tree.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnPrem => "onprem",
            Self::Azure => "azure",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service category within a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vcs,
    Compute,
    DevOps,
    Security,
    Storage,
}

impl Category {
    /// Directory name of the category in the icon tree.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vcs => "vcs",
            Self::Compute => "compute",
            Self::DevOps => "devops",
            Self::Security => "security",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A drawable service kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Github,
    Gitlab,
    FunctionApps,
    AppServices,
    ApplicationInsights,
    KeyVaults,
    StorageAccounts,
    BlobStorage,
    QueuesStorage,
    TableStorage,
}

impl Service {
    /// All catalog entries.
    pub const ALL: [Service; 10] = [
        Self::Github,
        Self::Gitlab,
        Self::FunctionApps,
        Self::AppServices,
        Self::ApplicationInsights,
        Self::KeyVaults,
        Self::StorageAccounts,
        Self::BlobStorage,
        Self::QueuesStorage,
        Self::TableStorage,
    ];

    pub fn provider(self) -> Provider {
        match self {
            Self::Github | Self::Gitlab => Provider::OnPrem,
            _ => Provider::Azure,
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Github | Self::Gitlab => Category::Vcs,
            Self::FunctionApps | Self::AppServices => Category::Compute,
            Self::ApplicationInsights => Category::DevOps,
            Self::KeyVaults => Category::Security,
            Self::StorageAccounts
            | Self::BlobStorage
            | Self::QueuesStorage
            | Self::TableStorage => Category::Storage,
        }
    }

    /// Icon file stem, without extension.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::FunctionApps => "function-apps",
            Self::AppServices => "app-services",
            Self::ApplicationInsights => "application-insights",
            Self::KeyVaults => "key-vaults",
            Self::StorageAccounts => "storage-accounts",
            Self::BlobStorage => "blob-storage",
            Self::QueuesStorage => "queues-storage",
            Self::TableStorage => "table-storage",
        }
    }

    /// Icon path relative to an icon directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy_core::semantic::Service;
    ///
    /// let path = Service::KeyVaults.icon_path();
    /// assert_eq!(path, std::path::Path::new("azure/security/key-vaults.png"));
    /// ```
    pub fn icon_path(self) -> PathBuf {
        let file = format!("{}.png", self.icon_name());
        [self.provider().as_str(), self.category().as_str(), file.as_str()]
            .into_iter()
            .collect()
    }

    /// Fill color used when the icon is not available, as a CSS hex string.
    pub fn fallback_fill(self) -> &'static str {
        match self.category() {
            Category::Vcs => "#24292e",
            Category::Compute => "#f2c811",
            Category::DevOps => "#68217a",
            Category::Security => "#e8a317",
            Category::Storage => "#0078d4",
        }
    }

    /// Font color readable on top of [`Service::fallback_fill`].
    pub fn fallback_font_color(self) -> &'static str {
        match self.category() {
            Category::Compute | Category::Security => "#2d3436",
            _ => "#ffffff",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.provider(), self.category(), self.icon_name())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, path::Path};

    use super::*;
    use crate::color::Color;

    #[test]
    fn test_icon_paths() {
        assert_eq!(
            Service::Github.icon_path(),
            Path::new("onprem/vcs/github.png")
        );
        assert_eq!(
            Service::FunctionApps.icon_path(),
            Path::new("azure/compute/function-apps.png")
        );
        assert_eq!(
            Service::ApplicationInsights.icon_path(),
            Path::new("azure/devops/application-insights.png")
        );
        assert_eq!(
            Service::BlobStorage.icon_path(),
            Path::new("azure/storage/blob-storage.png")
        );
    }

    #[test]
    fn test_icon_paths_are_unique() {
        let paths: HashSet<_> = Service::ALL.iter().map(|s| s.icon_path()).collect();
        assert_eq!(paths.len(), Service::ALL.len());
    }

    #[test]
    fn test_fallback_colors_parse() {
        for service in Service::ALL {
            assert!(Color::new(service.fallback_fill()).is_ok(), "{service}");
            assert!(Color::new(service.fallback_font_color()).is_ok(), "{service}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Service::StorageAccounts.to_string(),
            "azure.storage.storage-accounts"
        );
    }
}
